mod common;

use common::*;
use glam::Vec2;
use pretty_assertions::assert_eq;
use questfall::asset::Sound;
use questfall::constants::{ATTACK_DURATION, KILL_SCORE};
use questfall::direction::Direction;
use questfall::events::{GameCommand, GameEvent};
use questfall::ruleset::Ruleset;
use questfall::systems::audio::AudioEvent;
use questfall::systems::components::{AttackState, Facing, Health, Position, Score};

#[test]
fn test_attack_defeats_enemy_in_reach() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    world.get_mut::<Facing>(player).unwrap().0 = Direction::Up;
    let player_position = world.get::<Position>(player).unwrap().0;
    let enemy = spawn_test_enemy(&mut world, player_position - Vec2::new(0.0, 50.0));

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);

    assert!(world.get_entity(enemy).is_err(), "enemy should be despawned");
    assert_eq!(world.resource::<Score>().0, KILL_SCORE);
    let events = drain_game_events(&mut world);
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::EnemyDefeated { .. })));
}

#[test]
fn test_attack_spares_enemy_behind_player() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    world.get_mut::<Facing>(player).unwrap().0 = Direction::Up;
    let player_position = world.get::<Position>(player).unwrap().0;
    let enemy = spawn_test_enemy(&mut world, player_position + Vec2::new(0.0, 50.0));

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);

    let health = world.get::<Health>(enemy).unwrap();
    assert_eq!(health.current, health.max);
    assert_eq!(world.resource::<Score>().0, 0);
}

#[test]
fn test_attack_cooldown_blocks_a_second_swing() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);
    assert!(world.get::<AttackState>(player).unwrap().attacking);
    drain_audio_events(&mut world);

    // A second press mid-swing is ignored: no new swing, no sword sound.
    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);
    let sword_sounds = drain_audio_events(&mut world)
        .into_iter()
        .filter(|event| *event == AudioEvent::Play(Sound::Sword))
        .count();
    assert_eq!(sword_sounds, 0);
}

#[test]
fn test_cooldown_decreases_monotonically_to_zero() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);

    let mut previous = world.get::<AttackState>(player).unwrap().cooldown;
    assert!(previous > 0.0);
    let frames = (ATTACK_DURATION / DT).ceil() as usize + 2;
    for _ in 0..frames {
        step(&mut world, &mut schedule);
        let current = world.get::<AttackState>(player).unwrap().cooldown;
        assert!(current <= previous, "cooldown must never increase mid-swing");
        previous = current;
    }

    let attack = world.get::<AttackState>(player).unwrap();
    assert_eq!(attack.cooldown, 0.0);
    assert!(!attack.attacking);
    assert_eq!(attack.frame, 0);
}

#[test]
fn test_swing_becomes_ready_again_after_cooldown() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);

    send_command(&mut world, GameCommand::Attack);
    let frames = (ATTACK_DURATION / DT).ceil() as usize + 2;
    step_frames(&mut world, &mut schedule, frames);
    drain_audio_events(&mut world);

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);
    assert!(world.get::<AttackState>(player).unwrap().attacking);
}

#[test]
fn test_each_kill_scores_once() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    world.get_mut::<Facing>(player).unwrap().0 = Direction::Right;
    let player_position = world.get::<Position>(player).unwrap().0;
    spawn_test_enemy(&mut world, player_position + Vec2::new(40.0, 0.0));
    spawn_test_enemy(&mut world, player_position + Vec2::new(60.0, 10.0));

    send_command(&mut world, GameCommand::Attack);
    step(&mut world, &mut schedule);

    assert_eq!(world.resource::<Score>().0, 2 * KILL_SCORE);
}
