mod common;

use common::*;
use glam::Vec2;
use pretty_assertions::assert_eq;
use questfall::constants::{ENEMY_DAMAGE, ENEMY_SPEED, PLAYER_MAX_HEALTH};
use questfall::direction::Direction;
use questfall::events::GameEvent;
use questfall::ruleset::Ruleset;
use questfall::systems::components::{Facing, Health, Invulnerability, Motion, Position};
use questfall::systems::stage::GameStage;

#[test]
fn test_enemy_pursues_along_dominant_axis_only() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    let target = world.get::<Position>(player).unwrap().0;
    let enemy = spawn_test_enemy(&mut world, target - Vec2::new(200.0, 80.0));
    let start = world.get::<Position>(enemy).unwrap().0;

    step(&mut world, &mut schedule);

    let position = world.get::<Position>(enemy).unwrap().0;
    assert!((position.x - start.x - ENEMY_SPEED * DT).abs() < 1e-4);
    assert_eq!(position.y, start.y, "pursuit must not move diagonally");
    assert_eq!(world.get::<Facing>(enemy).unwrap().0, Direction::Right);
    assert_eq!(*world.get::<Motion>(enemy).unwrap(), Motion::Moving);
}

#[test]
fn test_axis_tie_prefers_vertical() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    let target = world.get::<Position>(player).unwrap().0;
    let enemy = spawn_test_enemy(&mut world, target - Vec2::new(100.0, 100.0));
    let start = world.get::<Position>(enemy).unwrap().0;

    step(&mut world, &mut schedule);

    let position = world.get::<Position>(enemy).unwrap().0;
    assert_eq!(position.x, start.x);
    assert!(position.y > start.y);
    assert_eq!(world.get::<Facing>(enemy).unwrap().0, Direction::Down);
}

#[test]
fn test_contact_hit_applies_damage_and_invulnerability() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    let target = world.get::<Position>(player).unwrap().0;
    spawn_test_enemy(&mut world, target + Vec2::new(20.0, 0.0));

    step(&mut world, &mut schedule);

    let health = world.get::<Health>(player).unwrap();
    assert_eq!(health.current, PLAYER_MAX_HEALTH - ENEMY_DAMAGE);
    assert!(world.get::<Invulnerability>(player).unwrap().is_active());
    let events = drain_game_events(&mut world);
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::PlayerHit { .. })));

    // The window blocks further hits on subsequent frames.
    step(&mut world, &mut schedule);
    assert_eq!(
        world.get::<Health>(player).unwrap().current,
        PLAYER_MAX_HEALTH - ENEMY_DAMAGE
    );
}

#[test]
fn test_invulnerability_blocks_a_second_enemy_in_the_same_frame() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    let target = world.get::<Position>(player).unwrap().0;
    spawn_test_enemy(&mut world, target + Vec2::new(20.0, 0.0));
    spawn_test_enemy(&mut world, target - Vec2::new(20.0, 0.0));

    step(&mut world, &mut schedule);

    assert_eq!(
        world.get::<Health>(player).unwrap().current,
        PLAYER_MAX_HEALTH - ENEMY_DAMAGE,
        "only one burst hit may land per window"
    );
}

#[test]
fn test_drain_preset_damages_continuously_without_invulnerability() {
    let mut world = create_test_world(Ruleset::touch());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    let target = world.get::<Position>(player).unwrap().0;
    spawn_test_enemy(&mut world, target + Vec2::new(5.0, 0.0));

    step_frames(&mut world, &mut schedule, 60);

    let health = world.get::<Health>(player).unwrap();
    let drained = PLAYER_MAX_HEALTH - health.current;
    assert!((drained - ENEMY_DAMAGE).abs() < 0.5, "expected ~{ENEMY_DAMAGE} hp over one second, got {drained}");
    assert!(!world.get::<Invulnerability>(player).unwrap().is_active());
}

#[test]
fn test_player_defeat_is_reported_exactly_once() {
    let mut world = create_test_world(Ruleset::keyboard());
    let mut schedule = sim_schedule();
    let player = spawn_test_player(&mut world);
    world.get_mut::<Health>(player).unwrap().current = 5.0;
    let target = world.get::<Position>(player).unwrap().0;
    spawn_test_enemy(&mut world, target + Vec2::new(20.0, 0.0));

    step(&mut world, &mut schedule);
    let defeats = drain_game_events(&mut world)
        .into_iter()
        .filter(|event| matches!(event, GameEvent::PlayerDefeated { .. }))
        .count();
    assert_eq!(defeats, 1);

    // Resend so the stage system still sees the defeat after the drain.
    let score = world.resource::<questfall::systems::components::Score>().0;
    world.send_event(GameEvent::PlayerDefeated { score });
    step_frames(&mut world, &mut schedule, 5);

    assert_eq!(*world.resource::<GameStage>(), GameStage::GameOver);
    let more_defeats = drain_game_events(&mut world)
        .into_iter()
        .filter(|event| matches!(event, GameEvent::PlayerDefeated { .. }))
        .count();
    assert_eq!(more_defeats, 0);
}
