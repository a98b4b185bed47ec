#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, schedule::IntoScheduleConfigs, schedule::Schedule, world::World};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use questfall::{
    error::GameError,
    events::{GameCommand, GameEvent},
    ruleset::Ruleset,
    systems::{
        animation::{hit_flash_system, walk_animation_system},
        audio::{AudioEvent, AudioState},
        combat::player_combat_system,
        components::{
            DeltaTime, EnemyBundle, FrameClock, GlobalState, MovementIntent, PlayerBundle, Score, SpawnRng, SpawnState,
        },
        enemy::enemy_ai_system,
        input::TouchState,
        player::{player_control_system, player_movement_system},
        spawn::spawn_system,
        stage::{stage_system, GameStage},
    },
};

/// One simulated frame at 60fps.
pub const DT: f32 = 1.0 / 60.0;

/// Creates a headless world with every resource the simulation systems
/// read, but none of the SDL-bound presentation state.
pub fn create_test_world(rules: Ruleset) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(rules);
    world.insert_resource(GameStage::Playing);
    world.insert_resource(DeltaTime(DT));
    world.insert_resource(FrameClock(0.0));
    world.insert_resource(Score::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(SpawnState::default());
    world.insert_resource(SpawnRng(SmallRng::seed_from_u64(42)));
    world.insert_resource(MovementIntent::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(TouchState::default());

    world
}

/// The simulation half of the frame schedule, in game order. Input and
/// rendering are omitted; tests inject commands as events instead.
pub fn sim_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            player_control_system,
            stage_system,
            player_movement_system,
            player_combat_system,
            enemy_ai_system,
            spawn_system,
            walk_animation_system,
            hit_flash_system,
        )
            .chain(),
    );
    schedule
}

/// Runs one frame and then rotates the event buffers, like the real loop.
pub fn step(world: &mut World, schedule: &mut Schedule) {
    schedule.run(world);
    world.resource_mut::<Events<GameEvent>>().update();
    world.resource_mut::<Events<GameError>>().update();
    world.resource_mut::<Events<AudioEvent>>().update();
}

pub fn step_frames(world: &mut World, schedule: &mut Schedule, frames: usize) {
    for _ in 0..frames {
        step(world, schedule);
    }
}

pub fn spawn_test_player(world: &mut World) -> Entity {
    world.spawn(PlayerBundle::new()).id()
}

pub fn spawn_test_enemy(world: &mut World, position: Vec2) -> Entity {
    let rules = *world.resource::<Ruleset>();
    world.spawn(EnemyBundle::new(position, &rules)).id()
}

pub fn send_command(world: &mut World, command: GameCommand) {
    world.send_event(GameEvent::Command(command));
}

/// Removes and returns all pending game events.
pub fn drain_game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

pub fn drain_audio_events(world: &mut World) -> Vec<AudioEvent> {
    world.resource_mut::<Events<AudioEvent>>().drain().collect()
}
