//! World construction and the per-frame schedule.

use bevy_ecs::{
    event::{EventReader, EventRegistry},
    schedule::{IntoScheduleConfigs, Schedule},
    world::World,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::audio::Audio;
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::ruleset::Ruleset;
use crate::systems::animation::{hit_flash_system, walk_animation_system};
use crate::systems::audio::{audio_system, AudioEvent, AudioResource, AudioState};
use crate::systems::combat::player_combat_system;
use crate::systems::components::{
    DeltaTime, FrameClock, GlobalState, MovementIntent, PlayerBundle, Score, SpawnRng, SpawnState,
};
use crate::systems::enemy::enemy_ai_system;
use crate::systems::hud::{hud_render_system, present_system, TorchAnimation};
use crate::systems::input::{input_system, Bindings, TouchState};
use crate::systems::player::{player_control_system, player_movement_system};
use crate::systems::render::render_system;
use crate::systems::spawn::spawn_system;
use crate::systems::stage::{stage_system, GameStage};
use crate::texture::sprite::SpriteStore;

/// The game world and its fixed system schedule, one run per frame.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    pub fn new(
        canvas: &'static mut Canvas<Window>,
        texture_creator: &'static TextureCreator<WindowContext>,
        event_pump: &'static mut EventPump,
    ) -> GameResult<Game> {
        let mut world = World::new();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        let rules = Ruleset::from_env();
        tracing::info!(touch = rules.touch_controls, "Ruleset selected");

        world.insert_non_send_resource(SpriteStore::load(texture_creator));
        world.insert_non_send_resource(AudioResource(Audio::new()));
        world.insert_non_send_resource(canvas);
        world.insert_non_send_resource(event_pump);

        world.insert_resource(rules);
        world.insert_resource(GameStage::initial());
        world.insert_resource(Bindings::default());
        world.insert_resource(TouchState::default());
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(FrameClock::default());
        world.insert_resource(Score::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(SpawnState::default());
        world.insert_resource(SpawnRng(SmallRng::from_os_rng()));
        world.insert_resource(MovementIntent::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(TorchAnimation::default());

        world.spawn(PlayerBundle::new());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                input_system,
                player_control_system,
                stage_system,
                player_movement_system,
                player_combat_system,
                enemy_ai_system,
                spawn_system,
                walk_animation_system,
                hit_flash_system,
                audio_system,
                render_system,
                hud_render_system,
                present_system,
                error_log_system,
                bevy_ecs::event::event_update_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Advances the game by one frame. Returns `true` when the app should
    /// exit.
    pub fn tick(&mut self, delta: f32, clock: f64) -> bool {
        self.world.insert_resource(DeltaTime(delta));
        self.world.insert_resource(FrameClock(clock));
        self.schedule.run(&mut self.world);
        self.world.resource::<GlobalState>().exit
    }
}

/// Records reported (non-fatal) errors. Runs after every other system.
pub fn error_log_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        tracing::error!(error = %error, "Game error");
    }
}
