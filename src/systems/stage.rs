//! The Intro / Playing / GameOver state machine.
//!
//! The loop driver has two effective states: Idle (intro or defeat screen,
//! simulation halted) and Running. Transitions happen here, including the
//! full state reset on restart.

use std::sync::atomic::{AtomicBool, Ordering};

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};

use crate::asset::Sound;
use crate::constants::{CANVAS_SIZE, INTRO_DURATION, INTRO_FADE, PLAYER_MAX_HEALTH};
use crate::direction::Direction;
use crate::events::{GameCommand, GameEvent};
use crate::systems::audio::AudioEvent;
use crate::systems::components::{
    AttackState, DeltaTime, Enemy, Facing, FrameClock, Health, Invulnerability, Motion, MovementIntent, Position, Score,
    SpawnState, WalkAnimation,
};
use crate::systems::components::PlayerControlled;

/// Whether the intro crawl has already been shown this session. Lives for
/// the process lifetime; a fresh `Game` in the same process skips the crawl.
static INTRO_SEEN: AtomicBool = AtomicBool::new(false);

/// High-level stage of the game. The simulation only advances in `Playing`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum GameStage {
    /// The skippable intro crawl. `remaining` counts down to the start of
    /// gameplay; a manual skip shortens it to the fade-out.
    Intro { remaining: f32 },
    Playing,
    GameOver,
}

impl GameStage {
    /// Initial stage for a new game, honoring the session intro flag.
    pub fn initial() -> Self {
        if INTRO_SEEN.load(Ordering::Relaxed) {
            GameStage::Playing
        } else {
            GameStage::Intro {
                remaining: INTRO_DURATION,
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    time: Res<DeltaTime>,
    clock: Res<FrameClock>,
    mut events: EventReader<GameEvent>,
    mut audio_events: EventWriter<AudioEvent>,
    mut score: ResMut<Score>,
    mut spawn_state: ResMut<SpawnState>,
    mut intent: ResMut<MovementIntent>,
    mut players: Query<
        (
            &mut Position,
            &mut Facing,
            &mut Motion,
            &mut Health,
            &mut AttackState,
            &mut Invulnerability,
            &mut WalkAnimation,
        ),
        With<PlayerControlled>,
    >,
    enemies: Query<Entity, With<Enemy>>,
    mut commands: Commands,
) {
    let old_stage = *stage;

    let mut skip_requested = false;
    let mut restart_requested = false;
    let mut defeat_score = None;

    for event in events.read() {
        match event {
            // Space/Return double as "skip" and "restart" outside gameplay.
            GameEvent::Command(GameCommand::Attack) => match old_stage {
                GameStage::Intro { .. } => skip_requested = true,
                GameStage::GameOver => restart_requested = true,
                GameStage::Playing => {}
            },
            GameEvent::Command(GameCommand::Restart) => {
                if old_stage == GameStage::GameOver {
                    restart_requested = true;
                }
            }
            GameEvent::PlayerDefeated { score } => defeat_score = Some(*score),
            _ => {}
        }
    }

    let new_stage = match old_stage {
        GameStage::Intro { remaining } => {
            let remaining = if skip_requested && remaining > INTRO_FADE {
                INTRO_FADE
            } else {
                remaining
            };
            let remaining = remaining - time.0;
            if remaining <= 0.0 {
                GameStage::Playing
            } else {
                GameStage::Intro { remaining }
            }
        }
        GameStage::Playing => {
            if defeat_score.is_some() {
                GameStage::GameOver
            } else {
                GameStage::Playing
            }
        }
        GameStage::GameOver => {
            if restart_requested {
                GameStage::Playing
            } else {
                GameStage::GameOver
            }
        }
    };

    if old_stage == new_stage {
        return;
    }

    match (old_stage, new_stage) {
        (GameStage::Intro { .. }, GameStage::Playing) => {
            INTRO_SEEN.store(true, Ordering::Relaxed);
            spawn_state.last_spawn = clock.0;
            audio_events.write(AudioEvent::Play(Sound::Fanfare));
            tracing::info!("Intro finished, starting game");
        }
        (GameStage::Playing, GameStage::GameOver) => {
            tracing::info!(final_score = defeat_score.unwrap_or(score.0), "Game over");
        }
        (GameStage::GameOver, GameStage::Playing) => {
            // Restart: reinitialize everything to load-time defaults.
            for (mut position, mut facing, mut motion, mut health, mut attack, mut invulnerability, mut walk) in
                players.iter_mut()
            {
                position.0 = CANVAS_SIZE / 2.0;
                *facing = Facing(Direction::Down);
                *motion = Motion::Idle;
                *health = Health::full(PLAYER_MAX_HEALTH);
                *attack = AttackState::default();
                *invulnerability = Invulnerability::default();
                *walk = WalkAnimation::default();
            }
            for entity in enemies.iter() {
                commands.entity(entity).despawn();
            }
            score.0 = 0;
            spawn_state.last_spawn = clock.0;
            *intent = MovementIntent::default();
            audio_events.write(AudioEvent::Play(Sound::Fanfare));
            tracing::info!("Restarting game");
        }
        // The intro ticking down is not a transition.
        (GameStage::Intro { .. }, GameStage::Intro { .. }) => {}
        _ => {
            tracing::warn!(?old_stage, ?new_stage, "Unhandled stage transition");
        }
    }

    *stage = new_stage;
}
