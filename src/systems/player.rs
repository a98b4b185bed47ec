//! Player intent and movement.
//!
//! `player_control_system` folds the frame's command events (and the
//! joystick, under the touch preset) into a single [`MovementIntent`];
//! `player_movement_system` applies that intent to the player entity.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec2;

use crate::constants::CANVAS_SIZE;
use crate::error::GameError;
use crate::events::{GameCommand, GameEvent};
use crate::ruleset::Ruleset;
use crate::systems::components::{
    BodySize, DeltaTime, Facing, GlobalState, Motion, MovementIntent, PlayerControlled, Position, Speed,
};
use crate::systems::input::TouchState;
use crate::systems::stage::GameStage;
use crate::systems::audio::AudioState;

pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    rules: Res<Ruleset>,
    touch: Res<TouchState>,
    mut intent: ResMut<MovementIntent>,
    mut global: ResMut<GlobalState>,
    mut audio_state: ResMut<AudioState>,
) {
    *intent = MovementIntent::default();

    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };
        match command {
            GameCommand::Move(direction) if stage.is_playing() => {
                intent.vector = direction.offset();
                intent.facing = Some(*direction);
            }
            GameCommand::Attack if stage.is_playing() => {
                intent.attack_requested = true;
            }
            GameCommand::MuteAudio => {
                audio_state.muted = !audio_state.muted;
            }
            GameCommand::Exit => {
                tracing::info!("Exit requested");
                global.exit = true;
            }
            // Skip/restart and out-of-stage presses are the stage system's business.
            _ => {}
        }
    }

    // The joystick overrides keyboard movement under the touch preset.
    if rules.touch_controls && stage.is_playing() {
        if let Some((vector, facing)) = touch.movement() {
            intent.vector = vector;
            intent.facing = Some(facing);
        }
    }
}

pub fn player_movement_system(
    stage: Res<GameStage>,
    time: Res<DeltaTime>,
    intent: Res<MovementIntent>,
    mut players: Query<(&mut Position, &mut Facing, &mut Motion, &BodySize, &Speed), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    if !stage.is_playing() {
        return;
    }

    let Ok((mut position, mut facing, mut motion, body, speed)) = players.single_mut() else {
        errors.write(GameError::InvalidState("Expected exactly one player".into()));
        return;
    };

    if intent.vector == Vec2::ZERO {
        *motion = Motion::Idle;
        return;
    }

    if let Some(direction) = intent.facing {
        facing.0 = direction;
    }
    *motion = Motion::Moving;

    let half = body.0 / 2.0;
    let next = position.0 + intent.vector * speed.0 * time.0;
    position.0 = next.clamp(Vec2::splat(half), CANVAS_SIZE - half);
}
