//! Enemy pursuit and contact damage.

use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res},
};

use crate::error::GameError;
use crate::events::GameEvent;
use crate::ruleset::{ContactDamage, Ruleset};
use crate::systems::components::{
    DeltaTime, Enemy, Facing, Health, Invulnerability, Motion, PlayerControlled, Position, Score, Speed,
};
use crate::systems::stage::GameStage;

#[allow(clippy::type_complexity)]
pub fn enemy_ai_system(
    stage: Res<GameStage>,
    time: Res<DeltaTime>,
    rules: Res<Ruleset>,
    score: Res<Score>,
    mut players: Query<(&Position, &mut Health, &mut Invulnerability), With<PlayerControlled>>,
    mut enemies: Query<
        (&mut Position, &mut Facing, &mut Motion, &Speed, &mut Enemy),
        Without<PlayerControlled>,
    >,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    if !stage.is_playing() {
        return;
    }

    let Ok((player_position, mut player_health, mut invulnerability)) = players.single_mut() else {
        errors.write(GameError::InvalidState("Expected exactly one player".into()));
        return;
    };
    let target = player_position.0;

    if player_health.is_dead() {
        return;
    }

    for (mut position, mut facing, mut motion, speed, mut enemy) in enemies.iter_mut() {
        if enemy.attack_cooldown > 0.0 {
            enemy.attack_cooldown = (enemy.attack_cooldown - time.0).max(0.0);
        }

        let delta = target - position.0;
        if delta.length() > rules.engage_distance {
            // Pursuit is axis-exclusive: close the dominant gap first.
            let step = speed.0 * time.0;
            if delta.x.abs() > delta.y.abs() {
                position.0.x += step.copysign(delta.x);
                facing.0 = if delta.x > 0.0 {
                    crate::direction::Direction::Right
                } else {
                    crate::direction::Direction::Left
                };
            } else {
                position.0.y += step.copysign(delta.y);
                facing.0 = if delta.y > 0.0 {
                    crate::direction::Direction::Down
                } else {
                    crate::direction::Direction::Up
                };
            }
            *motion = Motion::Moving;
            continue;
        }

        *motion = Motion::Idle;
        if player_health.is_dead() {
            continue;
        }
        match rules.contact_damage {
            ContactDamage::Burst {
                cooldown,
                invulnerability: window,
                ..
            } => {
                if enemy.attack_cooldown <= 0.0 && !invulnerability.is_active() {
                    player_health.current -= enemy.damage;
                    invulnerability.remaining = window;
                    enemy.attack_cooldown = cooldown;
                    events.write(GameEvent::PlayerHit { damage: enemy.damage });
                    tracing::debug!(health = player_health.current, "Player hit");
                }
            }
            ContactDamage::Drain { .. } => {
                player_health.current -= enemy.damage * time.0;
            }
        }
    }

    // The early return above means any death seen here happened this frame.
    if player_health.is_dead() {
        events.write(GameEvent::PlayerDefeated { score: score.0 });
    }
}
