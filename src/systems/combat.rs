//! Player melee attack: swing start, hit resolution, and attack timers.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;

use crate::asset::Sound;
use crate::constants::{ATTACK_DAMAGE, ATTACK_DURATION, HIT_FLASH_TIME, KILL_SCORE};
use crate::direction::Direction;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::ruleset::{AttackAnimation, Ruleset};
use crate::systems::audio::AudioEvent;
use crate::systems::components::{
    AttackState, DeltaTime, Enemy, Facing, Health, HitFlash, Invulnerability, MovementIntent, PlayerControlled,
    Position, Score,
};
use crate::systems::stage::GameStage;

/// Whether a swing from `player` facing `facing` reaches `enemy`.
///
/// Two conditions: the enemy is within reach (range plus tolerance), and it
/// is not behind the player. "Behind" is a half-plane test on the facing
/// axis with some slack, so enemies beside the player still get hit.
pub fn attack_connects(player: Vec2, facing: Direction, enemy: Vec2, rules: &Ruleset) -> bool {
    let delta = enemy - player;
    if delta.length() > rules.reach() {
        return false;
    }
    match facing {
        Direction::Up => delta.y < rules.front_slack,
        Direction::Down => delta.y > -rules.front_slack,
        Direction::Left => delta.x < rules.front_slack,
        Direction::Right => delta.x > -rules.front_slack,
    }
}

#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn player_combat_system(
    stage: Res<GameStage>,
    time: Res<DeltaTime>,
    rules: Res<Ruleset>,
    intent: Res<MovementIntent>,
    mut score: ResMut<Score>,
    mut players: Query<(&Position, &Facing, &mut AttackState, &mut Invulnerability), With<PlayerControlled>>,
    mut enemies: Query<(Entity, &Position, &mut Health, &mut HitFlash), (With<Enemy>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
    mut audio_events: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
    mut commands: Commands,
) {
    if !stage.is_playing() {
        return;
    }

    let Ok((position, facing, mut attack, mut invulnerability)) = players.single_mut() else {
        errors.write(GameError::InvalidState("Expected exactly one player".into()));
        return;
    };

    if intent.attack_requested && attack.ready() {
        attack.attacking = true;
        attack.cooldown = ATTACK_DURATION;
        attack.frame = 0;
        attack.frame_timer = 0.0;
        audio_events.write(AudioEvent::Play(Sound::Sword));

        // Hits resolve instantly at swing start; the arc is only a visual.
        for (entity, enemy_position, mut health, mut flash) in enemies.iter_mut() {
            if !attack_connects(position.0, facing.0, enemy_position.0, &rules) {
                continue;
            }
            health.current -= ATTACK_DAMAGE;
            flash.remaining = HIT_FLASH_TIME;
            tracing::debug!(?entity, health = health.current, "Enemy hit");
            if health.is_dead() {
                commands.entity(entity).despawn();
                score.0 += KILL_SCORE;
                events.write(GameEvent::EnemyDefeated { at: enemy_position.0 });
            }
        }
    }

    if attack.attacking {
        if let AttackAnimation::Framed { frames, frame_delay } = rules.attack_animation {
            attack.frame_timer += time.0;
            if attack.frame_timer >= frame_delay {
                attack.frame_timer = 0.0;
                attack.frame = (attack.frame + 1).min(frames - 1);
            }
        }
    }

    if attack.cooldown > 0.0 {
        attack.cooldown -= time.0;
        if attack.cooldown <= 0.0 {
            attack.cooldown = 0.0;
            attack.attacking = false;
            attack.frame = 0;
            attack.frame_timer = 0.0;
        }
    }

    if invulnerability.remaining > 0.0 {
        invulnerability.remaining = (invulnerability.remaining - time.0).max(0.0);
    }
}
