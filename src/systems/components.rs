//! Components, bundles, and resources shared across the simulation systems.

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::constants::{
    CANVAS_SIZE, ENEMY_HEALTH, ENEMY_SIZE, ENEMY_SPEED, FLICKER_INTERVAL, PLAYER_MAX_HEALTH, PLAYER_SIZE, PLAYER_SPEED,
};
use crate::direction::Direction;
use crate::ruleset::{ContactDamage, Ruleset};

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Center position of an entity on the canvas.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Which way an entity faces. Retained while there is no movement intent.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing(pub Direction);

/// Edge length of an entity's square bounding box.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodySize(pub f32);

/// Movement speed in canvas units per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct Speed(pub f32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Moving,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// The value shown on the HUD, clamped so it never reads below zero.
    pub fn displayed(&self) -> f32 {
        self.current.max(0.0)
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Player melee attack state.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AttackState {
    pub attacking: bool,
    /// Remaining time of the current attack, in seconds.
    pub cooldown: f32,
    /// Current frame of the stepped attack animation (0..=2).
    pub frame: u8,
    pub frame_timer: f32,
}

impl AttackState {
    /// Whether a new attack may start this frame.
    pub fn ready(&self) -> bool {
        !self.attacking && self.cooldown <= 0.0
    }

    /// Slash animation progress in `[0, 1]`, per the active preset.
    pub fn progress(&self, rules: &Ruleset) -> f32 {
        match rules.attack_animation {
            crate::ruleset::AttackAnimation::Framed { frames, .. } => {
                self.frame as f32 / (frames.saturating_sub(1).max(1)) as f32
            }
            crate::ruleset::AttackAnimation::CooldownScaled => {
                let duration = crate::constants::ATTACK_DURATION;
                ((duration - self.cooldown) / duration).clamp(0.0, 1.0)
            }
        }
    }
}

/// Post-hit invulnerability window on the player.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Invulnerability {
    pub remaining: f32,
}

impl Invulnerability {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// The flicker hides the sprite during the second half of each
    /// sub-interval while invulnerable.
    pub fn flicker_visible(&self) -> bool {
        !self.is_active() || self.remaining % FLICKER_INTERVAL < FLICKER_INTERVAL / 2.0
    }
}

/// Brief white overlay on an enemy that just took damage.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitFlash {
    pub remaining: f32,
}

impl HitFlash {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Two-pose walk cycle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WalkAnimation {
    pub frame: u8,
    pub timer: f32,
}

/// Marker plus combat fields for a spawned foe.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub damage: f32,
    /// Remaining cooldown of the enemy's own swing (burst damage model).
    pub attack_cooldown: f32,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub facing: Facing,
    pub body: BodySize,
    pub speed: Speed,
    pub motion: Motion,
    pub health: Health,
    pub attack: AttackState,
    pub invulnerability: Invulnerability,
    pub walk: WalkAnimation,
}

impl PlayerBundle {
    pub fn new() -> Self {
        Self {
            player: PlayerControlled,
            position: Position(CANVAS_SIZE / 2.0),
            facing: Facing(Direction::Down),
            body: BodySize(PLAYER_SIZE),
            speed: Speed(PLAYER_SPEED),
            motion: Motion::Idle,
            health: Health::full(PLAYER_MAX_HEALTH),
            attack: AttackState::default(),
            invulnerability: Invulnerability::default(),
            walk: WalkAnimation::default(),
        }
    }
}

impl Default for PlayerBundle {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub position: Position,
    pub facing: Facing,
    pub body: BodySize,
    pub speed: Speed,
    pub motion: Motion,
    pub health: Health,
    pub hit_flash: HitFlash,
    pub walk: WalkAnimation,
}

impl EnemyBundle {
    pub fn new(position: Vec2, rules: &Ruleset) -> Self {
        let damage = match rules.contact_damage {
            ContactDamage::Burst { damage, .. } => damage,
            ContactDamage::Drain { per_second } => per_second,
        };
        Self {
            enemy: Enemy {
                damage,
                attack_cooldown: 0.0,
            },
            position: Position(position),
            facing: Facing(Direction::Down),
            body: BodySize(ENEMY_SIZE),
            speed: Speed(ENEMY_SPEED),
            motion: Motion::Moving,
            health: Health::full(ENEMY_HEALTH),
            hit_flash: HitFlash::default(),
            walk: WalkAnimation::default(),
        }
    }
}

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Monotonic wall-clock seconds since app start, sampled once per frame.
/// Spawn cadence is measured against this, not against accumulated deltas.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameClock(pub f64);

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(pub u32);

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// Frame timestamp of the most recent enemy spawn.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnState {
    pub last_spawn: f64,
}

/// RNG used by the spawner, held as a resource so tests can seed it.
#[derive(Resource)]
pub struct SpawnRng(pub SmallRng);

/// Per-frame movement intent produced by the control system.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MovementIntent {
    /// Unit-ish movement vector. Axis-exclusive on the keyboard path;
    /// normalized (possibly diagonal) on the joystick path.
    pub vector: Vec2,
    /// New facing, when a nonzero intent exists.
    pub facing: Option<Direction>,
    /// Edge-triggered attack request for this frame.
    pub attack_requested: bool,
}
