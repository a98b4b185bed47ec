//! Named rule presets for the two historical variants of the game.
//!
//! The game shipped twice with diverging combat rules: a keyboard build with
//! burst contact damage, an invulnerability window, and a three-frame attack
//! animation, and a touch build with continuous contact drain, a flat attack
//! range, and a virtual joystick. Neither is authoritative, so both are kept
//! as presets on a single engine rather than picking one silently.

use bevy_ecs::resource::Resource;

use crate::constants::{ATTACK_FRAME_DELAY, ENEMY_ATTACK_COOLDOWN, ENEMY_DAMAGE, INVULNERABILITY_TIME};

/// How an enemy in contact range damages the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactDamage {
    /// Discrete swings on a cooldown; each hit grants the player an
    /// invulnerability window.
    Burst {
        damage: f32,
        cooldown: f32,
        invulnerability: f32,
    },
    /// Continuous drain while in contact; no cooldown, no invulnerability.
    Drain { per_second: f32 },
}

/// How the slash visual derives its progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackAnimation {
    /// Stepped frames advanced on a timer.
    Framed { frames: u8, frame_delay: f32 },
    /// Progress derived directly from the remaining attack cooldown.
    CooldownScaled,
}

/// The active rule preset, inserted as a resource at startup.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Ruleset {
    pub attack_range: f32,
    /// Extra reach added on top of `attack_range` when testing distance.
    pub attack_tolerance: f32,
    /// Slack on the relevant axis for the "in front" half-plane test.
    pub front_slack: f32,
    /// Enemies closer than this stop pursuing and attack instead.
    pub engage_distance: f32,
    pub contact_damage: ContactDamage,
    pub attack_animation: AttackAnimation,
    /// Whether the virtual joystick and attack button are active.
    pub touch_controls: bool,
}

impl Ruleset {
    /// The desktop keyboard variant.
    pub fn keyboard() -> Self {
        Self {
            attack_range: 70.0,
            attack_tolerance: 30.0,
            front_slack: 30.0,
            engage_distance: 30.0,
            contact_damage: ContactDamage::Burst {
                damage: ENEMY_DAMAGE,
                cooldown: ENEMY_ATTACK_COOLDOWN,
                invulnerability: INVULNERABILITY_TIME,
            },
            attack_animation: AttackAnimation::Framed {
                frames: 3,
                frame_delay: ATTACK_FRAME_DELAY,
            },
            touch_controls: false,
        }
    }

    /// The mobile touch variant.
    pub fn touch() -> Self {
        Self {
            attack_range: 100.0,
            attack_tolerance: 0.0,
            front_slack: 30.0,
            engage_distance: 10.0,
            contact_damage: ContactDamage::Drain {
                per_second: ENEMY_DAMAGE,
            },
            attack_animation: AttackAnimation::CooldownScaled,
            touch_controls: true,
        }
    }

    /// Selects a preset from the `QUESTFALL_RULESET` environment variable
    /// (`keyboard` or `touch`), defaulting to `keyboard`.
    pub fn from_env() -> Self {
        match std::env::var("QUESTFALL_RULESET").as_deref() {
            Ok("touch") => Self::touch(),
            Ok("keyboard") | Err(_) => Self::keyboard(),
            Ok(other) => {
                tracing::warn!(preset = other, "Unknown ruleset preset, using keyboard");
                Self::keyboard()
            }
        }
    }

    /// Total distance within which a slash can connect.
    pub fn reach(&self) -> f32 {
        self.attack_range + self.attack_tolerance
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::keyboard()
    }
}
