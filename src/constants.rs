//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The logical size of the canvas, in pixels. The window scales this
/// proportionally, preserving the 4:3 aspect ratio.
pub const CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);

pub const PLAYER_SIZE: f32 = 64.0;
pub const PLAYER_SPEED: f32 = 180.0;
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

pub const ENEMY_SIZE: f32 = 56.0;
pub const ENEMY_SPEED: f32 = 60.0;
pub const ENEMY_HEALTH: f32 = 30.0;
pub const ENEMY_DAMAGE: f32 = 10.0;
pub const ENEMY_ATTACK_COOLDOWN: f32 = 1.0;

pub const ATTACK_DURATION: f32 = 0.3;
pub const ATTACK_DAMAGE: f32 = 50.0;
/// Time per frame of the three-frame attack animation.
pub const ATTACK_FRAME_DELAY: f32 = 0.1;
pub const KILL_SCORE: u32 = 100;

pub const INVULNERABILITY_TIME: f32 = 1.0;
/// Sub-interval of the invulnerability flicker; the sprite is hidden for the
/// second half of each interval.
pub const FLICKER_INTERVAL: f32 = 0.1;
pub const HIT_FLASH_TIME: f32 = 0.1;

/// Time between the two walk-cycle poses.
pub const WALK_FRAME_DELAY: f32 = 0.2;
pub const TORCH_FRAME_DELAY: f32 = 0.15;

/// Wall-clock time between enemy spawns, measured on the frame clock rather
/// than accumulated deltas.
pub const SPAWN_INTERVAL: f64 = 2.0;
/// Spawned enemies start this far outside the visible bounds.
pub const SPAWN_OFFSET_MIN: f32 = 20.0;
pub const SPAWN_OFFSET_MAX: f32 = 30.0;

/// The intro crawl auto-skips after this long.
pub const INTRO_DURATION: f32 = 8.0;
/// Remaining intro time after a manual skip (the fade-out).
pub const INTRO_FADE: f32 = 1.0;

pub const SLASH_DISTANCE: f32 = 20.0;
pub const SLASH_RADIUS: f32 = 50.0;
/// Half of the angular sweep of the slash arc, in degrees.
pub const SLASH_HALF_SWEEP: f32 = 61.0;

pub const JOYSTICK_DEADZONE: f32 = 10.0;
/// Maximum visual deflection of the on-screen stick. Movement is derived from
/// the unclamped displacement.
pub const JOYSTICK_RADIUS: f32 = 40.0;
pub const ATTACK_BUTTON_CENTER: Vec2 = Vec2::new(CANVAS_SIZE.x - 80.0, CANVAS_SIZE.y - 80.0);
pub const ATTACK_BUTTON_RADIUS: f32 = 48.0;
