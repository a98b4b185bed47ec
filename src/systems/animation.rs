//! Frame-stepped animations that are pure timer bookkeeping.

use bevy_ecs::system::{Query, Res};

use crate::constants::{HIT_FLASH_TIME, WALK_FRAME_DELAY};
use crate::systems::components::{DeltaTime, HitFlash, Motion, WalkAnimation};
use crate::systems::stage::GameStage;

/// Advances the two-pose walk cycle of anything moving.
pub fn walk_animation_system(
    stage: Res<GameStage>,
    time: Res<DeltaTime>,
    mut walkers: Query<(&Motion, &mut WalkAnimation)>,
) {
    if !stage.is_playing() {
        return;
    }

    for (motion, mut walk) in walkers.iter_mut() {
        match motion {
            Motion::Moving => {
                walk.timer += time.0;
                if walk.timer >= WALK_FRAME_DELAY {
                    walk.timer = 0.0;
                    walk.frame ^= 1;
                }
            }
            Motion::Idle => {
                walk.frame = 0;
                walk.timer = 0.0;
            }
        }
    }
}

/// Decays the white damage flash on recently hit enemies.
pub fn hit_flash_system(stage: Res<GameStage>, time: Res<DeltaTime>, mut flashes: Query<&mut HitFlash>) {
    if !stage.is_playing() {
        return;
    }

    for mut flash in flashes.iter_mut() {
        if flash.remaining > 0.0 {
            flash.remaining = (flash.remaining - time.0).max(0.0);
            debug_assert!(flash.remaining <= HIT_FLASH_TIME);
        }
    }
}
