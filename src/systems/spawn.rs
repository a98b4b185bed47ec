//! Wave spawner: one enemy every fixed interval, just outside a random edge.

use bevy_ecs::system::{Commands, Res, ResMut};
use glam::Vec2;
use rand::Rng;

use crate::constants::{CANVAS_SIZE, SPAWN_INTERVAL, SPAWN_OFFSET_MAX, SPAWN_OFFSET_MIN};
use crate::ruleset::Ruleset;
use crate::systems::components::{FrameClock, SpawnRng, SpawnState};
use crate::systems::components::EnemyBundle;
use crate::systems::stage::GameStage;

/// Picks a point just outside a uniformly random canvas edge.
pub fn random_edge_position(rng: &mut impl Rng) -> Vec2 {
    let offset = rng.random_range(SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX);
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..CANVAS_SIZE.x), -offset),
        1 => Vec2::new(CANVAS_SIZE.x + offset, rng.random_range(0.0..CANVAS_SIZE.y)),
        2 => Vec2::new(rng.random_range(0.0..CANVAS_SIZE.x), CANVAS_SIZE.y + offset),
        _ => Vec2::new(-offset, rng.random_range(0.0..CANVAS_SIZE.y)),
    }
}

pub fn spawn_system(
    stage: Res<GameStage>,
    clock: Res<FrameClock>,
    rules: Res<Ruleset>,
    mut spawn_state: ResMut<SpawnState>,
    mut rng: ResMut<SpawnRng>,
    mut commands: Commands,
) {
    if !stage.is_playing() {
        return;
    }

    // Cadence measured against the frame clock so a slow frame cannot
    // produce a burst of catch-up spawns.
    if clock.0 - spawn_state.last_spawn <= SPAWN_INTERVAL {
        return;
    }

    let position = random_edge_position(&mut rng.0);
    commands.spawn(EnemyBundle::new(position, &rules));
    spawn_state.last_spawn = clock.0;
    tracing::debug!(x = position.x, y = position.y, "Spawned enemy");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_positions_are_outside_the_canvas() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = random_edge_position(&mut rng);
            let outside = p.x < 0.0 || p.y < 0.0 || p.x > CANVAS_SIZE.x || p.y > CANVAS_SIZE.y;
            assert!(outside, "spawn point {p} is inside the canvas");
        }
    }

    #[test]
    fn test_spawn_offset_stays_in_band() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = random_edge_position(&mut rng);
            let overshoot = (-p.x)
                .max(p.x - CANVAS_SIZE.x)
                .max(-p.y)
                .max(p.y - CANVAS_SIZE.y);
            assert!((SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX).contains(&overshoot));
        }
    }

    #[test]
    fn test_all_four_edges_are_used() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut edges = [false; 4];
        for _ in 0..200 {
            let p = random_edge_position(&mut rng);
            if p.y < 0.0 {
                edges[0] = true;
            } else if p.x > CANVAS_SIZE.x {
                edges[1] = true;
            } else if p.y > CANVAS_SIZE.y {
                edges[2] = true;
            } else {
                edges[3] = true;
            }
        }
        assert_eq!(edges, [true; 4]);
    }
}
