//! Demo input source - jumps over whatever is coming
//!
//! Looks at the nearest obstacle still ahead of the player and jumps once it
//! is within a few ticks of reaching the player's box.

use crate::sim::{WorldState, obstacle_box, player_box};
use crate::tuning::Tuning;

/// How many ticks before contact to leave the ground
const LEAD_TICKS: f32 = 6.0;

/// Whether a jump now would carry the player over the next obstacle
pub fn should_jump(world: &WorldState, tuning: &Tuning) -> bool {
    if world.player.airborne {
        return false;
    }
    let player = player_box(&world.player, tuning.world_width);
    let speed = tuning.game_speed / 100.0 * tuning.world_width;

    let nearest_gap = world
        .obstacles
        .iter()
        .map(|o| obstacle_box(o, tuning.world_width).min.x - player.max.x)
        .filter(|gap| *gap > 0.0)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    matches!(nearest_gap, Some(gap) if gap <= speed * LEAD_TICKS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ObstacleKind, StepEvent, TickInput, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Run one obstacle past the autopilot; true if it got by untouched
    fn clears(kind: ObstacleKind, height: f32, scale: f32) -> bool {
        let mut tuning = Tuning::default();
        tuning.spawn_floor_ms = 1e12;
        let mut world = WorldState::default();
        world.running = true;
        world.obstacles.push(Obstacle {
            id: 0,
            x: tuning.spawn_edge,
            kind,
            height,
            scale,
        });

        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..120 {
            if should_jump(&world, &tuning) {
                world.player.try_jump(tuning.jump_power);
            }
            let event = tick(&mut world, &TickInput::default(), &tuning, &mut rng);
            if matches!(event, StepEvent::Collision { .. }) {
                return false;
            }
        }
        world.obstacles.is_empty() && !world.player.airborne
    }

    #[test]
    fn test_clears_large_cactus() {
        assert!(clears(ObstacleKind::Cactus, 0.0, 1.99));
    }

    #[test]
    fn test_clears_small_rock() {
        assert!(clears(ObstacleKind::Rock, 0.0, 0.5));
    }

    #[test]
    fn test_clears_high_bird() {
        assert!(clears(ObstacleKind::Bird, 29.0, 0.5));
    }

    #[test]
    fn test_no_jump_on_empty_track() {
        let world = WorldState::default();
        assert!(!should_jump(&world, &Tuning::default()));
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let mut world = WorldState::default();
        world.obstacles.push(Obstacle {
            id: 0,
            x: 30.0,
            kind: ObstacleKind::Cactus,
            height: 0.0,
            scale: 1.0,
        });
        assert!(!should_jump(&world, &Tuning::default()));
    }
}
