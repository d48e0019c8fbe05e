//! Per-tick world advance
//!
//! One pass of the stepper, in order:
//! 1. jump physics
//! 2. conditional spawn
//! 3. scroll and prune obstacles
//! 4. score
//! 5. collision check (nothing else changes on a hit)

use rand::Rng;

use super::collision::detect;
use super::state::WorldState;
use crate::tuning::Tuning;

/// Inputs for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Time represented by this tick (ms), feeds the spawn timer
    pub elapsed_ms: f64,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// World is not running; nothing changed
    Idle,
    /// World advanced with no collision
    Advanced,
    /// Player hit an obstacle; the round is over
    Collision { obstacle_id: u32 },
}

/// Advance the world by one tick
pub fn tick<R: Rng + ?Sized>(
    state: &mut WorldState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) -> StepEvent {
    if !state.running {
        return StepEvent::Idle;
    }

    state.ticks += 1;

    state.player.integrate(tuning.gravity);

    if let Some(obstacle) = state
        .spawner
        .advance(input.elapsed_ms, state.score, tuning, rng)
    {
        state.obstacles.push(obstacle);
    }

    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.game_speed;
    }
    let trailing_edge = tuning.trailing_edge;
    state.obstacles.retain(|o| o.x > trailing_edge);

    state.score += 1;

    let result = detect(&state.player, &state.obstacles, tuning.world_width);
    match result.obstacle_id {
        Some(obstacle_id) => StepEvent::Collision { obstacle_id },
        None => StepEvent::Advanced,
    }
}
