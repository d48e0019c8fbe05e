//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads, loadable from JSON.
//! Missing fields fall back to the values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_power: f32,
    /// Percent of world width per tick
    pub game_speed: f32,
    pub world_width: f32,
    pub player_x: f32,
    pub spawn_edge: f32,
    pub trailing_edge: f32,
    pub spawn_base_ms: f64,
    pub spawn_step_ms: f64,
    pub spawn_floor_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            game_speed: GAME_SPEED,
            world_width: DEFAULT_WORLD_WIDTH,
            player_x: PLAYER_X,
            spawn_edge: SPAWN_EDGE,
            trailing_edge: TRAILING_EDGE,
            spawn_base_ms: SPAWN_BASE_MS,
            spawn_step_ms: SPAWN_STEP_MS,
            spawn_floor_ms: SPAWN_FLOOR_MS,
        }
    }
}

/// A tuning value outside the range the simulation can run with
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tuning field `{field}` must be {requirement}")]
pub struct InvalidTuning {
    pub field: &'static str,
    pub requirement: &'static str,
}

fn require(
    ok: bool,
    field: &'static str,
    requirement: &'static str,
) -> Result<(), InvalidTuning> {
    if ok {
        Ok(())
    } else {
        Err(InvalidTuning { field, requirement })
    }
}

impl Tuning {
    /// Reject values that would stop jumps from landing, obstacles from
    /// leaving the screen, or the spawn timer from pacing.
    ///
    /// Comparisons are written so NaN fails them.
    pub fn validate(&self) -> Result<(), InvalidTuning> {
        require(self.gravity > 0.0, "gravity", "> 0")?;
        require(self.jump_power > 0.0, "jump_power", "> 0")?;
        require(self.game_speed > 0.0, "game_speed", "> 0")?;
        require(self.world_width > 0.0, "world_width", "> 0")?;
        require(self.spawn_floor_ms >= 0.0, "spawn_floor_ms", ">= 0")?;
        require(
            self.trailing_edge < self.spawn_edge,
            "trailing_edge",
            "< spawn_edge",
        )?;
        Ok(())
    }

    /// Time that must pass between spawns at the given score.
    ///
    /// Shrinks linearly with score and bottoms out at `spawn_floor_ms`.
    pub fn spawn_threshold_ms(&self, score: u64) -> f64 {
        (self.spawn_base_ms - score as f64 * self.spawn_step_ms).max(self.spawn_floor_ms)
    }
}
