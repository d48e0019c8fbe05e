//! Dino Runner - endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Simulation (jump physics, obstacle spawning, collisions, world state)
//! - `session`: Idle/Running/Ended state machine and command surface
//! - `autopilot`: Demo input source for headless runs
//! - `clock`: Frame scheduler and timestep pacing
//! - `persistence`: Key-value store backends
//! - `best_score`: Best-effort best-score bookkeeping
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod best_score;
pub mod clock;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use session::{Session, SessionPhase};
pub use settings::{Settings, Timestep};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Display refresh rate the scheduler paces to by default
    pub const DEFAULT_REFRESH_HZ: u32 = 60;
    /// Maximum substeps per frame in fixed-timestep mode
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.9;
    /// Upward velocity assigned on jump
    pub const JUMP_POWER: f32 = 15.0;
    /// Obstacle scroll speed (percent of world width per tick)
    pub const GAME_SPEED: f32 = 2.0;

    /// World width used to convert percentages to linear units
    pub const DEFAULT_WORLD_WIDTH: f32 = 640.0;
    /// Player horizontal position (percent of world width)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Side length of a scale-1 ground obstacle
    pub const GROUND_OBSTACLE_SIZE: f32 = 12.0;
    /// Width of a scale-1 bird
    pub const BIRD_WIDTH: f32 = 12.0;
    /// Height of a scale-1 bird
    pub const BIRD_HEIGHT: f32 = 8.0;
    /// Bird top edge sits this far above ground, plus its band offset
    pub const BIRD_BASE_ALTITUDE: f32 = 30.0;
    /// Bird band offset range [min, max)
    pub const BIRD_BAND_MIN: u32 = 10;
    pub const BIRD_BAND_MAX: u32 = 30;

    /// Obstacle scale range [min, max)
    pub const SCALE_MIN: f32 = 0.5;
    pub const SCALE_MAX: f32 = 2.0;

    /// Obstacles spawn here (percent of world width)
    pub const SPAWN_EDGE: f32 = 100.0;
    /// Obstacles at or past this position are removed
    pub const TRAILING_EDGE: f32 = -20.0;

    /// Spawn interval at score 0 (ms)
    pub const SPAWN_BASE_MS: f64 = 1500.0;
    /// Interval reduction per score point (ms)
    pub const SPAWN_STEP_MS: f64 = 100.0;
    /// Interval never drops below this (ms)
    pub const SPAWN_FLOOR_MS: f64 = 500.0;
}

/// Convert a position in percent of world width to linear units
#[inline]
pub fn percent_to_linear(percent: f32, world_width: f32) -> f32 {
    percent / 100.0 * world_width
}
