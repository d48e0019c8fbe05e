//! World state and core simulation types
//!
//! Everything one round of the runner needs lives in [`WorldState`]; the
//! session rebuilds it on every start.

use serde::{Deserialize, Serialize};

use super::spawn::ObstacleGenerator;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Clock armed, world advancing
    Running,
    /// Collision happened; world frozen until the next start
    Ended,
}

/// The jumping player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position (percent of world width, fixed)
    pub x: f32,
    /// Height above ground (>= 0)
    pub y: f32,
    /// Vertical velocity (positive is up)
    pub vy: f32,
    /// A jump is in flight
    pub airborne: bool,
}

impl Player {
    /// A grounded player at the given horizontal position
    pub fn grounded(x: f32) -> Self {
        Self {
            x,
            y: 0.0,
            vy: 0.0,
            airborne: false,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::grounded(PLAYER_X)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground obstacle, most common
    Cactus,
    /// Ground obstacle
    Rock,
    /// Airborne obstacle flying in a band above the ground
    Bird,
}

impl ObstacleKind {
    pub fn is_airborne(&self) -> bool {
        matches!(self, ObstacleKind::Bird)
    }
}

/// An obstacle scrolling toward the trailing edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Horizontal position (percent of world width)
    pub x: f32,
    pub kind: ObstacleKind,
    /// Band offset above the bird base altitude (0 for ground kinds)
    pub height: f32,
    /// Size multiplier in [0.5, 2.0)
    pub scale: f32,
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub running: bool,
    /// Ticks advanced this round
    pub ticks: u64,
    /// Spawn timing and id allocation
    pub spawner: ObstacleGenerator,
}

impl WorldState {
    /// An empty, not-yet-running world
    pub fn new(player_x: f32) -> Self {
        Self {
            player: Player::grounded(player_x),
            obstacles: Vec::new(),
            score: 0,
            running: false,
            ticks: 0,
            spawner: ObstacleGenerator::default(),
        }
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(PLAYER_X)
    }
}

/// Read-only view handed to presentation each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: SessionPhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub running: bool,
    pub best_score: u64,
}

impl WorldSnapshot {
    pub fn capture(world: &WorldState, phase: SessionPhase, best_score: u64) -> Self {
        Self {
            phase,
            player: world.player,
            obstacles: world.obstacles.clone(),
            score: world.score,
            running: world.running,
            best_score,
        }
    }
}
