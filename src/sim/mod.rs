//! Runner simulation module
//!
//! All gameplay logic lives here. This module must stay free of timing and
//! platform concerns:
//! - Elapsed time arrives through `TickInput`
//! - Randomness is injected (seeded in sessions and tests)
//! - Obstacles iterate in spawn order
//! - No rendering or storage dependencies

pub mod aabb;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{CollisionResult, detect, obstacle_box, player_box};
pub use spawn::{ObstacleGenerator, classify};
pub use state::{Obstacle, ObstacleKind, Player, SessionPhase, WorldSnapshot, WorldState};
pub use tick::{StepEvent, TickInput, tick};
