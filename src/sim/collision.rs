//! Collision detection between the player and live obstacles
//!
//! Positions are converted from percent-of-width to linear units against the
//! world width, then compared as axis-aligned boxes. Any overlap is a hit.

use super::aabb::Aabb;
use super::state::{Obstacle, Player};
use crate::consts::*;
use crate::percent_to_linear;

/// Result of a collision scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether any obstacle overlaps the player
    pub hit: bool,
    /// First overlapping obstacle in active-set order
    pub obstacle_id: Option<u32>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            obstacle_id: None,
        }
    }

    pub fn hit(obstacle_id: u32) -> Self {
        Self {
            hit: true,
            obstacle_id: Some(obstacle_id),
        }
    }
}

/// Bounding box of the player
pub fn player_box(player: &Player, world_width: f32) -> Aabb {
    Aabb::new(
        percent_to_linear(player.x, world_width),
        player.y,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    )
}

/// Bounding box of an obstacle, sized by kind and scale
pub fn obstacle_box(obstacle: &Obstacle, world_width: f32) -> Aabb {
    let x = percent_to_linear(obstacle.x, world_width);
    if obstacle.kind.is_airborne() {
        // Birds hang down from their band's top edge
        let width = BIRD_WIDTH * obstacle.scale;
        let height = BIRD_HEIGHT * obstacle.scale;
        let top = BIRD_BASE_ALTITUDE + obstacle.height;
        Aabb::new(x, top - height, width, height)
    } else {
        let size = GROUND_OBSTACLE_SIZE * obstacle.scale;
        Aabb::new(x, 0.0, size, size)
    }
}

/// Scan obstacles in order and report the first one overlapping the player
pub fn detect(player: &Player, obstacles: &[Obstacle], world_width: f32) -> CollisionResult {
    let player_aabb = player_box(player, world_width);
    obstacles
        .iter()
        .find(|o| player_aabb.overlaps(&obstacle_box(o, world_width)))
        .map(|o| CollisionResult::hit(o.id))
        .unwrap_or_else(CollisionResult::miss)
}
