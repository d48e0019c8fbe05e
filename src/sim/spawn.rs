//! Procedural obstacle generation
//!
//! Spawns at most one obstacle per tick once enough time has passed since the
//! previous spawn. The required gap shrinks as the score grows.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Draws above this become birds
const BIRD_CUTOFF: f64 = 0.8;
/// Draws above this (and not birds) become rocks
const ROCK_CUTOFF: f64 = 0.6;

/// Map a uniform draw in [0, 1) to an obstacle kind (60% cactus, 20% rock, 20% bird)
pub fn classify(r: f64) -> ObstacleKind {
    if r > BIRD_CUTOFF {
        ObstacleKind::Bird
    } else if r > ROCK_CUTOFF {
        ObstacleKind::Rock
    } else {
        ObstacleKind::Cactus
    }
}

/// Per-round spawn timer and id allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleGenerator {
    /// Next obstacle id (never reused within a round)
    next_id: u32,
    /// Time accumulated since the last spawn (or round start)
    since_last_spawn_ms: f64,
}

impl ObstacleGenerator {
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn since_last_spawn_ms(&self) -> f64 {
        self.since_last_spawn_ms
    }

    /// Advance the spawn timer by `elapsed_ms` and spawn if the threshold for
    /// `score` has been exceeded.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: f64,
        score: u64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Obstacle> {
        self.since_last_spawn_ms += elapsed_ms;
        if self.since_last_spawn_ms <= tuning.spawn_threshold_ms(score) {
            return None;
        }
        self.since_last_spawn_ms = 0.0;
        Some(self.spawn(tuning.spawn_edge, rng))
    }

    /// Roll a new obstacle at `x` with a fresh id
    pub fn spawn<R: Rng + ?Sized>(&mut self, x: f32, rng: &mut R) -> Obstacle {
        let kind = classify(rng.random::<f64>());
        let height = if kind.is_airborne() {
            rng.random_range(BIRD_BAND_MIN..BIRD_BAND_MAX) as f32
        } else {
            0.0
        };
        let scale = rng.random_range(SCALE_MIN..SCALE_MAX);

        let id = self.next_id;
        self.next_id += 1;

        log::debug!("Spawned {:?} #{} (scale {:.2}, height {})", kind, id, scale, height);
        Obstacle {
            id,
            x,
            kind,
            height,
            scale,
        }
    }
}
