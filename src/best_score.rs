//! Best score tracking
//!
//! Persisted through a [`ScoreStore`] under a fixed key. Storage is
//! best-effort: failures are logged and never reach the simulation.

use crate::persistence::{ScoreStore, StoreError};

/// Store key for the best score
pub const STORAGE_KEY: &str = "dino_runner_best_score";

/// Best score across sessions
pub struct BestScore {
    value: u64,
    store: Box<dyn ScoreStore>,
}

impl BestScore {
    /// Load the stored best score, defaulting to 0 if absent or unreadable
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let value = match read(store.as_ref()) {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                value
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to load best score: {}", e);
                0
            }
        };
        Self { value, store }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Fold a finished round's score in. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        match self.store.set(STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", score),
            Err(e) => log::warn!("Failed to save best score: {}", e),
        }
        true
    }
}

fn read(store: &dyn ScoreStore) -> Result<Option<u64>, StoreError> {
    let Some(raw) = store.get(STORAGE_KEY)? else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| StoreError::Corrupt {
            key: STORAGE_KEY.to_string(),
            value: raw,
        })
}
