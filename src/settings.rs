//! Runtime settings
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_REFRESH_HZ;
use crate::tuning::{InvalidTuning, Tuning};

/// How frame time maps onto simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestep {
    /// One tick per displayed frame; feel depends on the refresh rate
    #[default]
    PerFrame,
    /// Ticks at a fixed rate regardless of refresh rate
    Fixed { hz: u32 },
}

/// Errors from explicit settings loads
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] InvalidTuning),
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display refresh rate the scheduler paces frames to
    pub refresh_hz: u32,
    pub timestep: Timestep,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Where the best score is kept; in-memory when absent
    pub best_score_path: Option<PathBuf>,
    /// Rounds the headless runner plays before exiting
    pub rounds: u32,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_hz: DEFAULT_REFRESH_HZ,
            timestep: Timestep::PerFrame,
            seed: None,
            best_score_path: None,
            rounds: 3,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
