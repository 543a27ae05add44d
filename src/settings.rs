//! Game settings and preferences
//!
//! Persisted as JSON next to the save files. Physics constants are not
//! configurable; they live in `consts`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_HZ;
use crate::error::PersistenceError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Storage ===
    /// Single save slot
    pub save_path: PathBuf,
    /// High score ledger
    pub highscores_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Loop ===
    /// Driver frame rate
    pub tick_rate_hz: u32,
    /// Fixed RNG seed for ball serves (clock-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("game_save.dat"),
            highscores_path: PathBuf::from("highscores.txt"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn read(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path).map_err(|e| PersistenceError::from_io(path, e))?;
        serde_json::from_str(&json).map_err(|e| PersistenceError::malformed(e.line(), e.to_string()))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(PersistenceError::Missing(_)) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid settings file {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::malformed(0, e.to_string()))
            .and_then(|json| fs::write(path, json).map_err(|e| PersistenceError::from_io(path, e)));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
