// Configuration management for Chromatone

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sequencer::Thresholds;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grid width the source image is resized to
    #[serde(default = "default_grid_size")]
    pub grid_width: u32,

    /// Grid height the source image is resized to
    #[serde(default = "default_grid_size")]
    pub grid_height: u32,

    /// Minimum alpha (0-255) for a pixel to produce a sample.
    /// Anything below is treated as transparent and skipped.
    #[serde(default = "default_min_alpha")]
    pub min_alpha: u8,

    /// Output tempo in beats per minute
    #[serde(default = "default_tempo_bpm")]
    pub tempo_bpm: u32,

    /// Per-channel HSV distance under which consecutive samples merge
    #[serde(default)]
    pub similarity: Thresholds,

    /// Beats assigned to one sample before merging (0.5 = eighth note)
    #[serde(default = "default_step_beats")]
    pub step_beats: f32,

    /// Track name written into the MIDI file
    #[serde(default = "default_track_name")]
    pub track_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: default_grid_size(),
            grid_height: default_grid_size(),
            min_alpha: default_min_alpha(),
            tempo_bpm: default_tempo_bpm(),
            similarity: Thresholds::default(),
            step_beats: default_step_beats(),
            track_name: default_track_name(),
        }
    }
}

impl Config {
    /// Load config from disk or return default
    pub fn load_or_default() -> Self {
        let Some(config_path) = config_path() else {
            return Self::default();
        };

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read config file: {}", e);
                }
            }
        }

        Self::default()
    }

    /// Save config to disk, returning the path written
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let config_path =
            config_path().ok_or_else(|| anyhow::anyhow!("No config directory on this platform"))?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(config_path)
    }
}

/// Get the config file path, if the platform has a config directory
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chromatone").join("config.toml"))
}

/// Default grid edge length (for serde)
fn default_grid_size() -> u32 {
    128
}

/// Default opacity threshold: 50% of full alpha (for serde)
fn default_min_alpha() -> u8 {
    128
}

/// Default tempo (for serde)
fn default_tempo_bpm() -> u32 {
    120
}

/// Default per-sample duration: one eighth note (for serde)
fn default_step_beats() -> f32 {
    0.5
}

/// Default MIDI track name (for serde)
fn default_track_name() -> String {
    "Image Colors".to_string()
}
