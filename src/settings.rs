//! Host settings and preferences
//!
//! Read once at startup from an optional JSON config block in the page (or a
//! file for the native runner). Nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::{FRUIT_COUNT, MAX_FRUIT_COUNT};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fruit grown per reset
    pub fruit_count: usize,
    /// Fixed RNG seed (random per page load when absent)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Leaf bursts on tap
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    /// Physics and layout constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fruit_count: FRUIT_COUNT,
            seed: None,
            particles: true,
            master_volume: 0.8,
            muted: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Config element id (used only in wasm32)
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "fruit-tree-config";

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fruit_count > MAX_FRUIT_COUNT {
            return Err(ConfigError::invalid(
                "fruit_count",
                format!("must be at most {}", MAX_FRUIT_COUNT),
            ));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::invalid("master_volume", "must be in [0, 1]"));
        }
        self.tuning.validate()
    }

    /// Effective playback volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Load settings from the page's config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                settings
            }
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from an optional file path, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }
}
