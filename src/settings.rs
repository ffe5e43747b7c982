//! Game settings and debug flags
//!
//! Native builds read an optional JSON file named by `ARENA5_SETTINGS`;
//! wasm builds read LocalStorage. Anything missing falls back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::wave::{Wave, WaveTable, WaveTableError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid wave table: {0}")]
    Waves(#[from] WaveTableError),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Developer switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugFlags {
    /// Master switch; gates the wave-skip key
    pub enabled: bool,
    /// Player takes no damage
    pub invincible: bool,
    /// Outline collision circles
    pub collision_radius: bool,
    pub disable_glow: bool,
    /// One volley per fire-key press instead of continuous fire
    pub disable_autofire: bool,
    pub show_fps: bool,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena side length (logical units)
    pub world_size: f32,
    /// Initial visible window side length
    pub view_size: f32,
    /// Physical render size (pixels)
    pub render_width: f32,
    pub render_height: f32,
    /// Host frame rate
    pub fps: u32,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Replacement wave sequence; `None` plays the built-in one
    pub waves: Option<Vec<Wave>>,
    pub debug: DebugFlags,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            view_size: VIEW_SIZE,
            render_width: RENDER_WIDTH,
            render_height: RENDER_HEIGHT,
            fps: TARGET_FPS,
            seed: None,
            waves: None,
            debug: DebugFlags::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arena5-settings";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        // Smaller arenas leave no room to spawn along the edges
        if self.world_size.is_nan() || self.world_size < VIEW_SIZE_MIN {
            return Err(SettingsError::Invalid {
                field: "world_size",
                reason: format!("must be at least {VIEW_SIZE_MIN}, got {}", self.world_size),
            });
        }
        if !(VIEW_SIZE_MIN..=VIEW_SIZE_MAX).contains(&self.view_size) {
            return Err(SettingsError::Invalid {
                field: "view_size",
                reason: format!(
                    "must be within {VIEW_SIZE_MIN}..={VIEW_SIZE_MAX}, got {}",
                    self.view_size
                ),
            });
        }
        if !(self.render_width > 0.0 && self.render_height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "render_width",
                reason: "render size must be positive".to_string(),
            });
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid {
                field: "fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(waves) = &self.waves {
            WaveTable::new(waves.clone())?;
        }
        Ok(())
    }

    /// Wave sequence for a new play-through
    pub fn wave_table(&self) -> WaveTable {
        let Some(waves) = &self.waves else {
            return WaveTable::default();
        };
        WaveTable::new(waves.clone()).unwrap_or_else(|e| {
            log::warn!("Ignoring configured waves: {e}");
            WaveTable::default()
        })
    }

    /// Milliseconds per host frame
    pub fn frame_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed
            .unwrap_or_else(|| crate::platform::now_ms() as u64)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load settings named by `ARENA5_SETTINGS`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("ARENA5_SETTINGS") else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {path}: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());

        match json.map(|j| Self::from_json(&j)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"seed": 7, "debug": {"invincible": true}}"#).unwrap();
        assert_eq!(s.seed, Some(7));
        assert!(s.debug.invincible);
        assert!(!s.debug.enabled);
        assert_eq!(s.world_size, WORLD_SIZE);
        assert_eq!(s.fps, TARGET_FPS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"view_size": 2000}"#),
            Err(SettingsError::Invalid { field: "view_size", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"fps": 0}"#),
            Err(SettingsError::Invalid { field: "fps", .. })
        ));
        assert!(matches!(
            Settings::from_json("{"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_arena_too_small_to_spawn_in() {
        assert!(matches!(
            Settings::from_json(r#"{"world_size": 20, "seed": 1}"#),
            Err(SettingsError::Invalid { field: "world_size", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"world_size": -5}"#),
            Err(SettingsError::Invalid { field: "world_size", .. })
        ));
        let smallest = Settings::from_json(r#"{"world_size": 500, "view_size": 500}"#).unwrap();
        assert_eq!(smallest.world_size, VIEW_SIZE_MIN);
    }

    #[test]
    fn test_configured_waves_replace_default_table() {
        let s = Settings::from_json(
            r#"{"waves": [
                {"enemy_max": 3, "enemy_weighting": [2, 2], "lifetime": 15},
                {"enemy_max": 6, "enemy_weighting": [0, 4], "lifetime": 0}
            ]}"#,
        )
        .unwrap();
        let table = s.wave_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), &Wave::new(3, &[2, 2], 15));
        assert_eq!(Settings::default().wave_table(), WaveTable::default());
    }

    #[test]
    fn test_rejects_timed_final_wave() {
        let result = Settings::from_json(
            r#"{"waves": [{"enemy_max": 3, "enemy_weighting": [1], "lifetime": 15}]}"#,
        );
        assert!(matches!(
            result,
            Err(SettingsError::Waves(WaveTableError::FinalWaveTimed(15)))
        ));
    }

    #[test]
    fn test_frame_ms() {
        assert_eq!(Settings::default().frame_ms(), 25.0);
    }

    #[test]
    fn test_explicit_seed_wins() {
        let s = Settings {
            seed: Some(123),
            ..Settings::default()
        };
        assert_eq!(s.resolve_seed(), 123);
    }
}
