//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Presets map onto [`GameTuning`].

use serde::{Deserialize, Serialize};

use crate::tuning::GameTuning;

/// Sprite movement feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionPreset {
    /// Slower, more precise steering
    Classic,
    #[default]
    Arcade,
}

impl MotionPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionPreset::Classic => "Classic",
            MotionPreset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(MotionPreset::Classic),
            "arcade" => Some(MotionPreset::Arcade),
            _ => None,
        }
    }

    /// Distance per motion tick
    pub fn speed_per_tick(&self) -> f32 {
        match self {
            MotionPreset::Classic => 0.5,
            MotionPreset::Arcade => 0.8,
        }
    }
}

/// How often data points appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpawnCadence {
    Relaxed,
    #[default]
    Standard,
}

impl SpawnCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnCadence::Relaxed => "Relaxed",
            SpawnCadence::Standard => "Standard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" => Some(SpawnCadence::Relaxed),
            "standard" => Some(SpawnCadence::Standard),
            _ => None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        match self {
            SpawnCadence::Relaxed => 5000,
            SpawnCadence::Standard => 3500,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub motion: MotionPreset,
    pub cadence: SpawnCadence,
    /// Show instrument facts after each capture
    pub fact_popups: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            motion: MotionPreset::Arcade,
            cadence: SpawnCadence::Standard,
            fact_popups: true,
        }
    }
}

impl Settings {
    /// Apply these preferences on top of a base tuning
    pub fn apply_to(&self, mut tuning: GameTuning) -> GameTuning {
        tuning.speed_per_tick = self.motion.speed_per_tick();
        tuning.spawn_interval_ms = self.cadence.interval_ms();
        if !self.fact_popups {
            tuning.fact_display_ms = 0;
        }
        tuning
    }

    /// Tuning for these preferences with every other value at its default
    pub fn tuning(&self) -> GameTuning {
        self.apply_to(GameTuning::default())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        let Some(json) = stored else {
            log::info!("No stored settings, using defaults");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {}", e);
                return;
            }
        };
        match storage.set_item(STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:?}", e),
        }
    }

    /// Settings only persist in the browser
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "terra_collector_settings";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_canonical_tuning() {
        assert_eq!(Settings::default().tuning(), GameTuning::default());
    }

    #[test]
    fn test_presets_map_to_tuning() {
        let settings = Settings {
            motion: MotionPreset::Classic,
            cadence: SpawnCadence::Relaxed,
            fact_popups: false,
        };
        let tuning = settings.tuning();
        assert_eq!(tuning.speed_per_tick, 0.5);
        assert_eq!(tuning.spawn_interval_ms, 5000);
        assert_eq!(tuning.fact_display_ms, 0);
        assert_eq!(tuning.capture_radius, 6.0);
    }

    #[test]
    fn test_reenabling_facts_restores_display_time() {
        let mut settings = Settings {
            fact_popups: false,
            ..Settings::default()
        };
        assert_eq!(settings.tuning().fact_display_ms, 0);

        settings.fact_popups = true;
        assert_eq!(settings.tuning().fact_display_ms, 12_000);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(MotionPreset::from_str("CLASSIC"), Some(MotionPreset::Classic));
        assert_eq!(SpawnCadence::from_str(SpawnCadence::Relaxed.as_str()), Some(SpawnCadence::Relaxed));
        assert_eq!(MotionPreset::from_str("warp"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "motion": "Classic" }"#).unwrap();
        assert_eq!(settings.motion, MotionPreset::Classic);
        assert_eq!(settings.cadence, SpawnCadence::Standard);
        assert!(settings.fact_popups);
    }
}
