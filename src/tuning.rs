//! Data-driven game balance
//!
//! Every hand-tuned constant of the collection game lives here so variants
//! (spawn cadence, motion feel) are configuration rather than code.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Game balance values. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Milliseconds between spawn attempts
    pub spawn_interval_ms: u64,
    /// Maximum uncollected data points at once
    pub max_data_points: usize,
    /// Motion tick period (~60 Hz)
    pub motion_tick_ms: u64,
    /// Distance moved per motion tick per active direction
    pub speed_per_tick: f32,
    /// Capture happens when distance is strictly less than this
    pub capture_radius: f32,
    pub base_score: u64,
    /// Added per combo step already built up at capture time
    pub combo_bonus_per_step: u64,
    /// Combo resets after this much time without a capture
    pub combo_window_ms: u64,
    pub combo_decay_tick_ms: u64,
    pub round_secs: u32,
    /// How long a fact popup stays up (0 disables popups)
    pub fact_display_ms: u64,
    /// Minimum swipe distance in pixels before a touch steers
    pub swipe_threshold_px: f32,
    /// Touch steering is cleared this long after the finger lifts
    pub touch_release_ms: u64,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 3500,
            max_data_points: 8,
            motion_tick_ms: 16,
            speed_per_tick: 0.8,
            capture_radius: 6.0,
            base_score: 10,
            combo_bonus_per_step: 5,
            combo_window_ms: 3000,
            combo_decay_tick_ms: 500,
            round_secs: 60,
            fact_display_ms: 12_000,
            swipe_threshold_px: 30.0,
            touch_release_ms: 100,
        }
    }
}

impl GameTuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Points awarded for a capture made with `combo` captures already chained
    #[inline]
    pub fn capture_score(&self, combo: u32) -> u64 {
        self.base_score + combo as u64 * self.combo_bonus_per_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning = GameTuning::from_json(r#"{ "spawn_interval_ms": 5000, "speed_per_tick": 0.5 }"#)
            .unwrap();
        assert_eq!(tuning.spawn_interval_ms, 5000);
        assert_eq!(tuning.speed_per_tick, 0.5);
        assert_eq!(tuning.max_data_points, 8);
        assert_eq!(tuning.capture_radius, 6.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GameTuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_capture_score() {
        let tuning = GameTuning::default();
        assert_eq!(tuning.capture_score(0), 10);
        assert_eq!(tuning.capture_score(1), 15);
        assert_eq!(tuning.capture_score(4), 30);
    }
}
