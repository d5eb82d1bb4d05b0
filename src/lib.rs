//! Terra Collector - Terra satellite educational games
//!
//! Core modules:
//! - `sim`: Deterministic data-collection mini-game (timers, motion, captures)
//! - `catalog`: The five Terra instruments used as collectible flavor
//! - `city`: City builder environmental scoring with remote-prediction fallback
//! - `quiz`: Trivia flash-card deck fed by the quiz proxy
//! - `weather`: Hourly climate series aggregation
//! - `proxy`: Chat and quiz proxy request/response handling
//! - `platform`: Browser bindings
//! - `tuning`: Data-driven game balance

pub mod catalog;
pub mod city;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod proxy;
pub mod quiz;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod weather;

pub use catalog::{Instrument, InstrumentId};
pub use error::{Error, Result};
pub use highscores::HighScore;
pub use settings::{MotionPreset, Settings, SpawnCadence};
pub use tuning::GameTuning;

use glam::Vec2;

/// Play-field constants (percentage space, y grows downward)
pub mod consts {
    use glam::Vec2;

    /// Sprite bounds; the top is offset to leave room for the HUD
    pub const PLAYER_MIN: Vec2 = Vec2::new(3.0, 3.0);
    pub const PLAYER_MAX: Vec2 = Vec2::new(97.0, 87.0);

    /// Where the sprite sits when a round starts
    pub const PLAYER_START: Vec2 = Vec2::new(50.0, 50.0);

    /// Spawn area keeps data points away from the HUD and edges
    pub const SPAWN_MIN: Vec2 = Vec2::new(10.0, 25.0);
    pub const SPAWN_MAX: Vec2 = Vec2::new(90.0, 85.0);
}

/// Clamp a position to the sprite bounds
#[inline]
pub fn clamp_to_field(pos: Vec2) -> Vec2 {
    pos.clamp(consts::PLAYER_MIN, consts::PLAYER_MAX)
}

/// Replace NaN/infinite values with a fallback
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
