//! Deterministic simulation module
//!
//! All data-collection gameplay lives here. This module must be pure and
//! deterministic:
//! - Simulated millisecond clock, advanced explicitly
//! - Seeded RNG only
//! - Stable iteration order (by data point ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod input;
pub mod state;
pub mod tick;
pub mod timer;

pub use input::{Direction, InputEvent, InputState};
pub use state::{DataPoint, FactPopup, GamePhase, GameState, RoundSession, Timers};
pub use tick::{
    GameEvent, RoundOutcome, advance, apply_input, open_info, return_to_menu, start_round,
    start_round_with,
};
pub use timer::Interval;
