//! Platform abstraction layer
//!
//! Browser bindings for the collection game:
//! - Frame-time driven clock
//! - Keyboard/touch event forwarding
//! - HUD state getters
//! - Settings persistence (LocalStorage)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Longest frame gap fed to the simulation (a backgrounded tab resumes
/// without fast-forwarding through the round)
pub const MAX_FRAME_MS: f64 = 100.0;

/// Milliseconds to advance for a frame, given the previous frame time
pub fn frame_delta_ms(last_time: Option<f64>, time: f64) -> u64 {
    match last_time {
        Some(last) if time > last => (time - last).min(MAX_FRAME_MS).round() as u64,
        _ => 0,
    }
}
