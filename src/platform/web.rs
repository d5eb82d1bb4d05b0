//! wasm-bindgen surface used by the web page
//!
//! The page owns the DOM and the animation frame loop; it forwards events
//! here and reads HUD values back.

use wasm_bindgen::prelude::*;

use super::frame_delta_ms;
use crate::settings::{MotionPreset, Settings, SpawnCadence};
use crate::sim::{
    Direction, GameEvent, GamePhase, GameState, InputEvent, advance, apply_input, open_info,
    return_to_menu, start_round_with,
};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Terra Collector starting...");
}

fn to_js(e: crate::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance handed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    settings: Settings,
    last_time: Option<f64>,
    /// Set when the most recent round beat the high score
    new_high_score: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::new(seed, settings.tuning()),
            settings,
            last_time: None,
            new_high_score: false,
        }
    }

    /// Start a round, picking up any settings changed since the last one
    pub fn start(&mut self) -> Result<(), JsValue> {
        start_round_with(&mut self.state, self.settings.tuning()).map_err(to_js)?;
        self.new_high_score = false;
        Ok(())
    }

    pub fn menu(&mut self) -> Result<(), JsValue> {
        return_to_menu(&mut self.state).map_err(to_js)
    }

    pub fn info(&mut self) -> Result<(), JsValue> {
        open_info(&mut self.state).map_err(to_js)
    }

    /// `KeyboardEvent.key` of a keydown. Returns true if the key steers.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.key_edge(key, InputEvent::KeyDown)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.key_edge(key, InputEvent::KeyUp)
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        apply_input(&mut self.state, InputEvent::TouchStart { x, y });
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        apply_input(&mut self.state, InputEvent::TouchMove { x, y });
    }

    pub fn touch_end(&mut self) {
        apply_input(&mut self.state, InputEvent::TouchEnd);
    }

    /// Advance to the animation frame timestamp (`requestAnimationFrame` time)
    pub fn frame(&mut self, time: f64) {
        let dt = frame_delta_ms(self.last_time, time);
        self.last_time = Some(time);

        for event in advance(&mut self.state, dt) {
            if let GameEvent::RoundComplete(outcome) = event {
                self.new_high_score = outcome.new_high_score;
            }
        }
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            GamePhase::Menu => "menu",
            GamePhase::Info => "info",
            GamePhase::Playing => "playing",
            GamePhase::Complete => "complete",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.state.round.score as f64
    }

    pub fn time_left(&self) -> u32 {
        self.state.round.time_left_secs
    }

    pub fn combo(&self) -> u32 {
        self.state.round.combo
    }

    pub fn high_score(&self) -> f64 {
        self.state.high_score.best() as f64
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn player_x(&self) -> f32 {
        self.state.player.x
    }

    pub fn player_y(&self) -> f32 {
        self.state.player.y
    }

    /// Live data points as JSON (`[{ id, instrument, pos: [x, y], collected }]`)
    pub fn points_json(&self) -> String {
        serde_json::to_string(&self.state.points).unwrap_or_else(|_| "[]".to_string())
    }

    /// Instruments collected this round as JSON
    pub fn collected_json(&self) -> String {
        serde_json::to_string(&self.state.round.collected).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current fact popup as JSON, or `null`
    pub fn fact_json(&self) -> String {
        serde_json::to_string(&self.state.fact).unwrap_or_else(|_| "null".to_string())
    }

    /// Change the motion preset; takes effect when the next round starts
    pub fn set_motion(&mut self, preset: &str) -> bool {
        let Some(motion) = MotionPreset::from_str(preset) else {
            return false;
        };
        self.settings.motion = motion;
        self.settings.save();
        true
    }

    /// Change the spawn cadence; takes effect when the next round starts
    pub fn set_cadence(&mut self, cadence: &str) -> bool {
        let Some(cadence) = SpawnCadence::from_str(cadence) else {
            return false;
        };
        self.settings.cadence = cadence;
        self.settings.save();
        true
    }

    pub fn set_fact_popups(&mut self, enabled: bool) {
        self.settings.fact_popups = enabled;
        self.settings.save();
    }
}

impl WebGame {
    fn key_edge(&mut self, key: &str, edge: fn(Direction) -> InputEvent) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                apply_input(&mut self.state, edge(dir));
                true
            }
            None => false,
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
