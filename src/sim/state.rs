//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::timer::Interval;
use crate::catalog::InstrumentId;
use crate::consts::PLAYER_START;
use crate::highscores::HighScore;
use crate::tuning::GameTuning;

/// Screen the game is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Instrument info page (no gameplay state)
    Info,
    /// Active round
    Playing,
    /// Round over, showing results
    Complete,
}

/// A collectible marker tied to one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: u32,
    pub instrument: InstrumentId,
    /// Percentage-space position
    pub pos: Vec2,
    pub collected: bool,
}

/// Fact shown after a capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactPopup {
    pub instrument: InstrumentId,
    pub name: String,
    pub fact: String,
    pub expires_at_ms: u64,
}

/// Per-round scoring state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSession {
    pub score: u64,
    /// Instruments captured, in capture order (duplicates allowed)
    pub collected: Vec<InstrumentId>,
    pub time_left_secs: u32,
    pub combo: u32,
    pub last_capture_ms: Option<u64>,
}

impl RoundSession {
    pub fn new(round_secs: u32) -> Self {
        Self {
            score: 0,
            collected: Vec::new(),
            time_left_secs: round_secs,
            combo: 0,
            last_capture_ms: None,
        }
    }
}

/// Periodic updates, all owned and cancelled by the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    pub motion: Interval,
    pub spawn: Interval,
    pub combo_decay: Interval,
    pub countdown: Interval,
}

impl Timers {
    pub fn new(tuning: &GameTuning) -> Self {
        Self {
            motion: Interval::new(tuning.motion_tick_ms),
            spawn: Interval::new(tuning.spawn_interval_ms),
            combo_decay: Interval::new(tuning.combo_decay_tick_ms),
            countdown: Interval::new(1000),
        }
    }

    pub fn start_all(&mut self, now_ms: u64) {
        self.motion.start(now_ms);
        self.spawn.start(now_ms);
        self.combo_decay.start(now_ms);
        self.countdown.start(now_ms);
    }

    pub fn stop_all(&mut self) {
        self.motion.stop();
        self.spawn.stop();
        self.combo_decay.stop();
        self.countdown.stop();
    }

    pub fn any_running(&self) -> bool {
        self.motion.is_running()
            || self.spawn.is_running()
            || self.combo_decay.is_running()
            || self.countdown.is_running()
    }

    /// Earliest pending firing across all running timers
    pub fn next_due(&self) -> Option<u64> {
        [
            self.motion.next_due(),
            self.spawn.next_due(),
            self.combo_decay.next_due(),
            self.countdown.next_due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

/// Complete game context: phase, round, input, timers and RNG
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: GameTuning,
    pub phase: GamePhase,
    /// Simulation clock (milliseconds since creation)
    pub now_ms: u64,
    pub player: Vec2,
    /// Live data points (sorted by id)
    pub points: Vec<DataPoint>,
    pub round: RoundSession,
    pub fact: Option<FactPopup>,
    pub high_score: HighScore,
    pub input: InputState,
    pub timers: Timers,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game at the menu with the given seed
    pub fn new(seed: u64, tuning: GameTuning) -> Self {
        Self {
            timers: Timers::new(&tuning),
            round: RoundSession::new(tuning.round_secs),
            tuning,
            phase: GamePhase::Menu,
            now_ms: 0,
            player: PLAYER_START,
            points: Vec::new(),
            fact: None,
            high_score: HighScore::new(),
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new data point ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of data points still waiting to be collected
    pub fn live_points(&self) -> usize {
        self.points.iter().filter(|p| !p.collected).count()
    }

    /// Reset everything a new round needs
    pub(crate) fn reset_round(&mut self) {
        self.round = RoundSession::new(self.tuning.round_secs);
        self.player = PLAYER_START;
        self.points.clear();
        self.fact = None;
        self.input.clear();
        self.next_id = 1;
        self.timers = Timers::new(&self.tuning);
        self.timers.start_all(self.now_ms);
    }
}
