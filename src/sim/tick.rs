//! Timer-driven simulation
//!
//! `advance` moves the clock forward and fires every interval that comes
//! due, in timestamp order. Intervals due at the same instant fire in the
//! fixed order motion, spawn, combo decay, countdown.

use glam::Vec2;
use rand::Rng;

use super::input::InputEvent;
use super::state::{DataPoint, FactPopup, GamePhase, GameState};
use crate::catalog::InstrumentId;
use crate::clamp_to_field;
use crate::consts::{SPAWN_MAX, SPAWN_MIN};
use crate::error::{Error, Result};
use crate::tuning::GameTuning;

/// Summary of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub score: u64,
    pub captures: usize,
    pub new_high_score: bool,
}

/// Things that happened during an `advance` call (for audio/HUD feedback)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, instrument: InstrumentId },
    Captured { id: u32, instrument: InstrumentId, points: u64, combo: u32 },
    ComboReset,
    RoundComplete(RoundOutcome),
}

/// Start a round from the menu, or play again from the results screen
pub fn start_round(state: &mut GameState) -> Result<()> {
    match state.phase {
        GamePhase::Menu | GamePhase::Complete => {
            state.reset_round();
            state.phase = GamePhase::Playing;
            log::info!(
                "Round started ({}s, spawn every {}ms)",
                state.round.time_left_secs,
                state.tuning.spawn_interval_ms
            );
            Ok(())
        }
        phase => Err(reject("start a round", phase)),
    }
}

/// Start a round with new tuning. A rejected start leaves the old tuning.
pub fn start_round_with(state: &mut GameState, tuning: GameTuning) -> Result<()> {
    match state.phase {
        GamePhase::Menu | GamePhase::Complete => {
            state.tuning = tuning;
            start_round(state)
        }
        phase => Err(reject("start a round", phase)),
    }
}

/// Leave the results screen for the menu
pub fn return_to_menu(state: &mut GameState) -> Result<()> {
    match state.phase {
        GamePhase::Complete | GamePhase::Info => {
            state.phase = GamePhase::Menu;
            Ok(())
        }
        phase => Err(reject("return to the menu", phase)),
    }
}

/// Show the instrument info page
pub fn open_info(state: &mut GameState) -> Result<()> {
    match state.phase {
        GamePhase::Menu => {
            state.phase = GamePhase::Info;
            Ok(())
        }
        phase => Err(reject("open the info page", phase)),
    }
}

fn reject(action: &'static str, phase: GamePhase) -> Error {
    log::warn!("Rejected transition: {} while {:?}", action, phase);
    Error::InvalidTransition { action, phase }
}

/// Feed an input event into the current round. Ignored outside `Playing`.
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.input.apply(
        event,
        state.now_ms,
        state.tuning.swipe_threshold_px,
        state.tuning.touch_release_ms,
    );
}

/// Advance the simulation clock by `dt_ms`, firing due timers
pub fn advance(state: &mut GameState, dt_ms: u64) -> Vec<GameEvent> {
    let target = state.now_ms.saturating_add(dt_ms);
    let mut events = Vec::new();

    while let Some(due) = state.timers.next_due() {
        if due > target {
            break;
        }
        state.now_ms = due;
        fire_due_timers(state, &mut events);
    }

    state.now_ms = target;
    expire_fact(state);
    events
}

fn fire_due_timers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.now_ms;

    if state.timers.motion.fire_if_due(now) {
        motion_tick(state);
        capture_pass(state, events);
    }
    if state.timers.spawn.fire_if_due(now) {
        spawn_tick(state, events);
    }
    if state.timers.combo_decay.fire_if_due(now) {
        combo_decay_tick(state, events);
    }
    if state.timers.countdown.fire_if_due(now) {
        countdown_tick(state, events);
    }
}

/// Integrate the sprite one step from the held directions
fn motion_tick(state: &mut GameState) {
    state.input.expire_touch(state.now_ms);
    let step = state.input.movement() * state.tuning.speed_per_tick;
    state.player = clamp_to_field(state.player + step);
}

/// Spawn one data point if below capacity
fn spawn_tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.live_points() >= state.tuning.max_data_points {
        return;
    }

    let instrument = InstrumentId::ALL[state.rng.random_range(0..InstrumentId::ALL.len())];
    let pos = Vec2::new(
        state.rng.random_range(SPAWN_MIN.x..=SPAWN_MAX.x),
        state.rng.random_range(SPAWN_MIN.y..=SPAWN_MAX.y),
    );
    let id = state.next_entity_id();
    state.points.push(DataPoint {
        id,
        instrument,
        pos,
        collected: false,
    });

    log::debug!("Spawned {:?} #{} at ({:.1}, {:.1})", instrument, id, pos.x, pos.y);
    events.push(GameEvent::Spawned { id, instrument });
}

/// Capture every live point within the radius, each exactly once
fn capture_pass(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player;
    let radius = state.tuning.capture_radius;

    for i in 0..state.points.len() {
        let point = &state.points[i];
        if point.collected || player.distance(point.pos) >= radius {
            continue;
        }
        let (id, instrument) = (point.id, point.instrument);
        state.points[i].collected = true;
        record_capture(state, id, instrument, events);
    }

    state.points.retain(|p| !p.collected);
}

fn record_capture(
    state: &mut GameState,
    id: u32,
    instrument: InstrumentId,
    events: &mut Vec<GameEvent>,
) {
    let now = state.now_ms;
    let window = state.tuning.combo_window_ms;

    // The decay tick runs on its own phase; check the window here too so
    // the bonus never depends on where that tick happened to land.
    if combo_expired(state.round.last_capture_ms, now, window) {
        state.round.combo = 0;
    }

    let points = state.tuning.capture_score(state.round.combo);
    let combo = state.round.combo;
    state.round.score += points;
    state.round.collected.push(instrument);
    state.round.combo += 1;
    state.round.last_capture_ms = Some(now);

    log::debug!("Captured {:?} #{} for {} (combo {})", instrument, id, points, combo);
    events.push(GameEvent::Captured {
        id,
        instrument,
        points,
        combo,
    });

    if state.tuning.fact_display_ms > 0 {
        let info = instrument.info();
        let fact = info.facts[state.rng.random_range(0..info.facts.len())];
        state.fact = Some(FactPopup {
            instrument,
            name: info.name.to_string(),
            fact: fact.to_string(),
            expires_at_ms: now.saturating_add(state.tuning.fact_display_ms),
        });
    }
}

fn combo_expired(last_capture_ms: Option<u64>, now_ms: u64, window_ms: u64) -> bool {
    last_capture_ms.is_some_and(|last| now_ms.saturating_sub(last) > window_ms)
}

fn combo_decay_tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.round.combo > 0
        && combo_expired(
            state.round.last_capture_ms,
            state.now_ms,
            state.tuning.combo_window_ms,
        )
    {
        state.round.combo = 0;
        events.push(GameEvent::ComboReset);
    }
}

fn countdown_tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.round.time_left_secs = state.round.time_left_secs.saturating_sub(1);
    if state.round.time_left_secs == 0 {
        events.push(GameEvent::RoundComplete(finish_round(state)));
    }
}

/// End the round: stop timers, record the high score
fn finish_round(state: &mut GameState) -> RoundOutcome {
    state.timers.stop_all();
    state.phase = GamePhase::Complete;

    let score = state.round.score;
    let new_high_score = state.high_score.record(score);
    log::info!(
        "Round complete: score {} ({} captures){}",
        score,
        state.round.collected.len(),
        if new_high_score { ", new high score!" } else { "" }
    );

    RoundOutcome {
        score,
        captures: state.round.collected.len(),
        new_high_score,
    }
}

fn expire_fact(state: &mut GameState) {
    if state
        .fact
        .as_ref()
        .is_some_and(|f| state.now_ms >= f.expires_at_ms)
    {
        state.fact = None;
    }
}
