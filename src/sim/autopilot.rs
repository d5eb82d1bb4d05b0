//! Idle/demo steering: hold the keys that lead toward the nearest data point

use super::input::{Direction, InputEvent};
use super::state::GameState;

/// Keys closer than this on an axis are released to avoid jitter
const AXIS_DEADZONE: f32 = 1.0;

/// Key events that move the held keys toward the nearest live point.
///
/// Returns only edges (presses and releases that change state), so the
/// result can be fed straight into `apply_input`.
pub fn steer(state: &GameState) -> Vec<InputEvent> {
    let target = state
        .points
        .iter()
        .filter(|p| !p.collected)
        .min_by(|a, b| {
            state
                .player
                .distance_squared(a.pos)
                .total_cmp(&state.player.distance_squared(b.pos))
        })
        .map(|p| p.pos);

    let delta = target.map(|t| t - state.player).unwrap_or_default();
    let wanted = [
        (Direction::Left, delta.x < -AXIS_DEADZONE),
        (Direction::Right, delta.x > AXIS_DEADZONE),
        (Direction::Up, delta.y < -AXIS_DEADZONE),
        (Direction::Down, delta.y > AXIS_DEADZONE),
    ];

    wanted
        .into_iter()
        .filter(|(dir, want)| state.input.is_pressed(*dir) != *want)
        .map(|(dir, want)| {
            if want {
                InputEvent::KeyDown(dir)
            } else {
                InputEvent::KeyUp(dir)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InstrumentId;
    use crate::sim::state::DataPoint;
    use crate::sim::{GamePhase, advance, apply_input, start_round};
    use crate::tuning::GameTuning;
    use glam::Vec2;

    #[test]
    fn test_steer_toward_nearest_point() {
        let mut state = GameState::new(1, GameTuning::default());
        start_round(&mut state).unwrap();
        state.points.push(DataPoint {
            id: 1,
            instrument: InstrumentId::Misr,
            pos: Vec2::new(80.0, 30.0),
            collected: false,
        });

        let events = steer(&state);
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(Direction::Right),
                InputEvent::KeyDown(Direction::Up)
            ]
        );

        for event in events {
            apply_input(&mut state, event);
        }
        assert!(steer(&state).is_empty());
    }

    #[test]
    fn test_autopilot_round_scores() {
        let mut state = GameState::new(2024, GameTuning::default());
        start_round(&mut state).unwrap();
        while state.phase == GamePhase::Playing {
            for event in steer(&state) {
                apply_input(&mut state, event);
            }
            advance(&mut state, 16);
        }
        assert!(state.round.score > 0);
        assert!(!state.round.collected.is_empty());
    }
}
