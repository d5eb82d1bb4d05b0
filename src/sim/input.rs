//! Player input state
//!
//! Keyboard edges and touch swipes are folded into a pure state object that
//! the motion tick reads. Nothing here knows about timers or the DOM.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value (arrows or WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit step in play-field space (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
    /// Touch coordinates in screen pixels
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
}

/// Currently held directions plus the swipe-derived touch vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pressed: [bool; 4],
    touch_origin: Option<Vec2>,
    touch_dir: Vec2,
    touch_release_at_ms: Option<u64>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, dir: Direction) -> bool {
        self.pressed[dir.index()]
    }

    /// Current touch steering vector (zero or a unit axis vector)
    pub fn touch_dir(&self) -> Vec2 {
        self.touch_dir
    }

    /// Apply one input event observed at `now_ms`
    pub fn apply(
        &mut self,
        event: InputEvent,
        now_ms: u64,
        swipe_threshold_px: f32,
        touch_release_ms: u64,
    ) {
        match event {
            InputEvent::KeyDown(dir) => self.pressed[dir.index()] = true,
            InputEvent::KeyUp(dir) => self.pressed[dir.index()] = false,
            InputEvent::TouchStart { x, y } => {
                self.touch_origin = Some(Vec2::new(x, y));
                self.touch_release_at_ms = None;
            }
            InputEvent::TouchMove { x, y } => {
                let Some(origin) = self.touch_origin else {
                    return;
                };
                let delta = Vec2::new(x, y) - origin;
                if delta.length() > swipe_threshold_px {
                    self.touch_dir = if delta.x.abs() > delta.y.abs() {
                        Vec2::new(delta.x.signum(), 0.0)
                    } else {
                        Vec2::new(0.0, delta.y.signum())
                    };
                }
            }
            InputEvent::TouchEnd => {
                self.touch_origin = None;
                self.touch_release_at_ms = Some(now_ms.saturating_add(touch_release_ms));
            }
        }
    }

    /// Clear touch steering once the release delay has passed
    pub fn expire_touch(&mut self, now_ms: u64) {
        if self.touch_release_at_ms.is_some_and(|at| now_ms >= at) {
            self.touch_dir = Vec2::ZERO;
            self.touch_release_at_ms = None;
        }
    }

    /// Combined keyboard + touch direction for one motion tick
    pub fn movement(&self) -> Vec2 {
        let keys = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|d| self.is_pressed(*d))
        .fold(Vec2::ZERO, |acc, d| acc + d.unit());
        keys + self.touch_dir
    }

    /// Drop everything (round reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &mut InputState, event: InputEvent, now_ms: u64) {
        input.apply(event, now_ms, 30.0, 100);
    }

    #[test]
    fn test_key_edges() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::KeyDown(Direction::Right), 0);
        apply(&mut input, InputEvent::KeyDown(Direction::Up), 0);
        assert_eq!(input.movement(), Vec2::new(1.0, -1.0));

        apply(&mut input, InputEvent::KeyUp(Direction::Up), 5);
        assert_eq!(input.movement(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::KeyDown(Direction::Left), 0);
        apply(&mut input, InputEvent::KeyDown(Direction::Right), 0);
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("W"), Some(Direction::Up));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_swipe_below_threshold_does_nothing() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::TouchStart { x: 100.0, y: 100.0 }, 0);
        apply(&mut input, InputEvent::TouchMove { x: 120.0, y: 110.0 }, 10);
        assert_eq!(input.touch_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_swipe_picks_dominant_axis() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::TouchStart { x: 100.0, y: 100.0 }, 0);
        apply(&mut input, InputEvent::TouchMove { x: 60.0, y: 110.0 }, 10);
        assert_eq!(input.touch_dir(), Vec2::new(-1.0, 0.0));

        apply(&mut input, InputEvent::TouchMove { x: 90.0, y: 160.0 }, 20);
        assert_eq!(input.touch_dir(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_touch_released_after_delay() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::TouchStart { x: 0.0, y: 0.0 }, 0);
        apply(&mut input, InputEvent::TouchMove { x: 0.0, y: -50.0 }, 10);
        apply(&mut input, InputEvent::TouchEnd, 200);

        input.expire_touch(250);
        assert_eq!(input.touch_dir(), Vec2::new(0.0, -1.0));
        input.expire_touch(300);
        assert_eq!(input.touch_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_new_touch_cancels_pending_release() {
        let mut input = InputState::new();
        apply(&mut input, InputEvent::TouchStart { x: 0.0, y: 0.0 }, 0);
        apply(&mut input, InputEvent::TouchMove { x: 40.0, y: 0.0 }, 10);
        apply(&mut input, InputEvent::TouchEnd, 20);
        apply(&mut input, InputEvent::TouchStart { x: 0.0, y: 0.0 }, 50);

        input.expire_touch(500);
        assert_eq!(input.touch_dir(), Vec2::new(1.0, 0.0));
    }
}
