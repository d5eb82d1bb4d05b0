//! Fixed-interval timers owned by the round session
//!
//! An interval is either running (with the time of its next firing) or
//! stopped. Stopped intervals never fire, which is how leaving the
//! playing phase cancels every periodic update.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    /// A stopped interval with the given period
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    /// Start (or restart) so the first firing is one period after `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        // A zero period would fire forever at the same instant
        self.next_due_ms = if self.period_ms == 0 {
            None
        } else {
            now_ms.checked_add(self.period_ms)
        };
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Fire if due at `now_ms`, scheduling the next firing
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if due <= now_ms => {
                // Past the end of the clock the interval simply stops
                self.next_due_ms = due.checked_add(self.period_ms);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_on_period() {
        let mut timer = Interval::new(500);
        assert!(!timer.fire_if_due(10_000));

        timer.start(1000);
        assert_eq!(timer.next_due(), Some(1500));
        assert!(!timer.fire_if_due(1499));
        assert!(timer.fire_if_due(1500));
        assert_eq!(timer.next_due(), Some(2000));
    }

    #[test]
    fn test_stopped_interval_is_inert() {
        let mut timer = Interval::new(16);
        timer.start(0);
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.fire_if_due(1_000_000));
    }

    #[test]
    fn test_zero_period_never_runs() {
        let mut timer = Interval::new(0);
        timer.start(0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_end_of_clock_stops_instead_of_overflowing() {
        let mut timer = Interval::new(1000);
        timer.start(u64::MAX - 10);
        assert!(!timer.is_running());

        timer.start(u64::MAX - 1500);
        assert!(timer.fire_if_due(u64::MAX));
        assert!(!timer.is_running());
    }
}
