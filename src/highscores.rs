//! High score tracking
//!
//! A single best score kept for the lifetime of the process. It is never
//! written to storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score so far (0 before any round completes)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished round's score.
    /// Returns true if it became the new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut high = HighScore::new();
        assert!(high.record(100));
        assert!(high.record(120));
        assert!(!high.record(80));
        assert_eq!(high.best(), 120);
    }

    #[test]
    fn test_ties_do_not_qualify() {
        let mut high = HighScore::new();
        high.record(50);
        assert!(!high.qualifies(50));
        assert!(!high.record(0));
    }
}
