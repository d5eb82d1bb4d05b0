//! Crate-wide error type

use thiserror::Error;

use crate::sim::GamePhase;

#[derive(Debug, Error)]
pub enum Error {
    /// A state machine action that is not valid from the current phase
    #[error("cannot {action} while in {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },

    /// A required request field was absent or had the wrong type
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The upstream service could not be reached
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream service answered with a non-2xx status
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
