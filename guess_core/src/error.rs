//! Engine error types

use thiserror::Error;

use crate::registry::SessionId;
use crate::session::GameState;

/// Errors raised by the decision engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Partitioning error: no best question among {pool_size} candidates")]
    Partitioning { pool_size: usize },

    #[error("Guess selection error: guess triggered but none of {candidates} candidates qualifies")]
    GuessSelection { candidates: usize },

    #[error("Invalid state: cannot {action} in state {state:?}")]
    InvalidState {
        state: GameState,
        action: &'static str,
    },

    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether the error leaves the session corrupted.
    ///
    /// Fatal errors abort the turn; the session must be ended rather than
    /// retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::Partitioning { .. }
                | EngineError::GuessSelection { .. }
                | EngineError::InvalidState { .. }
        )
    }
}
