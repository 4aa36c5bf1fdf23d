//! Error types shared by the engine, the state owner and the API

use thiserror::Error;

use crate::state::Field;

/// Errors surfaced by timer operations and their callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("unknown mode '{0}', expected 'focus' or 'break'")]
    UnknownMode(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is not a duration")]
    NotADuration(Field),

    #[error("failed to lock timer state: {0}")]
    StateLock(String),

    #[error("alert failed: {0}")]
    Alert(String),
}

impl TimerError {
    /// Whether the error was caused by a malformed caller argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            TimerError::UnknownMode(_) | TimerError::UnknownField(_) | TimerError::NotADuration(_)
        )
    }
}
