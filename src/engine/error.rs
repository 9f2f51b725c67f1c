//! Timer engine error types.

use thiserror::Error;

/// Errors reported by the timer engine.
///
/// Every error is recovered locally: the engine surfaces it as a transient
/// message and stays in its current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// A run was requested with a zero duration.
    #[error("Please set a time first!")]
    InvalidConfig,
}

impl TimerError {
    /// Returns the text shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "Please set a time first!",
        }
    }
}
