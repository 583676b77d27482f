//! Errors raised while running a machine.

use thiserror::Error;

/// Errors that can occur while advancing or running a machine.
///
/// None of these are recovered internally: every one propagates straight
/// out of `run`, and the run is considered failed as a whole.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A declared guard list has an invalid shape. Detected the first time
    /// the offending state is advanced from, not at construction.
    #[error("Malformed guard declaration for state '{state}': {reason}")]
    Configuration { state: String, reason: String },

    #[error("No candidate matched in machine '{machine}' for state '{state}'")]
    NoMatch { machine: String, state: String },

    #[error("Machine '{machine}' is already running")]
    AlreadyRunning { machine: String },

    #[error("Machine '{machine}' exceeded its step limit ({limit})")]
    StepLimitExceeded { machine: String, limit: usize },
}

impl EngineError {
    /// Whether the error stems from the machine's declarations rather than
    /// from the context it was run against.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
