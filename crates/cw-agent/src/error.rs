use thiserror::Error;

/// Invalid kind configuration.
#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("kind {kind:?} has an empty goal set")]
    EmptyGoalSet { kind: String },

    #[error("kind {kind:?}: speed must be positive and finite, got {speed}")]
    InvalidSpeed { kind: String, speed: f64 },

    #[error("kind {kind:?}: traffic sensitivity must be non-negative, got {value}")]
    InvalidSensitivity { kind: String, value: f64 },
}

pub type AgentResult<T> = Result<T, AgentError>;
