use thiserror::Error;

/// Errors surfaced by the monitoring engine and its sub-models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    #[error("baseline not initialized: call initialize_baseline first")]
    UninitializedBaseline,
    #[error("invalid observation for '{key}': {reason}")]
    InvalidObservation { key: String, reason: String },
    #[error("invalid monitor config: {0}")]
    InvalidConfig(String),
}

impl MonitorError {
    pub fn invalid_observation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidObservation {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;
