//! Error types for backend operations

use repcode_core::QuantumError;
use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors raised by the layout service, the job runner, or the gate between them
#[derive(Error, Debug)]
pub enum BackendError {
    /// Layout service or execution service could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Insufficient credits/quota
    #[error("Insufficient credits or quota: {0}")]
    QuotaExceeded(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Circuit is not compatible with the target
    #[error("Circuit incompatible with backend: {0}")]
    CircuitIncompatible(String),

    /// Target capabilities exceeded
    #[error("Backend capability exceeded: {0}")]
    CapabilityExceeded(String),

    /// The layout service answered with an unusable layout
    #[error("Invalid recommendation: {0}")]
    InvalidRecommendation(String),

    /// Job submission failed
    #[error("Job submission failed: {0}")]
    JobSubmissionFailed(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::SerializationError(err.to_string())
    }
}

impl From<QuantumError> for BackendError {
    fn from(err: QuantumError) -> Self {
        BackendError::CircuitIncompatible(format!("Core error: {}", err))
    }
}
