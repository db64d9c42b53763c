//! Error types for repcode

use crate::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building or validating a circuit
#[derive(Debug, Error)]
pub enum QuantumError {
    /// Survival-window duration was negative
    #[error("Invalid delay {0}dt: duration must be non-negative")]
    InvalidDelay(i64),

    /// Topology tag outside the supported set
    #[error("Unsupported topology '{0}': expected one of 'line', 'star'")]
    UnsupportedTopology(String),

    /// A classical bit was targeted by a second measurement
    ///
    /// Unreachable from the synthesizer; seeing this means the synthesizer
    /// itself is defective.
    #[error("Classical bit {0} is already written by an earlier measurement")]
    DuplicateMeasurement(ClbitId),

    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Invalid classical bit index used
    #[error("Invalid classical bit index {0}: circuit has only {1} classical bits")]
    InvalidClbit(usize, usize),

    /// Two-qubit operation addressed the same qubit twice
    #[error("Duplicate qubit {0} in operation")]
    DuplicateQubit(QubitId),

    /// Generic circuit validation error
    #[error("Circuit validation failed: {0}")]
    ValidationError(String),

    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    /// Deserialization failed
    #[error("Deserialization failed: {0}")]
    DeserializationError(String),

    /// Serialized circuit came from a newer format
    #[error("Format version mismatch: expected <= {expected}, got {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid classical bit error
    pub fn invalid_clbit(clbit: usize, num_clbits: usize) -> Self {
        Self::InvalidClbit(clbit, num_clbits)
    }

    /// Create an unsupported topology error
    pub fn unsupported_topology(tag: impl Into<String>) -> Self {
        Self::UnsupportedTopology(tag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_delay_error() {
        let err = QuantumError::InvalidDelay(-1);
        let msg = format!("{}", err);
        assert!(msg.contains("-1"));
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn test_unsupported_topology_error() {
        let err = QuantumError::unsupported_topology("quadrilateral");
        let msg = format!("{}", err);
        assert!(msg.contains("quadrilateral"));
        assert!(msg.contains("line"));
    }

    #[test]
    fn test_duplicate_measurement_error() {
        let err = QuantumError::DuplicateMeasurement(ClbitId::new(3));
        assert!(format!("{}", err).contains("c3"));
    }

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(7, 5);
        let msg = format!("{}", err);
        assert!(msg.contains("7"));
        assert!(msg.contains("5"));
    }
}
