//! Backend capabilities and the compatibility gate

use crate::{BackendError, QubitMapping, Result};
use repcode_core::{Circuit, OperationKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Capabilities of an execution target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendCapabilities {
    /// Number of physical qubits on the device
    pub max_qubits: usize,

    /// Maximum number of shots per job (None = unlimited)
    pub max_shots: Option<usize>,

    /// Whether the backend supports mid-circuit measurement
    pub supports_mid_circuit_measurement: bool,

    /// Whether the backend supports classically conditioned operations
    pub supports_conditional: bool,

    /// Whether explicit delays are honored
    pub supports_delay: bool,

    /// Backend-specific metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self {
            max_qubits: 64,
            max_shots: None,
            supports_mid_circuit_measurement: true,
            supports_conditional: true,
            supports_delay: true,
            metadata: HashMap::new(),
        }
    }
}

impl BackendCapabilities {
    /// Capabilities of a perfect simulator
    pub fn simulator() -> Self {
        Self::default()
    }

    /// Hardware with dynamic-circuit support
    pub fn dynamic_hardware(num_qubits: usize) -> Self {
        Self {
            max_qubits: num_qubits,
            max_shots: Some(100_000),
            ..Self::default()
        }
    }

    /// Hardware limited to terminal measurement and no feed-forward
    pub fn static_hardware(num_qubits: usize) -> Self {
        Self {
            supports_mid_circuit_measurement: false,
            supports_conditional: false,
            ..Self::dynamic_hardware(num_qubits)
        }
    }

    /// Check that a circuit, placed with `mapping`, can run `shots` times
    ///
    /// # Errors
    /// - `CircuitIncompatible` if the circuit needs conditionals, mid-circuit
    ///   measurement or delays the target lacks
    /// - `CapabilityExceeded` if the layout leaves the device or the shot
    ///   count is above the limit
    pub fn check_circuit(&self, circuit: &Circuit, mapping: &QubitMapping, shots: usize) -> Result<()> {
        if !self.supports_conditional && circuit.has_conditionals() {
            return Err(BackendError::CircuitIncompatible(format!(
                "Circuit has {} conditional operations, backend does not support classical feed-forward",
                circuit.count_by_kind(OperationKind::ConditionalFlip)
            )));
        }

        if !self.supports_mid_circuit_measurement && circuit.has_mid_circuit_measurement() {
            return Err(BackendError::CircuitIncompatible(
                "Circuit measures qubits mid-circuit, backend only supports terminal measurement".to_string(),
            ));
        }

        if !self.supports_delay && circuit.count_by_kind(OperationKind::Delay) > 0 {
            return Err(BackendError::CircuitIncompatible(
                "Circuit contains explicit delays, backend does not support them".to_string(),
            ));
        }

        if mapping.len() < circuit.num_qubits() {
            return Err(BackendError::CapabilityExceeded(format!(
                "Layout places {} qubits, circuit requires {}",
                mapping.len(),
                circuit.num_qubits()
            )));
        }

        if let Some(max_physical) = mapping.max_physical() {
            if max_physical >= self.max_qubits {
                return Err(BackendError::CapabilityExceeded(format!(
                    "Layout uses physical qubit {}, backend has {} qubits",
                    max_physical, self.max_qubits
                )));
            }
        }

        if let Some(max_shots) = self.max_shots {
            if shots > max_shots {
                return Err(BackendError::CapabilityExceeded(format!(
                    "Requested {} shots, backend allows at most {}",
                    shots, max_shots
                )));
            }
        }

        Ok(())
    }
}
