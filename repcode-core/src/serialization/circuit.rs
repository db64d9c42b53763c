//! Circuit serialization types

use crate::serialization::CIRCUIT_FORMAT_VERSION;
use crate::{Circuit, Operation, QuantumError, Result, SynthesisConfig};
use serde::{Deserialize, Serialize};

/// Serialized circuit representation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    /// Configuration the circuit was synthesized from
    pub config: SynthesisConfig,
    /// Operations in insertion order
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CircuitMetadata>,
}

/// Circuit metadata
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CircuitMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SerializedCircuit {
    pub fn new(circuit: &Circuit) -> Self {
        Self {
            version: CIRCUIT_FORMAT_VERSION,
            config: circuit.config().clone(),
            operations: circuit.as_slice().to_vec(),
            metadata: None,
        }
    }

    pub fn with_metadata(circuit: &Circuit, metadata: CircuitMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..Self::new(circuit)
        }
    }

    /// Check version compatibility
    pub fn check_version(&self) -> Result<()> {
        if self.version > CIRCUIT_FORMAT_VERSION {
            return Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(())
    }

    /// Rebuild the circuit, replaying every operation through
    /// [`Circuit::push`] and validating the result
    pub fn into_circuit(self) -> Result<Circuit> {
        self.check_version()?;
        let mut circuit = Circuit::with_capacity(&self.config, self.operations.len());
        for op in self.operations {
            circuit
                .push(op)
                .map_err(|e| QuantumError::DeserializationError(format!("Invalid operation: {}", e)))?;
        }
        circuit.validate()?;
        Ok(circuit)
    }
}

impl Circuit {
    /// Serialize circuit to JSON format
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&SerializedCircuit::new(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Serialize circuit to pretty-printed JSON format
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&SerializedCircuit::new(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Deserialize circuit from JSON format
    ///
    /// # Errors
    /// Returns error if the JSON is malformed, the format version is newer
    /// than this crate understands, or the circuit breaks an invariant
    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedCircuit = serde_json::from_str(json).map_err(|e| {
            QuantumError::DeserializationError(format!("JSON deserialization failed: {}", e))
        })?;
        serialized.into_circuit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClbitId, QubitId};

    fn sample() -> Circuit {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity().with_decoupling(false).with_delay(0));
        circuit.push(Operation::Init { qubit: QubitId::new(0) }).unwrap();
        circuit.push(Operation::barrier("INIT")).unwrap();
        circuit
            .push(Operation::Measure { qubit: QubitId::new(0), clbit: ClbitId::new(2) })
            .unwrap();
        circuit
    }

    #[test]
    fn test_json_round_trip() {
        let circuit = sample();
        let json = circuit.to_json().unwrap();
        assert!(json.contains(r#""op":"measure""#));
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_json_round_trip_at_max_window() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity().with_delay(u64::MAX));
        circuit
            .push(Operation::Delay { qubit: QubitId::new(0), duration: u64::MAX })
            .unwrap();
        let back = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(back, circuit);
        assert_eq!(back.delay_duration(), u64::MAX);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut serialized = SerializedCircuit::new(&sample());
        serialized.version = CIRCUIT_FORMAT_VERSION + 1;
        assert!(matches!(
            serialized.into_circuit(),
            Err(QuantumError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_measurement_rejected_on_load() {
        let mut serialized = SerializedCircuit::new(&sample());
        serialized.operations.push(Operation::Measure {
            qubit: QubitId::new(1),
            clbit: ClbitId::new(2),
        });
        let json = serde_json::to_string(&serialized).unwrap();
        let err = Circuit::from_json(&json).unwrap_err();
        assert!(matches!(err, QuantumError::DeserializationError(_)));
        assert!(err.to_string().contains("c2"));
    }

    #[test]
    fn test_invalid_config_rejected_on_load() {
        let json = r#"{"version":1,"config":{"topology":"ring","delay_duration":1},"operations":[]}"#;
        assert!(Circuit::from_json(json).is_err());
    }

    #[test]
    fn test_metadata() {
        let metadata = CircuitMetadata {
            name: Some("velocity".to_string()),
            description: None,
            tags: vec!["repetition".to_string()],
        };
        let serialized = SerializedCircuit::with_metadata(&sample(), metadata.clone());
        assert_eq!(serialized.metadata, Some(metadata));
    }
}
