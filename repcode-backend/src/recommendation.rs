//! Qubit-layout recommendation seam
//!
//! A layout service picks physical qubits (and a device) for a circuit's
//! register sizes. The fidelity figures it returns are opaque and passed
//! through untouched.

use crate::{BackendError, Result};
use repcode_core::{Circuit, Topology};
use serde::{Deserialize, Serialize};

/// Backend name that lets the service choose the device
pub const AUTO_BACKEND: &str = "auto";

/// Circuit family hint sent with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CircuitType {
    Vqe,
    Qaoa,
    Repetition,
    #[default]
    Custom,
}

/// What the layout service is asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub backend: String,
    pub data_qubits: usize,
    pub ancilla_qubits: usize,
    pub circuit_type: CircuitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<Topology>,
}

impl RecommendationRequest {
    pub fn new(data_qubits: usize, ancilla_qubits: usize) -> Self {
        Self {
            backend: AUTO_BACKEND.to_string(),
            data_qubits,
            ancilla_qubits,
            circuit_type: CircuitType::Custom,
            topology: None,
        }
    }

    /// Request sized to a synthesized repetition-code circuit
    pub fn for_circuit(circuit: &Circuit) -> Self {
        Self {
            circuit_type: CircuitType::Repetition,
            topology: Some(circuit.topology()),
            ..Self::new(circuit.data().len(), circuit.ancilla().len())
        }
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    pub fn with_circuit_type(mut self, circuit_type: CircuitType) -> Self {
        self.circuit_type = circuit_type;
        self
    }

    /// Number of physical qubits the layout must provide
    pub fn total_qubits(&self) -> usize {
        self.data_qubits + self.ancilla_qubits
    }
}

/// Layout returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Device the layout refers to
    pub backend: String,
    /// Combined layout, data qubits first, then ancillas
    pub qubits: Vec<usize>,
    #[serde(default)]
    pub fidelity_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Recommendation {
    /// Parse a service response body
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that the layout can host the request
    ///
    /// # Errors
    /// Returns `InvalidRecommendation` for an unnamed backend or a layout
    /// with fewer qubits than requested
    pub fn check(&self, request: &RecommendationRequest) -> Result<()> {
        if self.backend.is_empty() || self.backend == AUTO_BACKEND {
            return Err(BackendError::InvalidRecommendation(
                "Recommendation does not name a concrete backend".to_string(),
            ));
        }
        if self.qubits.len() < request.total_qubits() {
            return Err(BackendError::InvalidRecommendation(format!(
                "Layout provides {} qubits, {} requested",
                self.qubits.len(),
                request.total_qubits()
            )));
        }
        Ok(())
    }

    /// Data-qubit part of the layout
    pub fn data_layout(&self, request: &RecommendationRequest) -> &[usize] {
        let end = request.data_qubits.min(self.qubits.len());
        &self.qubits[..end]
    }

    /// Ancilla part of the layout
    pub fn ancilla_layout(&self, request: &RecommendationRequest) -> &[usize] {
        let start = request.data_qubits.min(self.qubits.len());
        let end = request.total_qubits().min(self.qubits.len());
        &self.qubits[start..end]
    }
}

/// External layout service
pub trait RecommendationService: Send + Sync {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation>;
}

/// Service that always answers with the same device and layout
///
/// Useful offline, or when the layout has been chosen by hand.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    backend: String,
    qubits: Vec<usize>,
}

impl FixedLayout {
    pub fn new(backend: impl Into<String>, qubits: Vec<usize>) -> Self {
        Self {
            backend: backend.into(),
            qubits,
        }
    }
}

impl RecommendationService for FixedLayout {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation> {
        if request.backend != AUTO_BACKEND && request.backend != self.backend {
            return Err(BackendError::ServiceUnavailable(format!(
                "No layout known for backend '{}'",
                request.backend
            )));
        }
        Ok(Recommendation {
            backend: self.backend.clone(),
            qubits: self.qubits.clone(),
            fidelity_score: None,
            confidence: None,
        })
    }
}
