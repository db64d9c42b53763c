//! Recommendation-to-submission glue
//!
//! The optimizer asks the layout service for physical qubits sized to the
//! circuit's registers, gates the circuit against the chosen device's
//! capabilities, and only then hands it to the job runner. A circuit the
//! device cannot execute faithfully is rejected here rather than silently
//! degraded downstream.

use crate::recommendation::{Recommendation, RecommendationRequest, RecommendationService, AUTO_BACKEND};
use crate::runner::{JobHandle, JobRunner, DEFAULT_SHOTS};
use crate::{QubitMapping, Result};
use repcode_core::Circuit;
use tracing::{debug, info, warn};

/// Optimizer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Device to request, or `auto` to let the service choose
    pub backend: String,
    pub default_shots: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            backend: AUTO_BACKEND.to_string(),
            default_shots: DEFAULT_SHOTS,
        }
    }
}

impl OptimizerConfig {
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    pub fn with_default_shots(mut self, shots: usize) -> Self {
        self.default_shots = shots;
        self
    }
}

/// A layout placed on a concrete device
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub recommendation: Recommendation,
    pub mapping: QubitMapping,
}

/// Pairs a layout service with an execution service
pub struct Optimizer<S, R> {
    service: S,
    runner: R,
    config: OptimizerConfig,
}

impl<S: RecommendationService, R: JobRunner> Optimizer<S, R> {
    pub fn new(service: S, runner: R) -> Self {
        Self::with_config(service, runner, OptimizerConfig::default())
    }

    pub fn with_config(service: S, runner: R, config: OptimizerConfig) -> Self {
        Self { service, runner, config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Ask the service for a layout sized to the circuit
    pub fn place(&self, circuit: &Circuit) -> Result<Placement> {
        let request = RecommendationRequest::for_circuit(circuit).with_backend(self.config.backend.clone());
        let recommendation = self.service.recommend(&request)?;
        recommendation.check(&request)?;
        let mapping = QubitMapping::for_circuit(circuit, &recommendation.qubits)?;

        debug!(
            backend = %recommendation.backend,
            layout = %mapping,
            fidelity_score = ?recommendation.fidelity_score,
            confidence = ?recommendation.confidence,
            "layout recommended"
        );
        Ok(Placement {
            recommendation,
            mapping,
        })
    }

    /// Place, gate and submit a circuit
    ///
    /// # Errors
    /// Any service error, `InvalidRecommendation` for an unusable layout,
    /// and `CircuitIncompatible`/`CapabilityExceeded` when the recommended
    /// device cannot run the circuit. Nothing is submitted on error.
    pub fn run_optimized(&self, circuit: &Circuit, shots: usize) -> Result<JobHandle> {
        let placement = self.place(circuit)?;
        let backend = placement.recommendation.backend.as_str();

        let capabilities = self.runner.capabilities(backend)?;
        if let Err(err) = capabilities.check_circuit(circuit, &placement.mapping, shots) {
            warn!(backend, error = %err, "circuit rejected by backend gate");
            return Err(err);
        }

        let handle = self.runner.submit(backend, circuit, &placement.mapping, shots)?;
        info!(job_id = %handle.job_id, backend, shots, "job submitted");
        Ok(handle)
    }

    /// [`run_optimized`](Self::run_optimized) with the configured shot count
    pub fn run(&self, circuit: &Circuit) -> Result<JobHandle> {
        self.run_optimized(circuit, self.config.default_shots)
    }
}
