//! Job submission seam

use crate::{BackendCapabilities, QubitMapping, Result};
use repcode_core::serialization::SerializedCircuit;
use repcode_core::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of shots per job
pub const DEFAULT_SHOTS: usize = 1000;

/// Job status as reported by the execution service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobStatus {
    /// Job is queued
    #[default]
    Queued,

    /// Job is validating
    Validating,

    /// Job is running
    Running,

    /// Job completed successfully
    Completed,

    /// Job failed
    Failed,

    /// Job was cancelled
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Validating => write!(f, "Validating"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed => write!(f, "Failed"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Reference to a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
    pub backend: String,
    pub shots: usize,
    #[serde(default)]
    pub status: JobStatus,
}

/// Wire payload for a submission: circuit, placement and shot count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub backend: String,
    pub circuit: SerializedCircuit,
    /// Physical qubit for each logical qubit
    pub layout: Vec<usize>,
    pub shots: usize,
}

impl JobRequest {
    pub fn new(backend: impl Into<String>, circuit: &Circuit, mapping: &QubitMapping, shots: usize) -> Self {
        Self {
            backend: backend.into(),
            circuit: SerializedCircuit::new(circuit),
            layout: mapping.as_slice().to_vec(),
            shots,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// External execution service
pub trait JobRunner: Send + Sync {
    /// Capabilities of a named backend
    fn capabilities(&self, backend: &str) -> Result<BackendCapabilities>;

    /// Submit a placed circuit to a named backend
    fn submit(&self, backend: &str, circuit: &Circuit, mapping: &QubitMapping, shots: usize) -> Result<JobHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcode_core::SynthesisConfig;

    #[test]
    fn test_status_display() {
        assert_eq!(JobStatus::default(), JobStatus::Queued);
        assert_eq!(JobStatus::Running.to_string(), "Running");
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Validating.is_terminal());
    }

    #[test]
    fn test_job_request_payload() {
        let circuit = Circuit::new(&SynthesisConfig::velocity());
        let mapping = QubitMapping::from_vec(vec![5, 6, 7, 8, 9]).unwrap();
        let request = JobRequest::new("ibm_kyiv", &circuit, &mapping, DEFAULT_SHOTS);

        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["layout"], serde_json::json!([5, 6, 7, 8, 9]));
        assert_eq!(value["shots"], 1000);
        assert_eq!(value["circuit"]["config"]["topology"], "line");
    }
}
