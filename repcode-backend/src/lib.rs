//! Execution seams for repetition-code circuits
//!
//! This crate never talks to a network itself. It defines the two external
//! collaborators a synthesized circuit meets on its way to a device:
//! - [`RecommendationService`]: picks a device and physical qubits
//! - [`JobRunner`]: reports device capabilities and accepts submissions
//!
//! [`Optimizer`] joins them and refuses circuits the chosen device cannot
//! run, most importantly conditional corrections on targets without
//! classical feed-forward.

pub mod capabilities;
pub mod error;
pub mod mapping;
pub mod optimizer;
pub mod recommendation;
pub mod runner;

pub use capabilities::BackendCapabilities;
pub use error::{BackendError, Result};
pub use mapping::QubitMapping;
pub use optimizer::{Optimizer, OptimizerConfig, Placement};
pub use recommendation::{
    CircuitType, FixedLayout, Recommendation, RecommendationRequest, RecommendationService, AUTO_BACKEND,
};
pub use runner::{JobHandle, JobRequest, JobRunner, JobStatus, DEFAULT_SHOTS};
