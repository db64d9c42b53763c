//! Circuit validation and dependency analysis
//!
//! Structural invariants of a repetition-code circuit are expressed as
//! [`ValidationRule`]s evaluated over the circuit and its
//! [`DependencyGraph`].

pub mod dag;
pub mod report;
pub mod rules;

pub use dag::{DependencyEdge, DependencyGraph, OperationNode, ParallelismAnalysis, UnresolvedRead};
pub use report::ValidationReport;
pub use rules::{
    default_rules, ValidationError, ValidationResult, ValidationRule, ValidationWarning,
};
