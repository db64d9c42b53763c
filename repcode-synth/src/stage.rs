//! Synthesis stage trait

use repcode_core::{Circuit, Result};

/// One phase of the repetition-code circuit
///
/// A stage only appends to the circuit it is given. It reads its
/// parameters (topology, delay, decoupling flag) from the circuit's
/// configuration and never inspects operations a later stage will add.
///
/// # Example
/// ```
/// use repcode_core::{Circuit, Operation, Result, SynthesisConfig};
/// use repcode_synth::SynthesisStage;
///
/// struct Fence;
///
/// impl SynthesisStage for Fence {
///     fn name(&self) -> &str {
///         "fence"
///     }
///
///     fn append(&self, circuit: &mut Circuit) -> Result<()> {
///         circuit.push(Operation::barrier("FENCE"))
///     }
/// }
///
/// let mut circuit = Circuit::new(&SynthesisConfig::velocity());
/// Fence.append(&mut circuit).unwrap();
/// assert_eq!(circuit.len(), 1);
/// ```
pub trait SynthesisStage: Send + Sync {
    /// The name of this stage
    fn name(&self) -> &str;

    /// Append this stage's operations to the circuit
    ///
    /// # Errors
    /// Returns an error only if the circuit rejects an operation, which
    /// signals a defect in the stage
    fn append(&self, circuit: &mut Circuit) -> Result<()>;

    /// Optional description of what this stage does
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Operations a stage contributed to a circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStatistics {
    pub stage_name: String,
    /// Index of the first operation the stage appended
    pub first_operation: usize,
    /// Number of operations appended, barriers included
    pub operations_added: usize,
}

impl StageStatistics {
    /// Range of operation indices owned by the stage
    pub fn range(&self) -> std::ops::Range<usize> {
        self.first_operation..self.first_operation + self.operations_added
    }
}
