//! Validation rules for circuit validation

use crate::validation::dag::DependencyGraph;
use crate::timing::{GateTiming, QubitTimeTracker};
use crate::{Circuit, Operation, OperationKind};

/// Validation rule that can check circuit properties
pub trait ValidationRule: Send + Sync {
    /// Name of the validation rule
    fn name(&self) -> &str;

    /// Description of what this rule checks
    fn description(&self) -> &str;

    /// Validate the circuit
    fn validate(&self, circuit: &Circuit, dag: &DependencyGraph) -> ValidationResult;
}

/// Result of validation
#[derive(Clone, Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create an error result
    pub fn error(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Collect errors into a result, valid when there are none
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the result
    pub fn with_warning(mut self, warning: ValidationWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid && self.errors.is_empty()
    }
}

/// Validation error with location information
#[derive(Clone, Debug)]
pub struct ValidationError {
    pub rule_name: String,
    pub message: String,
    pub operation_indices: Vec<usize>,
    pub qubits: Vec<usize>,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(rule_name: &str, message: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            message: message.into(),
            operation_indices: Vec::new(),
            qubits: Vec::new(),
            suggestion: None,
        }
    }

    pub fn at(mut self, operation_index: usize) -> Self {
        self.operation_indices.push(operation_index);
        self
    }

    pub fn on_qubit(mut self, qubit: usize) -> Self {
        self.qubits.push(qubit);
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Format error for display
    pub fn format(&self, circuit: &Circuit) -> String {
        let mut msg = format!("Validation error [{}]: {}\n", self.rule_name, self.message);

        if !self.operation_indices.is_empty() {
            msg.push_str("  Involved operations:\n");
            for &idx in &self.operation_indices {
                if let Some(op) = circuit.get_operation(idx) {
                    msg.push_str(&format!("    {}: {}\n", idx, op));
                }
            }
        }

        if !self.qubits.is_empty() {
            msg.push_str(&format!("  Involved qubits: {:?}\n", self.qubits));
        }

        if let Some(suggestion) = &self.suggestion {
            msg.push_str(&format!("  Suggestion: {}\n", suggestion));
        }

        msg
    }
}

/// Validation warning
#[derive(Clone, Debug)]
pub struct ValidationWarning {
    pub rule_name: String,
    pub message: String,
    pub operation_indices: Vec<usize>,
}

impl ValidationWarning {
    pub fn format(&self) -> String {
        format!("Warning [{}]: {}", self.rule_name, self.message)
    }
}

/// Every referenced qubit and classical bit exists in the declared registers
pub struct RegisterBoundsRule;

impl ValidationRule for RegisterBoundsRule {
    fn name(&self) -> &str {
        "register_bounds"
    }

    fn description(&self) -> &str {
        "Checks that every qubit and classical bit exists in the declared registers"
    }

    fn validate(&self, circuit: &Circuit, _dag: &DependencyGraph) -> ValidationResult {
        let mut errors = Vec::new();
        for (i, op) in circuit.operations().enumerate() {
            for qubit in op.qubits() {
                if qubit.index() >= circuit.num_qubits() {
                    errors.push(
                        ValidationError::new(self.name(), format!("Operation {} uses invalid qubit {}", i, qubit))
                            .at(i)
                            .on_qubit(qubit.index()),
                    );
                }
            }
            let clbits = op.clbits_read().iter().copied().chain(op.clbit_written());
            for clbit in clbits {
                if clbit.index() >= circuit.num_clbits() {
                    errors.push(
                        ValidationError::new(
                            self.name(),
                            format!("Operation {} uses invalid classical bit {}", i, clbit),
                        )
                        .at(i),
                    );
                }
            }
        }
        ValidationResult::from_errors(errors)
    }
}

/// Each classical bit is written by at most one measurement
pub struct SingleWriteRule;

impl ValidationRule for SingleWriteRule {
    fn name(&self) -> &str {
        "single_write"
    }

    fn description(&self) -> &str {
        "Checks that no classical bit is measured into twice"
    }

    fn validate(&self, circuit: &Circuit, _dag: &DependencyGraph) -> ValidationResult {
        let mut writer: Vec<Option<usize>> = vec![None; circuit.num_clbits()];
        let mut errors = Vec::new();
        for (i, op) in circuit.operations().enumerate() {
            let Some(clbit) = op.clbit_written() else {
                continue;
            };
            let Some(slot) = writer.get_mut(clbit.index()) else {
                continue;
            };
            match *slot {
                Some(first) => errors.push(
                    ValidationError::new(self.name(), format!("Classical bit {} written twice", clbit))
                        .at(first)
                        .at(i),
                ),
                None => *slot = Some(i),
            }
        }
        ValidationResult::from_errors(errors)
    }
}

/// Every conditioned operation reads only bits already measured
pub struct MeasureBeforeConditionRule;

impl ValidationRule for MeasureBeforeConditionRule {
    fn name(&self) -> &str {
        "measure_before_condition"
    }

    fn description(&self) -> &str {
        "Checks that every classical bit is measured before it is read by a condition"
    }

    fn validate(&self, _circuit: &Circuit, dag: &DependencyGraph) -> ValidationResult {
        let errors = dag
            .unresolved_reads()
            .iter()
            .map(|read| {
                ValidationError::new(
                    self.name(),
                    format!(
                        "Operation {} reads classical bit {} before any measurement writes it",
                        read.operation_index, read.clbit
                    ),
                )
                .at(read.operation_index)
                .suggest("Measure the syndrome ancillas before the correction stage")
            })
            .collect();
        ValidationResult::from_errors(errors)
    }
}

/// All data qubits spend the same total time in `Delay`
pub struct DelayFairnessRule;

impl ValidationRule for DelayFairnessRule {
    fn name(&self) -> &str {
        "delay_fairness"
    }

    fn description(&self) -> &str {
        "Checks that every data qubit idles for the configured survival window"
    }

    fn validate(&self, circuit: &Circuit, _dag: &DependencyGraph) -> ValidationResult {
        let any_delay = circuit.operations().any(|op| op.kind() == OperationKind::Delay);
        if !any_delay {
            return ValidationResult::ok();
        }

        let expected = circuit.delay_duration();
        let tracker = QubitTimeTracker::from_circuit(circuit, GateTiming::delays_only());
        let errors: Vec<_> = circuit
            .data()
            .qubits()
            .filter_map(|qubit| {
                let total = tracker.explicit_delay(qubit.index());
                (total != expected).then(|| {
                    ValidationError::new(
                        self.name(),
                        format!("Data qubit {} idles {}dt, expected {}dt", qubit, total, expected),
                    )
                    .on_qubit(qubit.index())
                })
            })
            .collect();

        let mut result = ValidationResult::from_errors(errors);
        let ancilla_delays: Vec<usize> = circuit
            .operations()
            .enumerate()
            .filter(|(_, op)| {
                matches!(op, Operation::Delay { qubit, .. } if circuit.ancilla().contains(*qubit))
            })
            .map(|(i, _)| i)
            .collect();
        if !ancilla_delays.is_empty() {
            result = result.with_warning(ValidationWarning {
                rule_name: self.name().to_string(),
                message: "Ancilla qubits carry explicit delays".to_string(),
                operation_indices: ancilla_delays,
            });
        }
        result
    }
}

/// Nothing acts on a data qubit after it has been read out
pub struct TerminalReadoutRule;

impl ValidationRule for TerminalReadoutRule {
    fn name(&self) -> &str {
        "terminal_readout"
    }

    fn description(&self) -> &str {
        "Checks that readout is the last operation on every data qubit"
    }

    fn validate(&self, circuit: &Circuit, _dag: &DependencyGraph) -> ValidationResult {
        let mut readout_at: Vec<Option<usize>> = vec![None; circuit.num_qubits()];
        let mut errors = Vec::new();
        for (i, op) in circuit.operations().enumerate() {
            for qubit in op.qubits() {
                if !circuit.data().contains(qubit) {
                    continue;
                }
                if let Some(measured) = readout_at[qubit.index()] {
                    errors.push(
                        ValidationError::new(
                            self.name(),
                            format!("Operation {} acts on data qubit {} after its readout", i, qubit),
                        )
                        .at(measured)
                        .at(i)
                        .on_qubit(qubit.index()),
                    );
                }
                if let Operation::Measure { .. } = op {
                    readout_at[qubit.index()] = Some(i);
                }
            }
        }
        ValidationResult::from_errors(errors)
    }
}

/// Cycle detection rule
pub struct CycleDetectionRule;

impl ValidationRule for CycleDetectionRule {
    fn name(&self) -> &str {
        "acyclic"
    }

    fn description(&self) -> &str {
        "Detects cycles in the circuit dependency graph"
    }

    fn validate(&self, _circuit: &Circuit, dag: &DependencyGraph) -> ValidationResult {
        if dag.is_acyclic() {
            ValidationResult::ok()
        } else {
            ValidationResult::error(ValidationError::new(
                self.name(),
                "Dependency graph contains a cycle",
            ))
        }
    }
}

/// The rules [`Circuit::validate`] runs, in order
pub fn default_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(RegisterBoundsRule),
        Box::new(SingleWriteRule),
        Box::new(MeasureBeforeConditionRule),
        Box::new(DelayFairnessRule),
        Box::new(TerminalReadoutRule),
        Box::new(CycleDetectionRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClbitId, Condition, QubitId, SynthesisConfig};

    fn run(rule: &dyn ValidationRule, circuit: &Circuit) -> ValidationResult {
        let dag = DependencyGraph::from_circuit(circuit).unwrap();
        rule.validate(circuit, &dag)
    }

    fn passive(delay: u64) -> Circuit {
        Circuit::new(&SynthesisConfig::velocity().with_decoupling(false).with_delay(delay))
    }

    #[test]
    fn test_condition_before_measure_fails() {
        let mut circuit = passive(0);
        circuit
            .push(Operation::ConditionalFlip {
                qubit: QubitId::new(0),
                condition: Condition::new("syn", [ClbitId::new(0), ClbitId::new(1)], 1),
            })
            .unwrap();
        let result = run(&MeasureBeforeConditionRule, &circuit);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].suggestion.is_some());
    }

    #[test]
    fn test_unfair_delay_fails() {
        let mut circuit = passive(100);
        circuit.push(Operation::Delay { qubit: QubitId::new(0), duration: 100 }).unwrap();
        circuit.push(Operation::Delay { qubit: QubitId::new(1), duration: 100 }).unwrap();
        circuit.push(Operation::Delay { qubit: QubitId::new(2), duration: 60 }).unwrap();
        let result = run(&DelayFairnessRule, &circuit);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].qubits, vec![2]);
    }

    #[test]
    fn test_no_delay_is_fair() {
        let circuit = passive(100);
        assert!(run(&DelayFairnessRule, &circuit).is_valid());
    }

    #[test]
    fn test_ancilla_delay_warns() {
        let mut circuit = passive(5);
        for i in 0..3 {
            circuit.push(Operation::Delay { qubit: QubitId::new(i), duration: 5 }).unwrap();
        }
        circuit.push(Operation::Delay { qubit: QubitId::new(3), duration: 5 }).unwrap();
        let result = run(&DelayFairnessRule, &circuit);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_operation_after_readout_fails() {
        let mut circuit = passive(0);
        circuit
            .push(Operation::Measure { qubit: QubitId::new(1), clbit: ClbitId::new(3) })
            .unwrap();
        circuit.push(Operation::FlipPulse { qubit: QubitId::new(1) }).unwrap();
        let result = run(&TerminalReadoutRule, &circuit);
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].operation_indices, vec![0, 1]);
    }

    #[test]
    fn test_ancilla_reuse_after_measure_is_allowed() {
        let mut circuit = passive(0);
        circuit
            .push(Operation::Measure { qubit: QubitId::new(3), clbit: ClbitId::new(0) })
            .unwrap();
        circuit.push(Operation::Init { qubit: QubitId::new(3) }).unwrap();
        assert!(run(&TerminalReadoutRule, &circuit).is_valid());
    }

    #[test]
    fn test_error_format() {
        let mut circuit = passive(0);
        circuit.push(Operation::Init { qubit: QubitId::new(0) }).unwrap();
        let error = ValidationError::new("demo", "broken").at(0).on_qubit(0).suggest("fix it");
        let text = error.format(&circuit);
        assert!(text.contains("[demo]"));
        assert!(text.contains("0: x q0"));
        assert!(text.contains("Suggestion: fix it"));
    }
}
