//! Validation report aggregation

use crate::validation::dag::DependencyGraph;
use crate::validation::rules::{default_rules, ValidationError, ValidationResult, ValidationRule};
use crate::Circuit;

/// Results of every rule, in the order the rules ran
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    results: Vec<(String, ValidationResult)>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a set of rules
    pub fn run(circuit: &Circuit, dag: &DependencyGraph, rules: &[Box<dyn ValidationRule>]) -> Self {
        let mut report = Self::new();
        for rule in rules {
            report.add_result(rule.name(), rule.validate(circuit, dag));
        }
        report
    }

    /// Run the default rule set
    pub fn run_default(circuit: &Circuit, dag: &DependencyGraph) -> Self {
        Self::run(circuit, dag, &default_rules())
    }

    pub fn add_result(&mut self, rule_name: &str, result: ValidationResult) {
        self.results.push((rule_name.to_string(), result));
    }

    pub fn result(&self, rule_name: &str) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(name, _)| name == rule_name)
            .map(|(_, result)| result)
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|(_, r)| !r.is_valid())
    }

    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|(_, r)| !r.warnings.is_empty())
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.results.iter().flat_map(|(_, r)| r.errors.iter()).next()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().map(|(_, r)| r.errors.len()).sum()
    }

    /// Format the validation report
    pub fn format(&self, circuit: &Circuit) -> String {
        let mut msg = String::new();

        if self.is_valid() {
            msg.push_str("✓ Circuit validation passed\n");
        } else {
            msg.push_str("✗ Circuit validation failed\n");
        }

        for (rule_name, result) in &self.results {
            if !result.is_valid() {
                msg.push_str(&format!("\nRule '{}':\n", rule_name));
                for error in &result.errors {
                    msg.push_str(&error.format(circuit));
                }
            }
        }

        if self.has_warnings() {
            msg.push_str("\nWarnings:\n");
            for (_, result) in &self.results {
                for warning in &result.warnings {
                    msg.push_str(&format!("  {}\n", warning.format()));
                }
            }
        }

        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Operation, QubitId, SynthesisConfig};

    #[test]
    fn test_empty_circuit_passes() {
        let circuit = Circuit::new(&SynthesisConfig::velocity());
        let report = circuit.validation_report().unwrap();
        assert!(report.is_valid());
        assert!(report.result("terminal_readout").is_some());
        assert!(report.format(&circuit).contains("passed"));
    }

    #[test]
    fn test_report_collects_failures() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        circuit.push(Operation::Delay { qubit: QubitId::new(0), duration: 1 }).unwrap();
        let report = circuit.validation_report().unwrap();
        assert!(!report.is_valid());
        // q0 idles 1dt, q1 and q2 idle 0dt; all three miss the 700dt window
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.first_error().unwrap().rule_name, "delay_fairness");
        assert!(report.format(&circuit).contains("Rule 'delay_fairness'"));
        assert!(circuit.validate().is_err());
    }
}
