//! Repetition-code circuit representation

use crate::register::{ANCILLA_REGISTER, DATA_REGISTER, OUTPUT_REGISTER, SYNDROME_REGISTER};
use crate::validation::{DependencyGraph, ValidationReport};
use crate::{
    ClassicalRegister, ClbitId, Operation, OperationKind, QuantumError, QubitId, QubitRegister,
    Result, SynthesisConfig, Topology,
};
use std::collections::BTreeMap;
use std::fmt;

/// Number of data qubits in the distance-3 code block
pub const DATA_QUBITS: usize = 3;
/// Number of ancillas used for parity checks
pub const ANCILLA_QUBITS: usize = 2;
/// Width of the syndrome register
pub const SYNDROME_BITS: usize = 2;
/// Width of the readout register
pub const OUTPUT_BITS: usize = DATA_QUBITS;

/// Create an empty repetition-code circuit from raw inputs
///
/// # Errors
/// Returns `InvalidDelay` if `delay_duration < 0` and `UnsupportedTopology`
/// if `topology` is not `line` or `star`
///
/// # Example
/// ```
/// use repcode_core::new_circuit;
///
/// let circuit = new_circuit("star", 1000, false).unwrap();
/// assert_eq!(circuit.num_qubits(), 5);
/// assert!(circuit.is_empty());
///
/// assert!(new_circuit("line", -1, true).is_err());
/// ```
pub fn new_circuit(topology: &str, delay_duration: i64, use_decoupling: bool) -> Result<Circuit> {
    let config = SynthesisConfig::parse(topology, use_decoupling, delay_duration)?;
    Ok(Circuit::new(&config))
}

/// A repetition-code circuit
///
/// Holds the four registers of the code layout and the ordered operation
/// sequence. Appending checks register bounds and the write-once rule for
/// classical bits; the remaining structural invariants (measurement before
/// conditioned reads, fair delay exposure, terminal readout) are checked by
/// [`Circuit::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    config: SynthesisConfig,
    data: QubitRegister,
    ancilla: QubitRegister,
    syndrome: ClassicalRegister,
    output: ClassicalRegister,
    operations: Vec<Operation>,
    written: Vec<bool>,
}

impl Circuit {
    /// Create an empty circuit with the repetition-code register layout
    ///
    /// Data qubits are `q0..q2`, ancillas `q3..q4`; syndrome bits are
    /// `c0..c1`, readout bits `c2..c4`.
    pub fn new(config: &SynthesisConfig) -> Self {
        Self::with_capacity(config, 0)
    }

    /// Create a circuit with pre-allocated operation capacity
    pub fn with_capacity(config: &SynthesisConfig, capacity: usize) -> Self {
        Self {
            config: config.clone(),
            data: QubitRegister::new(DATA_REGISTER, 0, DATA_QUBITS),
            ancilla: QubitRegister::new(ANCILLA_REGISTER, DATA_QUBITS, ANCILLA_QUBITS),
            syndrome: ClassicalRegister::new(SYNDROME_REGISTER, 0, SYNDROME_BITS),
            output: ClassicalRegister::new(OUTPUT_REGISTER, SYNDROME_BITS, OUTPUT_BITS),
            operations: Vec::with_capacity(capacity),
            written: vec![false; SYNDROME_BITS + OUTPUT_BITS],
        }
    }

    #[inline]
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.config.topology()
    }

    #[inline]
    pub fn delay_duration(&self) -> u64 {
        self.config.delay_duration()
    }

    #[inline]
    pub fn uses_decoupling(&self) -> bool {
        self.config.use_decoupling()
    }

    #[inline]
    pub fn data(&self) -> &QubitRegister {
        &self.data
    }

    #[inline]
    pub fn ancilla(&self) -> &QubitRegister {
        &self.ancilla
    }

    #[inline]
    pub fn syndrome(&self) -> &ClassicalRegister {
        &self.syndrome
    }

    #[inline]
    pub fn output(&self) -> &ClassicalRegister {
        &self.output
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.data.len() + self.ancilla.len()
    }

    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.written.len()
    }

    /// Number of operations, barriers included
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations that act on qubits (barriers excluded)
    pub fn gate_count(&self) -> usize {
        self.operations.iter().filter(|op| !op.is_barrier()).count()
    }

    pub fn count_by_kind(&self, kind: OperationKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    /// Histogram of operation kinds
    pub fn kind_counts(&self) -> BTreeMap<OperationKind, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Append an operation
    ///
    /// # Errors
    /// - `InvalidQubit`/`InvalidClbit` if the operation references a slot
    ///   outside the declared registers
    /// - `DuplicateQubit` if an `Encode` uses the same qubit twice
    /// - `DuplicateMeasurement` if the target classical bit was already
    ///   written
    pub fn push(&mut self, op: Operation) -> Result<()> {
        let qubits = op.qubits();
        for &qubit in &qubits {
            if qubit.index() >= self.num_qubits() {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits()));
            }
        }
        if let [a, b] = qubits.as_slice() {
            if a == b {
                return Err(QuantumError::DuplicateQubit(*a));
            }
        }
        for &clbit in op.clbits_read() {
            self.check_clbit(clbit)?;
        }
        if let Some(clbit) = op.clbit_written() {
            self.check_clbit(clbit)?;
            if self.written[clbit.index()] {
                return Err(QuantumError::DuplicateMeasurement(clbit));
            }
            self.written[clbit.index()] = true;
        }

        tracing::trace!(index = self.operations.len(), op = %op, "append");
        self.operations.push(op);
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> Result<()> {
        if clbit.index() >= self.num_clbits() {
            return Err(QuantumError::invalid_clbit(clbit.index(), self.num_clbits()));
        }
        Ok(())
    }

    /// Whether a classical bit has been targeted by a measurement
    pub fn is_written(&self, clbit: ClbitId) -> bool {
        self.written.get(clbit.index()).copied().unwrap_or(false)
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Operations as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Operation] {
        &self.operations
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Index of the first barrier carrying `label`
    pub fn barrier_index(&self, label: &str) -> Option<usize> {
        self.operations
            .iter()
            .position(|op| matches!(op, Operation::Barrier { label: l } if l == label))
    }

    /// Total `Delay` time recorded on a qubit, in dt
    pub fn total_delay(&self, qubit: QubitId) -> u64 {
        self.operations
            .iter()
            .filter_map(|op| match op {
                Operation::Delay { qubit: q, duration } if *q == qubit => Some(*duration),
                _ => None,
            })
            .sum()
    }

    /// Whether any operation requires classical feed-forward
    pub fn has_conditionals(&self) -> bool {
        self.operations.iter().any(Operation::is_conditional)
    }

    /// Whether some measurement is followed by a further operation on a
    /// qubit
    pub fn has_mid_circuit_measurement(&self) -> bool {
        let mut measured = false;
        for op in &self.operations {
            match op {
                Operation::Measure { .. } => measured = true,
                Operation::Barrier { .. } => {}
                _ if measured => return true,
                _ => {}
            }
        }
        false
    }

    /// Build the dependency graph of this circuit
    pub fn dependency_graph(&self) -> Result<DependencyGraph> {
        DependencyGraph::from_circuit(self)
    }

    /// Number of logical steps (parallel layers), barriers excluded
    pub fn depth(&self) -> Result<usize> {
        self.dependency_graph()?.gate_depth()
    }

    /// Run all validation rules and return the full report
    pub fn validation_report(&self) -> Result<ValidationReport> {
        let dag = self.dependency_graph()?;
        Ok(ValidationReport::run_default(self, &dag))
    }

    /// Validate the circuit
    ///
    /// # Errors
    /// Returns the first failing rule as `ValidationError`
    pub fn validate(&self) -> Result<()> {
        let report = self.validation_report()?;
        match report.first_error() {
            Some(error) => Err(QuantumError::ValidationError(format!(
                "[{}] {}",
                error.rule_name, error.message
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({}, {} qubits, {} operations)",
            self.config,
            self.num_qubits(),
            self.len()
        )?;
        writeln!(f, "  {}", self.data)?;
        writeln!(f, "  {}", self.ancilla)?;
        writeln!(f, "  {}", self.syndrome)?;
        writeln!(f, "  {}", self.output)?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    fn circuit() -> Circuit {
        Circuit::new(&SynthesisConfig::velocity())
    }

    #[test]
    fn test_circuit_layout() {
        let circuit = circuit();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 5);
        assert_eq!(circuit.ancilla().qubit(0).unwrap(), QubitId::new(3));
        assert_eq!(circuit.output().bit(0).unwrap(), ClbitId::new(2));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_new_circuit_errors() {
        assert!(matches!(
            new_circuit("quadrilateral", 10, true),
            Err(QuantumError::UnsupportedTopology(_))
        ));
        assert!(matches!(
            new_circuit("line", -1, true),
            Err(QuantumError::InvalidDelay(-1))
        ));
    }

    #[test]
    fn test_push_invalid_qubit() {
        let mut circuit = circuit();
        let result = circuit.push(Operation::Init { qubit: QubitId::new(9) });
        match result {
            Err(QuantumError::InvalidQubit(idx, num)) => {
                assert_eq!(idx, 9);
                assert_eq!(num, 5);
            }
            other => panic!("Expected InvalidQubit error, got {:?}", other),
        }
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_push_duplicate_qubit() {
        let mut circuit = circuit();
        let result = circuit.push(Operation::Encode {
            control: QubitId::new(1),
            target: QubitId::new(1),
        });
        assert!(matches!(result, Err(QuantumError::DuplicateQubit(_))));
    }

    #[test]
    fn test_duplicate_measurement() {
        let mut circuit = circuit();
        circuit
            .push(Operation::Measure {
                qubit: QubitId::new(3),
                clbit: ClbitId::new(0),
            })
            .unwrap();
        assert!(circuit.is_written(ClbitId::new(0)));

        let result = circuit.push(Operation::Measure {
            qubit: QubitId::new(4),
            clbit: ClbitId::new(0),
        });
        assert!(matches!(result, Err(QuantumError::DuplicateMeasurement(c)) if c.index() == 0));
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_condition_out_of_range() {
        let mut circuit = circuit();
        let result = circuit.push(Operation::ConditionalFlip {
            qubit: QubitId::new(0),
            condition: Condition::new("syn", [ClbitId::new(7)], 1),
        });
        assert!(matches!(result, Err(QuantumError::InvalidClbit(7, 5))));
    }

    #[test]
    fn test_counts_and_delay() {
        let mut circuit = circuit();
        circuit.push(Operation::Init { qubit: QubitId::new(0) }).unwrap();
        circuit.push(Operation::barrier("INIT")).unwrap();
        circuit
            .push(Operation::Delay {
                qubit: QubitId::new(0),
                duration: 350,
            })
            .unwrap();
        circuit
            .push(Operation::Delay {
                qubit: QubitId::new(0),
                duration: 350,
            })
            .unwrap();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.count_by_kind(OperationKind::Delay), 2);
        assert_eq!(circuit.total_delay(QubitId::new(0)), 700);
        assert_eq!(circuit.total_delay(QubitId::new(1)), 0);
        assert_eq!(circuit.barrier_index("INIT"), Some(1));
        assert_eq!(circuit.kind_counts()[&OperationKind::Init], 1);
    }

    #[test]
    fn test_mid_circuit_measurement_detection() {
        let mut circuit = circuit();
        circuit
            .push(Operation::Measure {
                qubit: QubitId::new(3),
                clbit: ClbitId::new(0),
            })
            .unwrap();
        assert!(!circuit.has_mid_circuit_measurement());
        circuit.push(Operation::Init { qubit: QubitId::new(0) }).unwrap();
        assert!(circuit.has_mid_circuit_measurement());
    }

    #[test]
    fn test_display() {
        let mut circuit = circuit();
        circuit.push(Operation::Init { qubit: QubitId::new(0) }).unwrap();
        let display = format!("{}", circuit);
        assert!(display.contains("5 qubits"));
        assert!(display.contains("qreg data[3]"));
        assert!(display.contains("0: x q0"));
    }
}
