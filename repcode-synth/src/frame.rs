//! Bit-flip frame simulator
//!
//! Every operation a synthesized circuit contains maps computational basis
//! states to computational basis states, so a single flip error can be
//! followed exactly by tracking one classical bit per qubit. This is
//! enough to check that the decode table undoes every single-qubit
//! deviation without a state-vector backend.

use crate::corrector::Syndrome;
use repcode_core::{Circuit, ClbitId, Operation, QuantumError, QubitId, Result};
use tracing::trace;

/// A bit flip forced onto a qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injection {
    pub qubit: QubitId,
    /// Index of the operation the flip happens before
    pub before: usize,
}

/// Result of running a circuit through [`FrameSimulator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    qubits: Vec<bool>,
    clbits: Vec<Option<bool>>,
    syndrome: Option<Syndrome>,
    output: Vec<bool>,
    corrections: Vec<QubitId>,
}

impl FrameOutcome {
    /// Final basis value of a qubit
    pub fn qubit(&self, qubit: QubitId) -> Option<bool> {
        self.qubits.get(qubit.index()).copied()
    }

    /// Recorded classical bit; `None` if never measured
    pub fn clbit(&self, clbit: ClbitId) -> Option<bool> {
        self.clbits.get(clbit.index()).copied().flatten()
    }

    /// Measured syndrome, if both syndrome bits were written
    pub fn syndrome(&self) -> Option<Syndrome> {
        self.syndrome
    }

    /// Output register bits, index `i` holding data qubit `i`
    pub fn output(&self) -> &[bool] {
        &self.output
    }

    /// Qubits flipped by conditional corrections, in firing order
    pub fn corrections(&self) -> &[QubitId] {
        &self.corrections
    }

    /// Decoded logical value, if the whole output register was read and agrees
    pub fn logical_value(&self) -> Option<bool> {
        let (&first, rest) = self.output.split_first()?;
        rest.iter().all(|&b| b == first).then_some(first)
    }
}

/// Classical executor for bit-flip-only circuits
#[derive(Debug, Clone, Default)]
pub struct FrameSimulator {
    injections: Vec<Injection>,
}

impl FrameSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `qubit` immediately before operation `before` executes
    pub fn with_injection(mut self, qubit: QubitId, before: usize) -> Self {
        self.injections.push(Injection { qubit, before });
        self
    }

    pub fn injections(&self) -> &[Injection] {
        &self.injections
    }

    /// Execute the circuit from the all-zero state
    ///
    /// # Errors
    /// - `InvalidQubit` if an injection targets a qubit outside the circuit
    /// - `ValidationError` if a conditional reads a classical bit that no
    ///   earlier measurement wrote
    pub fn run(&self, circuit: &Circuit) -> Result<FrameOutcome> {
        let mut qubits = vec![false; circuit.num_qubits()];
        let mut clbits: Vec<Option<bool>> = vec![None; circuit.num_clbits()];
        let mut corrections = Vec::new();

        for injection in &self.injections {
            if injection.qubit.index() >= qubits.len() {
                return Err(QuantumError::invalid_qubit(injection.qubit.index(), qubits.len()));
            }
        }

        for (index, op) in circuit.operations().enumerate() {
            for injection in self.injections.iter().filter(|inj| inj.before == index) {
                trace!(qubit = %injection.qubit, before = index, "injected flip");
                qubits[injection.qubit.index()] ^= true;
            }

            match op {
                Operation::Init { qubit } | Operation::FlipPulse { qubit } => {
                    qubits[qubit.index()] ^= true;
                }
                Operation::Encode { control, target } => {
                    qubits[target.index()] ^= qubits[control.index()];
                }
                Operation::Measure { qubit, clbit } => {
                    clbits[clbit.index()] = Some(qubits[qubit.index()]);
                }
                Operation::ConditionalFlip { qubit, condition } => {
                    if let Some(&missing) = condition.bits().iter().find(|c| clbits[c.index()].is_none()) {
                        return Err(QuantumError::ValidationError(format!(
                            "Operation {} reads {} before it is measured",
                            index, missing
                        )));
                    }
                    if condition.is_satisfied(|c| clbits[c.index()].unwrap_or(false)) {
                        trace!(qubit = %qubit, condition = %condition, "correction fired");
                        qubits[qubit.index()] ^= true;
                        corrections.push(*qubit);
                    }
                }
                Operation::Delay { .. } | Operation::Barrier { .. } => {}
            }
        }

        for injection in self.injections.iter().filter(|inj| inj.before >= circuit.len()) {
            qubits[injection.qubit.index()] ^= true;
        }

        let read = |bit: ClbitId| clbits.get(bit.index()).copied().flatten();
        let syndrome_register = circuit.syndrome();
        let syndrome = match (
            syndrome_register.get(0).and_then(read),
            syndrome_register.get(1).and_then(read),
        ) {
            (Some(bit0), Some(bit1)) => Some(Syndrome::from_bits(bit0, bit1)),
            _ => None,
        };
        let output = circuit.output().bits().filter_map(read).collect();

        Ok(FrameOutcome {
            qubits,
            clbits,
            syndrome,
            output,
            corrections,
        })
    }
}
