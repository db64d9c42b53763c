//! Circuit operations
//!
//! Every step of the repetition-code circuit is one [`Operation`]. The set is
//! closed, and every variant maps computational-basis states to
//! computational-basis states, so the frame simulator in `repcode-synth` can
//! execute any circuit classically.

use crate::{ClbitId, QubitId};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Predicate over a classical register: "register value equals `value`"
///
/// Bits are listed least significant first, so bit `i` of `value` is
/// compared against `bits[i]`.
///
/// # Example
/// ```
/// use repcode_core::{ClbitId, Condition};
///
/// let cond = Condition::new("syn", vec![ClbitId::new(0), ClbitId::new(1)], 2);
/// assert!(cond.is_satisfied(|c| c.index() == 1));
/// assert!(!cond.is_satisfied(|_| true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    register: String,
    bits: SmallVec<[ClbitId; 2]>,
    value: u64,
}

impl Condition {
    pub fn new(register: impl Into<String>, bits: impl IntoIterator<Item = ClbitId>, value: u64) -> Self {
        Self {
            register: register.into(),
            bits: bits.into_iter().collect(),
            value,
        }
    }

    #[inline]
    pub fn register(&self) -> &str {
        &self.register
    }

    #[inline]
    pub fn bits(&self) -> &[ClbitId] {
        &self.bits
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Evaluate the predicate against resolved classical bits
    pub fn is_satisfied<F>(&self, read: F) -> bool
    where
        F: Fn(ClbitId) -> bool,
    {
        let observed = self
            .bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &bit)| if read(bit) { acc | (1 << i) } else { acc });
        observed == self.value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.register, self.value)
    }
}

/// A single step in the circuit
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Prepare the logical-1 basis state on a fresh qubit (an X gate)
    Init { qubit: QubitId },

    /// Controlled bit-flip copy (CNOT)
    Encode { control: QubitId, target: QubitId },

    /// Hold the qubit idle for `duration` dt
    Delay { qubit: QubitId, duration: u64 },

    /// Decoupling pulse (an X gate inside the survival window)
    FlipPulse { qubit: QubitId },

    /// Measure a qubit into a write-once classical bit
    Measure { qubit: QubitId, clbit: ClbitId },

    /// Bit flip applied only when the condition holds at runtime
    ConditionalFlip { qubit: QubitId, condition: Condition },

    /// Scheduling fence across all qubits
    Barrier { label: String },
}

/// Discriminant of [`Operation`], used for counting and reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Init,
    Encode,
    Delay,
    FlipPulse,
    Measure,
    ConditionalFlip,
    Barrier,
}

impl OperationKind {
    pub const fn name(&self) -> &'static str {
        match self {
            OperationKind::Init => "init",
            OperationKind::Encode => "encode",
            OperationKind::Delay => "delay",
            OperationKind::FlipPulse => "flip_pulse",
            OperationKind::Measure => "measure",
            OperationKind::ConditionalFlip => "conditional_flip",
            OperationKind::Barrier => "barrier",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    pub fn barrier(label: impl Into<String>) -> Self {
        Operation::Barrier { label: label.into() }
    }

    #[inline]
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Init { .. } => OperationKind::Init,
            Operation::Encode { .. } => OperationKind::Encode,
            Operation::Delay { .. } => OperationKind::Delay,
            Operation::FlipPulse { .. } => OperationKind::FlipPulse,
            Operation::Measure { .. } => OperationKind::Measure,
            Operation::ConditionalFlip { .. } => OperationKind::ConditionalFlip,
            Operation::Barrier { .. } => OperationKind::Barrier,
        }
    }

    /// Qubits this operation acts on
    ///
    /// Barriers return an empty list: they fence every qubit rather than a
    /// particular one.
    pub fn qubits(&self) -> SmallVec<[QubitId; 2]> {
        match self {
            Operation::Init { qubit }
            | Operation::Delay { qubit, .. }
            | Operation::FlipPulse { qubit }
            | Operation::Measure { qubit, .. }
            | Operation::ConditionalFlip { qubit, .. } => smallvec![*qubit],
            Operation::Encode { control, target } => smallvec![*control, *target],
            Operation::Barrier { .. } => SmallVec::new(),
        }
    }

    /// Classical bit written by this operation
    pub fn clbit_written(&self) -> Option<ClbitId> {
        match self {
            Operation::Measure { clbit, .. } => Some(*clbit),
            _ => None,
        }
    }

    /// Classical bits read by this operation
    pub fn clbits_read(&self) -> &[ClbitId] {
        match self {
            Operation::ConditionalFlip { condition, .. } => condition.bits(),
            _ => &[],
        }
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self, Operation::Barrier { .. })
    }

    #[inline]
    pub fn is_conditional(&self) -> bool {
        matches!(self, Operation::ConditionalFlip { .. })
    }

    /// Whether this operation flips the computational-basis value of its
    /// target unconditionally
    #[inline]
    pub fn is_flip(&self) -> bool {
        matches!(self, Operation::Init { .. } | Operation::FlipPulse { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Init { qubit } => write!(f, "x {}", qubit),
            Operation::Encode { control, target } => write!(f, "cx {}, {}", control, target),
            Operation::Delay { qubit, duration } => write!(f, "delay({}) {}", duration, qubit),
            Operation::FlipPulse { qubit } => write!(f, "x {} // dd", qubit),
            Operation::Measure { qubit, clbit } => write!(f, "measure {} -> {}", qubit, clbit),
            Operation::ConditionalFlip { qubit, condition } => {
                write!(f, "if ({}) x {}", condition, qubit)
            }
            Operation::Barrier { label } => write!(f, "barrier \"{}\"", label),
        }
    }
}
