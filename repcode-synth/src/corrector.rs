//! Syndrome decoding and conditioned correction
//!
//! Syndrome bit 0 is set iff data qubits 0 and 1 disagree, bit 1 iff data
//! qubits 1 and 2 disagree. A single deviating qubit therefore produces
//! exactly one of four patterns, and [`Syndrome::correction`] is its
//! inverse:
//!
//! | bit1 bit0 | value | deviating qubit |
//! |-----------|-------|-----------------|
//! | 00        | 0     | none            |
//! | 01        | 1     | data 0          |
//! | 11        | 3     | data 1          |
//! | 10        | 2     | data 2          |

use crate::stage::SynthesisStage;
use repcode_core::{Circuit, Condition, Operation, QuantumError, Result, DATA_QUBITS};
use std::fmt;

/// Fence label after the correction stage
pub const CORRECTION_LABEL: &str = "CORRECTION";

/// A measured 2-bit syndrome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Syndrome {
    /// All data qubits agree
    Clean = 0b00,
    /// Data qubit 0 disagrees with 1 and 2
    Qubit0 = 0b01,
    /// Data qubit 2 disagrees with 0 and 1
    Qubit2 = 0b10,
    /// Data qubit 1 disagrees with 0 and 2
    Qubit1 = 0b11,
}

impl Syndrome {
    pub const ALL: [Syndrome; 4] = [Syndrome::Clean, Syndrome::Qubit0, Syndrome::Qubit2, Syndrome::Qubit1];

    /// Assemble a syndrome from its two measured bits
    pub const fn from_bits(bit0: bool, bit1: bool) -> Self {
        match (bit1, bit0) {
            (false, false) => Syndrome::Clean,
            (false, true) => Syndrome::Qubit0,
            (true, false) => Syndrome::Qubit2,
            (true, true) => Syndrome::Qubit1,
        }
    }

    /// Syndrome of a data-qubit basis state
    ///
    /// # Example
    /// ```
    /// use repcode_synth::Syndrome;
    ///
    /// assert_eq!(Syndrome::of_data([true, true, true]), Syndrome::Clean);
    /// assert_eq!(Syndrome::of_data([true, false, true]), Syndrome::Qubit1);
    /// ```
    pub const fn of_data(data: [bool; DATA_QUBITS]) -> Self {
        Self::from_bits(data[0] ^ data[1], data[1] ^ data[2])
    }

    /// Syndrome a flip of `data_qubit` produces on an agreeing code block
    pub const fn of_deviation(data_qubit: Option<usize>) -> Option<Self> {
        match data_qubit {
            None => Some(Syndrome::Clean),
            Some(0) => Some(Syndrome::Qubit0),
            Some(1) => Some(Syndrome::Qubit1),
            Some(2) => Some(Syndrome::Qubit2),
            Some(_) => None,
        }
    }

    /// Decimal value of the syndrome register
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn bit0(self) -> bool {
        self.value() & 0b01 != 0
    }

    pub const fn bit1(self) -> bool {
        self.value() & 0b10 != 0
    }

    /// Data qubit to flip for this syndrome
    pub const fn correction(self) -> Option<usize> {
        match self {
            Syndrome::Clean => None,
            Syndrome::Qubit0 => Some(0),
            Syndrome::Qubit1 => Some(1),
            Syndrome::Qubit2 => Some(2),
        }
    }
}

impl TryFrom<u8> for Syndrome {
    type Error = QuantumError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Syndrome::Clean),
            1 => Ok(Syndrome::Qubit0),
            2 => Ok(Syndrome::Qubit2),
            3 => Ok(Syndrome::Qubit1),
            other => Err(QuantumError::ValidationError(format!(
                "Syndrome value {} does not fit in 2 bits",
                other
            ))),
        }
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", u8::from(self.bit1()), u8::from(self.bit0()))
    }
}

/// Fixed syndrome → correction mapping
///
/// Constructed once; lookups are pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyndromeDecodeTable {
    entries: [Option<usize>; 4],
}

/// The decode table for the distance-3 bit-flip code
pub static DECODE_TABLE: SyndromeDecodeTable = SyndromeDecodeTable::new();

impl SyndromeDecodeTable {
    pub const fn new() -> Self {
        let mut entries = [None; 4];
        let mut i = 0;
        while i < Syndrome::ALL.len() {
            let syndrome = Syndrome::ALL[i];
            entries[syndrome.value() as usize] = syndrome.correction();
            i += 1;
        }
        Self { entries }
    }

    /// Data qubit to flip for a syndrome
    #[inline]
    pub const fn lookup(&self, syndrome: Syndrome) -> Option<usize> {
        self.entries[syndrome.value() as usize]
    }

    /// Non-trivial entries as `(syndrome, data qubit)`, by data qubit
    pub fn corrections(&self) -> impl Iterator<Item = (Syndrome, usize)> + '_ {
        let mut entries: Vec<(Syndrome, usize)> = Syndrome::ALL
            .iter()
            .filter_map(|&s| self.lookup(s).map(|q| (s, q)))
            .collect();
        entries.sort_by_key(|&(_, q)| q);
        entries.into_iter()
    }
}

impl Default for SyndromeDecodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends one independently conditioned flip per non-trivial syndrome
///
/// Every flip's predicate compares the whole syndrome register against a
/// distinct value, so at most one fires in any execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyndromeCorrector;

impl SynthesisStage for SyndromeCorrector {
    fn name(&self) -> &str {
        "corrector"
    }

    fn description(&self) -> Option<&str> {
        Some("Flip the data qubit the measured syndrome points at")
    }

    fn append(&self, circuit: &mut Circuit) -> Result<()> {
        let data = circuit.data().clone();
        let syndrome = circuit.syndrome().clone();

        for (value, data_qubit) in DECODE_TABLE.corrections() {
            circuit.push(Operation::ConditionalFlip {
                qubit: data.qubit(data_qubit)?,
                condition: Condition::new(syndrome.name(), syndrome.bits(), u64::from(value.value())),
            })?;
        }
        circuit.push(Operation::barrier(CORRECTION_LABEL))
    }
}
