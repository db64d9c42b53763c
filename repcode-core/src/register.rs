//! Quantum and classical registers
//!
//! A register is a named, contiguous slice of the circuit's global qubit
//! (or classical-bit) index space. The repetition-code layout declares two
//! quantum registers (`data`, `anc`) and two classical ones (`syn`, `out`).

use crate::{ClbitId, QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the data-qubit register
pub const DATA_REGISTER: &str = "data";
/// Name of the ancilla register
pub const ANCILLA_REGISTER: &str = "anc";
/// Name of the syndrome register
pub const SYNDROME_REGISTER: &str = "syn";
/// Name of the readout register
pub const OUTPUT_REGISTER: &str = "out";

/// An ordered, fixed-size group of qubit slots
///
/// # Example
/// ```
/// use repcode_core::QubitRegister;
///
/// let anc = QubitRegister::new("anc", 3, 2);
/// assert_eq!(anc.qubit(1).unwrap().index(), 4);
/// assert!(anc.qubit(2).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRegister {
    name: String,
    offset: usize,
    size: usize,
}

impl QubitRegister {
    /// Create a register covering global indices `offset..offset + size`
    pub fn new(name: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get the global id of the `index`-th slot, if it exists
    #[inline]
    pub fn get(&self, index: usize) -> Option<QubitId> {
        (index < self.size).then(|| QubitId::new(self.offset + index))
    }

    /// Get the global id of the `index`-th slot
    ///
    /// # Errors
    /// Returns `InvalidQubit` if `index` is past the end of the register
    pub fn qubit(&self, index: usize) -> Result<QubitId> {
        self.get(index)
            .ok_or_else(|| QuantumError::invalid_qubit(self.offset + index, self.offset + self.size))
    }

    /// Iterate over all slots in order
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        (self.offset..self.offset + self.size).map(QubitId::new)
    }

    /// Check whether a global qubit id belongs to this register
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        (self.offset..self.offset + self.size).contains(&qubit.index())
    }

    /// Position of a global qubit id inside this register
    pub fn position(&self, qubit: QubitId) -> Option<usize> {
        self.contains(qubit).then(|| qubit.index() - self.offset)
    }
}

impl fmt::Display for QubitRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qreg {}[{}]", self.name, self.size)
    }
}

/// A named group of write-once classical bits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    offset: usize,
    size: usize,
}

impl ClassicalRegister {
    pub fn new(name: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<ClbitId> {
        (index < self.size).then(|| ClbitId::new(self.offset + index))
    }

    /// Get the global id of the `index`-th bit
    ///
    /// # Errors
    /// Returns `InvalidClbit` if `index` is past the end of the register
    pub fn bit(&self, index: usize) -> Result<ClbitId> {
        self.get(index)
            .ok_or_else(|| QuantumError::invalid_clbit(self.offset + index, self.offset + self.size))
    }

    /// Iterate over all bits, least significant first
    pub fn bits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        (self.offset..self.offset + self.size).map(ClbitId::new)
    }

    #[inline]
    pub fn contains(&self, clbit: ClbitId) -> bool {
        (self.offset..self.offset + self.size).contains(&clbit.index())
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creg {}[{}]", self.name, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_addressing() {
        let data = QubitRegister::new(DATA_REGISTER, 0, 3);
        let ids: Vec<usize> = data.qubits().map(|q| q.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(data.contains(QubitId::new(2)));
        assert!(!data.contains(QubitId::new(3)));
    }

    #[test]
    fn test_register_out_of_range() {
        let anc = QubitRegister::new(ANCILLA_REGISTER, 3, 2);
        match anc.qubit(5) {
            Err(QuantumError::InvalidQubit(idx, num)) => {
                assert_eq!(idx, 8);
                assert_eq!(num, 5);
            }
            other => panic!("Expected InvalidQubit error, got {:?}", other),
        }
    }

    #[test]
    fn test_position() {
        let anc = QubitRegister::new(ANCILLA_REGISTER, 3, 2);
        assert_eq!(anc.position(QubitId::new(4)), Some(1));
        assert_eq!(anc.position(QubitId::new(0)), None);
    }

    #[test]
    fn test_classical_register() {
        let out = ClassicalRegister::new(OUTPUT_REGISTER, 2, 3);
        assert_eq!(out.bit(0).unwrap(), ClbitId::new(2));
        assert!(out.bit(3).is_err());
        assert_eq!(format!("{}", out), "creg out[3]");
    }
}
