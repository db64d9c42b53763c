//! Qubit and classical-bit addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit
///
/// Indices are global across the circuit: data qubits come first, then
/// ancillas.
///
/// # Example
/// ```
/// use repcode_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

/// Type-safe identifier for a classical bit
///
/// # Example
/// ```
/// use repcode_core::ClbitId;
///
/// let c = ClbitId::new(2);
/// assert_eq!(c.index(), 2);
/// assert_eq!(c.to_string(), "c2");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClbitId(usize);

impl ClbitId {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<usize> for ClbitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        let q0 = QubitId::new(0);
        let q1 = QubitId::new(1);
        let q2 = QubitId::new(2);

        assert!(q0 < q1);
        assert!(q1 < q2);
        assert!(q2 > q0);
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId::new(4)), "q4");
    }

    #[test]
    fn test_qubit_conversions() {
        let q: QubitId = 3.into();
        let i: usize = q.into();
        assert_eq!(i, 3);
    }

    #[test]
    fn test_clbit_display() {
        assert_eq!(format!("{}", ClbitId::new(0)), "c0");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&QubitId::new(2)).unwrap(), "2");
        let c: ClbitId = serde_json::from_str("4").unwrap();
        assert_eq!(c.index(), 4);
    }
}
