//! Logical-to-physical qubit layout

use crate::{BackendError, Result};
use repcode_core::{Circuit, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Placement of a circuit's qubits on a device
///
/// Logical qubit `i` (global index: data first, then ancillas) runs on
/// physical qubit `physical(i)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMapping {
    logical_to_physical: Vec<usize>,
}

impl QubitMapping {
    /// Logical qubit `i` on physical qubit `i`
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            logical_to_physical: (0..num_qubits).collect(),
        }
    }

    /// Build a mapping from an explicit layout
    ///
    /// # Errors
    /// Returns `InvalidRecommendation` if a physical qubit appears twice
    pub fn from_vec(layout: Vec<usize>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(layout.len());
        if let Some(&dup) = layout.iter().find(|&&p| !seen.insert(p)) {
            return Err(BackendError::InvalidRecommendation(format!(
                "Physical qubit {} assigned twice in layout {:?}",
                dup, layout
            )));
        }
        Ok(Self {
            logical_to_physical: layout,
        })
    }

    /// Use the first `circuit.num_qubits()` entries of a recommended layout
    ///
    /// # Errors
    /// Returns `InvalidRecommendation` if the layout is too short or not
    /// injective
    pub fn for_circuit(circuit: &Circuit, layout: &[usize]) -> Result<Self> {
        let needed = circuit.num_qubits();
        if layout.len() < needed {
            return Err(BackendError::InvalidRecommendation(format!(
                "Layout has {} qubits, circuit needs {}",
                layout.len(),
                needed
            )));
        }
        Self::from_vec(layout[..needed].to_vec())
    }

    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    pub fn physical(&self, logical: QubitId) -> Option<usize> {
        self.logical_to_physical.get(logical.index()).copied()
    }

    pub fn logical(&self, physical: usize) -> Option<QubitId> {
        self.logical_to_physical
            .iter()
            .position(|&p| p == physical)
            .map(QubitId::new)
    }

    /// Largest physical index used, if any
    pub fn max_physical(&self) -> Option<usize> {
        self.logical_to_physical.iter().copied().max()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.logical_to_physical
    }
}

impl fmt::Display for QubitMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .logical_to_physical
            .iter()
            .enumerate()
            .map(|(l, p)| format!("q{}->{}", l, p))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcode_core::SynthesisConfig;

    #[test]
    fn test_identity() {
        let mapping = QubitMapping::identity(5);
        assert_eq!(mapping.physical(QubitId::new(3)), Some(3));
        assert_eq!(mapping.logical(4), Some(QubitId::new(4)));
        assert_eq!(mapping.physical(QubitId::new(5)), None);
    }

    #[test]
    fn test_duplicate_physical_qubit() {
        assert!(matches!(
            QubitMapping::from_vec(vec![12, 13, 12]),
            Err(BackendError::InvalidRecommendation(_))
        ));
    }

    #[test]
    fn test_for_circuit_truncates() {
        let circuit = Circuit::new(&SynthesisConfig::velocity());
        let mapping = QubitMapping::for_circuit(&circuit, &[40, 41, 42, 43, 44, 45]).unwrap();
        assert_eq!(mapping.len(), 5);
        assert_eq!(mapping.max_physical(), Some(44));
        assert_eq!(mapping.to_string(), "[q0->40, q1->41, q2->42, q3->43, q4->44]");

        assert!(QubitMapping::for_circuit(&circuit, &[1, 2, 3]).is_err());
    }
}
