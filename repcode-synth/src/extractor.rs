//! Syndrome extractor
//!
//! Each ancilla accumulates the parity of one adjacent data pair through two
//! controlled flips and is then measured into the syndrome register. The
//! data qubits are only ever controls here, so their joint state is never
//! collapsed onto a classical value.

use crate::stage::SynthesisStage;
use repcode_core::{Circuit, Operation, Result, Topology};

/// Fence label after the syndrome measurements
pub const SYNDROME_LABEL: &str = "SYNDROME";

/// Data-qubit pair checked by each ancilla, indexed by ancilla
///
/// Bit `i` of the syndrome is the parity of `parity_pairs(..)[i]`. The star
/// variant reuses the line pairs: which pairs a star-specific check should
/// compare is not known, and the decode table depends on this choice.
pub const fn parity_pairs(topology: Topology) -> [(usize, usize); 2] {
    match topology {
        Topology::Line | Topology::Star => [(0, 1), (1, 2)],
    }
}

/// Builds the parity-check network and measures the ancillas
#[derive(Debug, Clone, Copy, Default)]
pub struct SyndromeExtractor;

impl SynthesisStage for SyndromeExtractor {
    fn name(&self) -> &str {
        "extractor"
    }

    fn description(&self) -> Option<&str> {
        Some("Accumulate adjacent data-pair parities on the ancillas and measure them")
    }

    fn append(&self, circuit: &mut Circuit) -> Result<()> {
        let data = circuit.data().clone();
        let ancilla = circuit.ancilla().clone();
        let syndrome = circuit.syndrome().clone();
        let pairs = parity_pairs(circuit.topology());

        for (i, &(left, right)) in pairs.iter().enumerate() {
            let target = ancilla.qubit(i)?;
            for control in [data.qubit(left)?, data.qubit(right)?] {
                circuit.push(Operation::Encode { control, target })?;
            }
        }

        for i in 0..pairs.len() {
            circuit.push(Operation::Measure {
                qubit: ancilla.qubit(i)?,
                clbit: syndrome.bit(i)?,
            })?;
        }
        circuit.push(Operation::barrier(SYNDROME_LABEL))
    }
}
