//! Redundancy encoder
//!
//! Prepares logical 1 on data qubit 0 and copies it onto data qubits 1 and
//! 2 with controlled flips, so all three data qubits read `1` in the
//! absence of noise.

use crate::stage::SynthesisStage;
use repcode_core::{Circuit, Operation, Result};

/// Fence label after initialization
pub const INIT_LABEL: &str = "INIT";
/// Fence label after encoding
pub const ENCODE_LABEL: &str = "ENCODE";

/// Builds the 3-qubit encoding of logical 1
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder;

impl SynthesisStage for Encoder {
    fn name(&self) -> &str {
        "encoder"
    }

    fn description(&self) -> Option<&str> {
        Some("Init data[0] to logical 1, then copy it onto data[1] and data[2]")
    }

    fn append(&self, circuit: &mut Circuit) -> Result<()> {
        let data = circuit.data().clone();
        let source = data.qubit(0)?;

        circuit.push(Operation::Init { qubit: source })?;
        circuit.push(Operation::barrier(INIT_LABEL))?;

        for target in data.qubits().skip(1) {
            circuit.push(Operation::Encode {
                control: source,
                target,
            })?;
        }
        circuit.push(Operation::barrier(ENCODE_LABEL))
    }
}
