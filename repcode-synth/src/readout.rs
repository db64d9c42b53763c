//! Final readout of the data qubits

use crate::stage::SynthesisStage;
use repcode_core::{Circuit, Operation, Result};

/// Measures data qubit `i` into output bit `i`
#[derive(Debug, Clone, Copy, Default)]
pub struct Readout;

impl SynthesisStage for Readout {
    fn name(&self) -> &str {
        "readout"
    }

    fn append(&self, circuit: &mut Circuit) -> Result<()> {
        let data = circuit.data().clone();
        let output = circuit.output().clone();
        for (i, qubit) in data.qubits().enumerate() {
            circuit.push(Operation::Measure {
                qubit,
                clbit: output.bit(i)?,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcode_core::{ClbitId, QuantumError, QubitId, SynthesisConfig};

    #[test]
    fn test_readout_mapping() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        Readout.append(&mut circuit).unwrap();
        for (i, op) in circuit.operations().enumerate() {
            assert_eq!(
                *op,
                Operation::Measure {
                    qubit: QubitId::new(i),
                    clbit: ClbitId::new(2 + i)
                }
            );
        }
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_second_readout_rejected() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        Readout.append(&mut circuit).unwrap();
        assert!(matches!(
            Readout.append(&mut circuit),
            Err(QuantumError::DuplicateMeasurement(_))
        ));
    }
}
