//! Noise-survival scheduler
//!
//! Holds every data qubit idle for exactly the configured window. In
//! decoupling mode the window is split around a flip pulse and closed by a
//! second flip, so slow dephasing accumulated in the first half is undone
//! in the second while the net logical action stays the identity.

use crate::stage::SynthesisStage;
use repcode_core::{Circuit, Operation, Result};

/// Fence label closing the survival window
pub fn window_label(delay_duration: u64) -> String {
    format!("DELAY_{}dt", delay_duration)
}

/// Split a window into two halves, the odd remainder going to the first
///
/// # Example
/// ```
/// use repcode_synth::scheduler::split_window;
///
/// assert_eq!(split_window(700), (350, 350));
/// assert_eq!(split_window(701), (351, 350));
/// assert_eq!(split_window(0), (0, 0));
/// ```
pub const fn split_window(delay_duration: u64) -> (u64, u64) {
    let second = delay_duration / 2;
    (delay_duration - second, second)
}

/// Inserts the survival window on the data qubits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseSurvivalScheduler;

impl NoiseSurvivalScheduler {
    fn append_passive(circuit: &mut Circuit, delay_duration: u64) -> Result<()> {
        let data = circuit.data().clone();
        for qubit in data.qubits() {
            circuit.push(Operation::Delay {
                qubit,
                duration: delay_duration,
            })?;
        }
        Ok(())
    }

    fn append_decoupled(circuit: &mut Circuit, delay_duration: u64) -> Result<()> {
        let (first, second) = split_window(delay_duration);
        let data = circuit.data().clone();
        for qubit in data.qubits() {
            circuit.push(Operation::Delay {
                qubit,
                duration: first,
            })?;
            circuit.push(Operation::FlipPulse { qubit })?;
            circuit.push(Operation::Delay {
                qubit,
                duration: second,
            })?;
            circuit.push(Operation::FlipPulse { qubit })?;
        }
        Ok(())
    }
}

impl SynthesisStage for NoiseSurvivalScheduler {
    fn name(&self) -> &str {
        "scheduler"
    }

    fn description(&self) -> Option<&str> {
        Some("Idle the data qubits for the survival window, optionally with a decoupling pulse pair")
    }

    fn append(&self, circuit: &mut Circuit) -> Result<()> {
        let delay_duration = circuit.delay_duration();
        if circuit.uses_decoupling() {
            Self::append_decoupled(circuit, delay_duration)?;
        } else {
            Self::append_passive(circuit, delay_duration)?;
        }
        circuit.push(Operation::barrier(window_label(delay_duration)))
    }
}
