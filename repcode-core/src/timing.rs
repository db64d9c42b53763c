//! Timing skeleton of a circuit
//!
//! Walks a circuit in order and tracks, per qubit, the time at which it
//! becomes free, how much of that time is explicit `Delay`, and when each
//! classical bit resolves. Barriers align every qubit to the latest one.
//! All durations are in dt, the backend sample-time unit.
//!
//! This is a schedule, not a noise model: it never turns time into a
//! fidelity estimate.
//!
//! # Example
//!
//! ```
//! use repcode_core::timing::{GateTiming, QubitTimeTracker};
//! use repcode_core::{Circuit, Operation, QubitId, SynthesisConfig};
//!
//! let mut circuit = Circuit::new(&SynthesisConfig::velocity());
//! circuit.push(Operation::Delay { qubit: QubitId::new(0), duration: 700 }).unwrap();
//!
//! let tracker = QubitTimeTracker::from_circuit(&circuit, GateTiming::default());
//! assert_eq!(tracker.explicit_delay(0), 700);
//! assert_eq!(tracker.total_time(), 700);
//! ```

use crate::{Circuit, Operation};

/// Operation durations in dt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTiming {
    /// Duration of `Init`, `FlipPulse` and the flip of a `ConditionalFlip`
    pub single_qubit_gate_time: u64,

    /// Duration of `Encode`
    pub two_qubit_gate_time: u64,

    /// Measurement time
    pub measurement_time: u64,

    /// Delay between a measurement resolving and a conditioned operation
    /// being able to act on it
    pub feed_forward_latency: u64,
}

impl Default for GateTiming {
    fn default() -> Self {
        Self {
            single_qubit_gate_time: 160,
            two_qubit_gate_time: 1_600,
            measurement_time: 18_000,
            feed_forward_latency: 2_000,
        }
    }
}

impl GateTiming {
    /// Zero-duration gates, so only explicit delays take time
    pub fn delays_only() -> Self {
        Self {
            single_qubit_gate_time: 0,
            two_qubit_gate_time: 0,
            measurement_time: 0,
            feed_forward_latency: 0,
        }
    }
}

/// Tracks execution time for each qubit in a circuit
#[derive(Debug, Clone)]
pub struct QubitTimeTracker {
    num_qubits: usize,

    /// Time at which each qubit is next free
    qubit_times: Vec<u64>,

    /// Explicit `Delay` time accumulated on each qubit
    explicit_delays: Vec<u64>,

    /// Time at which each classical bit resolves
    clbit_ready: Vec<Option<u64>>,

    timing: GateTiming,

    total_time: u64,
}

impl QubitTimeTracker {
    /// Create a new time tracker
    pub fn new(num_qubits: usize, num_clbits: usize, timing: GateTiming) -> Self {
        Self {
            num_qubits,
            qubit_times: vec![0; num_qubits],
            explicit_delays: vec![0; num_qubits],
            clbit_ready: vec![None; num_clbits],
            timing,
            total_time: 0,
        }
    }

    /// Replay a whole circuit
    pub fn from_circuit(circuit: &Circuit, timing: GateTiming) -> Self {
        let mut tracker = Self::new(circuit.num_qubits(), circuit.num_clbits(), timing);
        for op in circuit.operations() {
            tracker.apply(op);
        }
        tracker
    }

    /// Advance the schedule by one operation
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Init { qubit } | Operation::FlipPulse { qubit } => {
                self.advance_qubit_time(qubit.index(), self.timing.single_qubit_gate_time);
            }
            Operation::Encode { control, target } => {
                self.apply_two_qubit_gate(control.index(), target.index());
            }
            Operation::Delay { qubit, duration } => {
                if let Some(slot) = self.explicit_delays.get_mut(qubit.index()) {
                    *slot += duration;
                }
                self.advance_qubit_time(qubit.index(), *duration);
            }
            Operation::Measure { qubit, clbit } => {
                self.advance_qubit_time(qubit.index(), self.timing.measurement_time);
                if let (Some(slot), Some(&done)) = (
                    self.clbit_ready.get_mut(clbit.index()),
                    self.qubit_times.get(qubit.index()),
                ) {
                    *slot = Some(done);
                }
            }
            Operation::ConditionalFlip { qubit, condition } => {
                let resolved = condition
                    .bits()
                    .iter()
                    .filter_map(|c| self.clbit_ready.get(c.index()).copied().flatten())
                    .max()
                    .unwrap_or(0);
                let q = qubit.index();
                if q < self.num_qubits {
                    let start = self.qubit_times[q].max(resolved + self.timing.feed_forward_latency);
                    self.qubit_times[q] = start + self.timing.single_qubit_gate_time;
                    self.update_total_time();
                }
            }
            Operation::Barrier { .. } => self.synchronize_all_qubits(),
        }
    }

    /// Apply a two-qubit gate; it starts once both qubits are free
    pub fn apply_two_qubit_gate(&mut self, qubit1: usize, qubit2: usize) {
        if qubit1 < self.num_qubits && qubit2 < self.num_qubits {
            let start = self.qubit_times[qubit1].max(self.qubit_times[qubit2]);
            let end = start + self.timing.two_qubit_gate_time;
            self.qubit_times[qubit1] = end;
            self.qubit_times[qubit2] = end;
            self.update_total_time();
        }
    }

    /// Advance a qubit's time by a specific duration
    pub fn advance_qubit_time(&mut self, qubit: usize, duration: u64) {
        if qubit < self.num_qubits {
            self.qubit_times[qubit] += duration;
            self.update_total_time();
        }
    }

    /// Get the current time for a specific qubit
    pub fn qubit_time(&self, qubit: usize) -> Option<u64> {
        self.qubit_times.get(qubit).copied()
    }

    /// Total explicit `Delay` recorded on a qubit
    pub fn explicit_delay(&self, qubit: usize) -> u64 {
        self.explicit_delays.get(qubit).copied().unwrap_or(0)
    }

    /// Time at which a classical bit resolved, if it has been measured
    pub fn clbit_ready(&self, clbit: usize) -> Option<u64> {
        self.clbit_ready.get(clbit).copied().flatten()
    }

    /// Idle time of a qubit relative to the latest qubit
    pub fn idle_time_since_last_operation(&self, qubit: usize) -> u64 {
        self.qubit_times
            .get(qubit)
            .map(|&t| self.total_time - t)
            .unwrap_or(0)
    }

    pub fn all_idle_times(&self) -> Vec<u64> {
        (0..self.num_qubits)
            .map(|q| self.idle_time_since_last_operation(q))
            .collect()
    }

    /// Synchronize all qubits to the current total time
    pub fn synchronize_all_qubits(&mut self) {
        for qubit_time in &mut self.qubit_times {
            *qubit_time = self.total_time;
        }
    }

    /// Schedule length
    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn timing(&self) -> &GateTiming {
        &self.timing
    }

    fn update_total_time(&mut self) {
        self.total_time = self.qubit_times.iter().copied().max().unwrap_or(0);
    }
}
