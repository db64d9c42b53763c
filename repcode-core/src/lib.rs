//! Circuit model for distance-3 repetition-code synthesis
//!
//! This crate provides the types every synthesis stage appends to:
//! - [`QubitId`] / [`ClbitId`]: type-safe addressing
//! - [`QubitRegister`] / [`ClassicalRegister`]: the code's register layout
//! - [`Operation`]: the closed set of circuit steps
//! - [`Circuit`]: the ordered operation container
//! - [`SynthesisConfig`]: validated topology, delay and decoupling choice
//!
//! # Example
//! ```
//! use repcode_core::{Circuit, Operation, SynthesisConfig};
//!
//! let mut circuit = Circuit::new(&SynthesisConfig::velocity());
//! let d0 = circuit.data().qubit(0).unwrap();
//! circuit.push(Operation::Init { qubit: d0 }).unwrap();
//! assert_eq!(circuit.len(), 1);
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod operation;
pub mod qubit;
pub mod register;
pub mod serialization;
pub mod timing;
pub mod validation;

pub use circuit::{new_circuit, Circuit, ANCILLA_QUBITS, DATA_QUBITS, OUTPUT_BITS, SYNDROME_BITS};
pub use config::{SynthesisConfig, Topology, ENDURANCE_DELAY_DT, VELOCITY_DELAY_DT};
pub use error::QuantumError;
pub use operation::{Condition, Operation, OperationKind};
pub use qubit::{ClbitId, QubitId};
pub use register::{ClassicalRegister, QubitRegister};

/// Type alias for results in repcode
pub type Result<T> = std::result::Result<T, QuantumError>;
