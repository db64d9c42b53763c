//! Circuit serialization for persistence and hand-off to execution services

pub mod circuit;

pub use circuit::{CircuitMetadata, SerializedCircuit};

/// Serialization format version
pub const CIRCUIT_FORMAT_VERSION: u32 = 1;
