//! Synthesis of the distance-3 repetition-code circuit
//!
//! The circuit is assembled by five stages, each appending to the same
//! [`Circuit`](repcode_core::Circuit):
//! - [`Encoder`]: prepare logical 1 and copy it onto all data qubits
//! - [`NoiseSurvivalScheduler`]: idle the data qubits, optionally decoupled
//! - [`SyndromeExtractor`]: measure adjacent-pair parities via the ancillas
//! - [`SyndromeCorrector`]: classically conditioned flips from the decode table
//! - [`Readout`]: measure the data qubits into the output register
//!
//! # Example
//! ```
//! use repcode_synth::build_circuit;
//!
//! let circuit = build_circuit("line", true, 700).unwrap();
//! assert_eq!(circuit.gate_count(), 27);
//! assert!(circuit.has_conditionals());
//! ```

pub mod corrector;
pub mod encoder;
pub mod extractor;
pub mod frame;
pub mod readout;
pub mod scheduler;
pub mod stage;
pub mod synthesizer;

pub use corrector::{Syndrome, SyndromeCorrector, SyndromeDecodeTable, DECODE_TABLE};
pub use encoder::Encoder;
pub use extractor::{parity_pairs, SyndromeExtractor};
pub use frame::{FrameOutcome, FrameSimulator, Injection};
pub use readout::Readout;
pub use scheduler::NoiseSurvivalScheduler;
pub use stage::{StageStatistics, SynthesisStage};
pub use synthesizer::{SynthesisReport, Synthesizer};

use repcode_core::{Circuit, Result, SynthesisConfig};

/// Build the full circuit from raw parameters
///
/// # Errors
/// - `UnsupportedTopology` for a tag other than `line` or `star`
/// - `InvalidDelay` for a negative window
pub fn build_circuit(topology: &str, use_decoupling: bool, delay_duration: i64) -> Result<Circuit> {
    let config = SynthesisConfig::parse(topology, use_decoupling, delay_duration)?;
    synthesize(&config)
}

/// Build the full circuit for a validated configuration
pub fn synthesize(config: &SynthesisConfig) -> Result<Circuit> {
    Synthesizer::standard().synthesize(config)
}
