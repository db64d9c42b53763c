//! Synthesize the velocity and endurance circuits and exercise them
//!
//! Run with `RUST_LOG=repcode_synth=debug` to see per-stage logging.

use repcode_core::{QubitId, Result, SynthesisConfig};
use repcode_synth::{FrameSimulator, Synthesizer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let synthesizer = Synthesizer::standard();

    for config in [SynthesisConfig::velocity(), SynthesisConfig::endurance(1000)] {
        let (circuit, report) = synthesizer.synthesize_with_report(&config)?;
        info!(
            config = %config,
            operations = circuit.gate_count(),
            depth = circuit.depth()?,
            time_us = report.total_time_us,
            "synthesized"
        );
        println!("{}", circuit);

        let label = format!("DELAY_{}dt", config.delay_duration());
        let Some(fence) = circuit.barrier_index(&label) else {
            continue;
        };
        for data_qubit in 0..3 {
            let outcome = FrameSimulator::new()
                .with_injection(QubitId::new(data_qubit), fence + 1)
                .run(&circuit)?;
            println!(
                "  flip on q{} -> syndrome {:?}, corrected {:?}, output {:?}",
                data_qubit,
                outcome.syndrome(),
                outcome.corrections(),
                outcome.output()
            );
        }
    }

    Ok(())
}
