//! Property-based tests for the synthesized circuit
//!
//! These hold for every topology, window length and decoupling choice.

use proptest::prelude::*;
use repcode_core::{OperationKind, QubitId, SynthesisConfig, Topology};
use repcode_synth::{synthesize, FrameSimulator, Syndrome};

fn config_strategy() -> impl Strategy<Value = SynthesisConfig> {
    (
        prop::sample::select(Topology::ALL.to_vec()),
        any::<bool>(),
        0i64..1_000_000,
    )
        .prop_map(|(topology, decoupling, delay)| {
            SynthesisConfig::new(topology, decoupling, delay).unwrap()
        })
}

proptest! {
    /// Every data qubit idles for exactly the configured window.
    #[test]
    fn prop_data_idle_matches_window(config in config_strategy()) {
        let circuit = synthesize(&config).unwrap();
        for i in 0..3 {
            prop_assert_eq!(circuit.total_delay(QubitId::new(i)), config.delay_duration());
        }
        for i in 3..5 {
            prop_assert_eq!(circuit.total_delay(QubitId::new(i)), 0);
        }
    }

    /// Flip pulses come in pairs per data qubit, so the window is the identity.
    #[test]
    fn prop_flip_pulses_pair_up(config in config_strategy()) {
        let circuit = synthesize(&config).unwrap();
        let expected = if config.use_decoupling() { 6 } else { 0 };
        prop_assert_eq!(circuit.count_by_kind(OperationKind::FlipPulse), expected);

        let outcome = FrameSimulator::new().run(&circuit).unwrap();
        prop_assert_eq!(outcome.syndrome(), Some(Syndrome::Clean));
        prop_assert_eq!(outcome.logical_value(), Some(true));
    }

    /// Shape depends only on the decoupling flag.
    #[test]
    fn prop_operation_count(config in config_strategy()) {
        let circuit = synthesize(&config).unwrap();
        let expected = if config.use_decoupling() { 27 } else { 18 };
        prop_assert_eq!(circuit.gate_count(), expected);
        prop_assert_eq!(circuit.count_by_kind(OperationKind::ConditionalFlip), 3);
        prop_assert_eq!(circuit.count_by_kind(OperationKind::Measure), 5);
    }

    /// Any single data flip after the window is undone before readout.
    #[test]
    fn prop_single_flip_corrected(config in config_strategy(), data_qubit in 0usize..3) {
        let circuit = synthesize(&config).unwrap();
        let label = format!("DELAY_{}dt", config.delay_duration());
        let at = circuit.barrier_index(&label).unwrap() + 1;

        let outcome = FrameSimulator::new()
            .with_injection(QubitId::new(data_qubit), at)
            .run(&circuit)
            .unwrap();
        prop_assert_eq!(outcome.corrections(), &[QubitId::new(data_qubit)][..]);
        prop_assert_eq!(outcome.logical_value(), Some(true));
    }

    /// Negative windows are always rejected.
    #[test]
    fn prop_negative_delay_rejected(delay in i64::MIN..0) {
        prop_assert!(SynthesisConfig::new(Topology::Line, true, delay).is_err());
    }
}
