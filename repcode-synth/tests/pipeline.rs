//! End-to-end tests for the synthesized circuit

use repcode_core::{
    timing::{GateTiming, QubitTimeTracker},
    ClbitId, Condition, Operation, OperationKind, QuantumError, QubitId, SynthesisConfig, Topology,
};
use repcode_synth::{build_circuit, synthesize, Synthesizer};

#[test]
fn test_velocity_circuit_shape() {
    let circuit = build_circuit("line", true, 700).unwrap();
    assert_eq!(circuit.gate_count(), 27);

    let ops: Vec<&Operation> = circuit.operations().filter(|op| !op.is_barrier()).collect();
    let q = QubitId::new;
    let c = ClbitId::new;

    // Encoding
    assert_eq!(*ops[0], Operation::Init { qubit: q(0) });
    assert_eq!(*ops[1], Operation::Encode { control: q(0), target: q(1) });
    assert_eq!(*ops[2], Operation::Encode { control: q(0), target: q(2) });

    // Survival window, 350 + 350 with a flip pair per data qubit
    for (i, chunk) in ops[3..15].chunks(4).enumerate() {
        assert_eq!(
            chunk,
            &[
                &Operation::Delay { qubit: q(i), duration: 350 },
                &Operation::FlipPulse { qubit: q(i) },
                &Operation::Delay { qubit: q(i), duration: 350 },
                &Operation::FlipPulse { qubit: q(i) },
            ]
        );
    }

    // Parity checks and syndrome measurement
    assert_eq!(*ops[15], Operation::Encode { control: q(0), target: q(3) });
    assert_eq!(*ops[16], Operation::Encode { control: q(1), target: q(3) });
    assert_eq!(*ops[17], Operation::Encode { control: q(1), target: q(4) });
    assert_eq!(*ops[18], Operation::Encode { control: q(2), target: q(4) });
    assert_eq!(*ops[19], Operation::Measure { qubit: q(3), clbit: c(0) });
    assert_eq!(*ops[20], Operation::Measure { qubit: q(4), clbit: c(1) });

    // Corrections
    let syn = [c(0), c(1)];
    assert_eq!(
        *ops[21],
        Operation::ConditionalFlip { qubit: q(0), condition: Condition::new("syn", syn, 1) }
    );
    assert_eq!(
        *ops[22],
        Operation::ConditionalFlip { qubit: q(1), condition: Condition::new("syn", syn, 3) }
    );
    assert_eq!(
        *ops[23],
        Operation::ConditionalFlip { qubit: q(2), condition: Condition::new("syn", syn, 2) }
    );

    // Readout
    for i in 0..3 {
        assert_eq!(*ops[24 + i], Operation::Measure { qubit: q(i), clbit: c(2 + i) });
    }
}

#[test]
fn test_barrier_labels_in_order() {
    let circuit = build_circuit("line", true, 700).unwrap();
    let labels: Vec<&str> = circuit
        .operations()
        .filter_map(|op| match op {
            Operation::Barrier { label } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["INIT", "ENCODE", "DELAY_700dt", "SYNDROME", "CORRECTION"]);
}

#[test]
fn test_passive_endurance_circuit() {
    let circuit = build_circuit("star", false, 1000).unwrap();
    assert_eq!(circuit.count_by_kind(OperationKind::FlipPulse), 0);
    assert_eq!(circuit.count_by_kind(OperationKind::Delay), 3);
    assert_eq!(circuit.gate_count(), 27 - 9);
    for i in 0..3 {
        assert_eq!(circuit.total_delay(QubitId::new(i)), 1000);
    }
}

#[test]
fn test_topology_tags_match_exactly() {
    assert_eq!(build_circuit("line", true, 700).unwrap().topology(), Topology::Line);
    for tag in ["LINE", " star ", "Star"] {
        assert!(matches!(
            build_circuit(tag, true, 700),
            Err(QuantumError::UnsupportedTopology(ref t)) if t == tag
        ));
    }
}

#[test]
fn test_synthesis_is_deterministic() {
    for config in [SynthesisConfig::velocity(), SynthesisConfig::endurance(1000)] {
        let first = synthesize(&config).unwrap();
        let second = synthesize(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn test_unsupported_topology() {
    let err = build_circuit("quadrilateral", true, 700).unwrap_err();
    assert!(matches!(err, QuantumError::UnsupportedTopology(ref tag) if tag == "quadrilateral"));
}

#[test]
fn test_negative_delay() {
    let err = build_circuit("line", true, -1).unwrap_err();
    assert!(matches!(err, QuantumError::InvalidDelay(-1)));
}

#[test]
fn test_zero_delay_still_decouples() {
    let circuit = build_circuit("line", true, 0).unwrap();
    assert_eq!(circuit.gate_count(), 27);
    assert_eq!(circuit.count_by_kind(OperationKind::FlipPulse), 6);
}

#[test]
fn test_measurement_ordering() {
    let circuit = build_circuit("line", true, 700).unwrap();
    let ops = circuit.as_slice();
    let position = |target: &Operation| ops.iter().position(|op| op == target).unwrap();

    let last_syndrome_measure = position(&Operation::Measure {
        qubit: QubitId::new(4),
        clbit: ClbitId::new(1),
    });
    let first_correction = ops.iter().position(|op| op.is_conditional()).unwrap();
    let first_readout = position(&Operation::Measure {
        qubit: QubitId::new(0),
        clbit: ClbitId::new(2),
    });
    let last_correction = ops.iter().rposition(|op| op.is_conditional()).unwrap();

    assert!(last_syndrome_measure < first_correction);
    assert!(last_correction < first_readout);
    assert!(circuit.has_mid_circuit_measurement());
}

#[test]
fn test_every_clbit_written_once() {
    let circuit = build_circuit("star", true, 1000).unwrap();
    for i in 0..circuit.num_clbits() {
        let writes = circuit
            .operations()
            .filter(|op| op.clbit_written() == Some(ClbitId::new(i)))
            .count();
        assert_eq!(writes, 1, "clbit {} written {} times", i, writes);
    }
}

#[test]
fn test_explicit_idle_per_qubit() {
    let circuit = build_circuit("line", true, 1301).unwrap();
    let tracker = QubitTimeTracker::from_circuit(&circuit, GateTiming::delays_only());
    for i in 0..3 {
        assert_eq!(tracker.explicit_delay(i), 1301);
    }
    assert_eq!(tracker.explicit_delay(3), 0);
    assert_eq!(tracker.explicit_delay(4), 0);
}

#[test]
fn test_json_round_trip() {
    let circuit = build_circuit("line", true, 700).unwrap();
    let json = circuit.to_json().unwrap();
    let restored = repcode_core::Circuit::from_json(&json).unwrap();
    assert_eq!(circuit, restored);
}

#[test]
fn test_report_for_standard_pipeline() {
    let (circuit, report) = Synthesizer::standard()
        .synthesize_with_report(&SynthesisConfig::velocity())
        .unwrap();
    assert_eq!(report.stages.len(), 5);
    assert_eq!(report.operations_added(), circuit.len());
}
