//! Circuit synthesis pipeline
//!
//! The synthesizer runs its stages in order against a fresh circuit and
//! validates the assembled result before handing it back.

use crate::corrector::SyndromeCorrector;
use crate::encoder::Encoder;
use crate::extractor::SyndromeExtractor;
use crate::readout::Readout;
use crate::scheduler::NoiseSurvivalScheduler;
use crate::stage::{StageStatistics, SynthesisStage};
use repcode_core::{Circuit, Result, SynthesisConfig};
use std::sync::Arc;
use std::time::Instant;

/// Upper bound on the size of a standard circuit, barriers included
const STANDARD_CAPACITY: usize = 40;

/// Statistics from one synthesis run
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub stages: Vec<StageStatistics>,
    /// Total time spent in stages and validation (microseconds)
    pub total_time_us: u64,
}

impl SynthesisReport {
    /// Statistics for a stage by name
    pub fn stage(&self, name: &str) -> Option<&StageStatistics> {
        self.stages.iter().find(|s| s.stage_name == name)
    }

    pub fn operations_added(&self) -> usize {
        self.stages.iter().map(|s| s.operations_added).sum()
    }
}

/// Ordered pipeline of synthesis stages
///
/// # Example
/// ```
/// use repcode_core::SynthesisConfig;
/// use repcode_synth::Synthesizer;
///
/// let circuit = Synthesizer::standard()
///     .synthesize(&SynthesisConfig::velocity())
///     .unwrap();
/// assert_eq!(circuit.gate_count(), 27);
/// ```
#[derive(Clone, Default)]
pub struct Synthesizer {
    stages: Vec<Arc<dyn SynthesisStage>>,
}

impl Synthesizer {
    /// A synthesizer with no stages
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Encoder, scheduler, extractor, corrector and readout, in that order
    pub fn standard() -> Self {
        let mut synthesizer = Self::new();
        synthesizer.add_stages(vec![
            Arc::new(Encoder),
            Arc::new(NoiseSurvivalScheduler),
            Arc::new(SyndromeExtractor),
            Arc::new(SyndromeCorrector),
            Arc::new(Readout),
        ]);
        synthesizer
    }

    /// Append a stage; stages run in the order they are added
    pub fn add_stage(&mut self, stage: Arc<dyn SynthesisStage>) {
        self.stages.push(stage);
    }

    pub fn add_stages(&mut self, stages: Vec<Arc<dyn SynthesisStage>>) {
        self.stages.extend(stages);
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Names of the registered stages, in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Build and validate a circuit for `config`
    pub fn synthesize(&self, config: &SynthesisConfig) -> Result<Circuit> {
        self.synthesize_with_report(config).map(|(circuit, _)| circuit)
    }

    /// Build and validate a circuit, reporting what each stage contributed
    pub fn synthesize_with_report(&self, config: &SynthesisConfig) -> Result<(Circuit, SynthesisReport)> {
        let span = tracing::debug_span!("synthesize", config = %config);
        let _guard = span.enter();

        let start_time = Instant::now();
        let mut circuit = Circuit::with_capacity(config, STANDARD_CAPACITY);
        let mut report = SynthesisReport::default();

        for stage in &self.stages {
            let first_operation = circuit.len();
            stage.append(&mut circuit)?;
            let stats = StageStatistics {
                stage_name: stage.name().to_string(),
                first_operation,
                operations_added: circuit.len() - first_operation,
            };
            tracing::debug!(
                stage = %stats.stage_name,
                first = stats.first_operation,
                added = stats.operations_added,
                "stage appended"
            );
            report.stages.push(stats);
        }

        circuit.validate()?;

        report.total_time_us = start_time.elapsed().as_micros() as u64;
        tracing::debug!(
            operations = circuit.gate_count(),
            time_us = report.total_time_us,
            "circuit synthesized"
        );
        Ok((circuit, report))
    }

    /// Run a single stage against an existing circuit
    pub fn run_stage(&self, stage: &dyn SynthesisStage, circuit: &mut Circuit) -> Result<()> {
        stage.append(circuit)
    }
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field("stages", &self.stage_names())
            .finish()
    }
}
