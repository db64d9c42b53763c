//! Synthesis configuration
//!
//! Configuration is an explicit immutable value handed to the synthesizer.
//! Construction validates the two user-facing inputs (topology tag and
//! delay), so a `SynthesisConfig` that exists is always synthesizable.

use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Survival window of the velocity profile, in dt
pub const VELOCITY_DELAY_DT: u64 = 700;

/// Default survival window of the endurance profile, in dt
pub const ENDURANCE_DELAY_DT: u64 = 1000;

/// Physical arrangement of the data qubits the circuit targets
///
/// Both variants share the same parity-check pairs; the tag is carried
/// through so a layout service can pick matching physical qubits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topology {
    /// Data qubits on a path: d0 - d1 - d2
    Line,
    /// Data qubits around a T-junction
    Star,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Line, Topology::Star];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Topology::Line => "line",
            Topology::Star => "star",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags are matched exactly: `line` or `star`
impl FromStr for Topology {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(Topology::Line),
            "star" => Ok(Topology::Star),
            _ => Err(QuantumError::unsupported_topology(s)),
        }
    }
}

impl TryFrom<String> for Topology {
    type Error = QuantumError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Topology> for String {
    fn from(topology: Topology) -> Self {
        topology.as_str().to_string()
    }
}

/// Everything the synthesizer needs to build one circuit
///
/// # Example
/// ```
/// use repcode_core::{SynthesisConfig, Topology};
///
/// let config = SynthesisConfig::new(Topology::Line, true, 700).unwrap();
/// assert_eq!(config.delay_duration(), 700);
///
/// assert!(SynthesisConfig::new(Topology::Line, true, -1).is_err());
/// assert!(SynthesisConfig::parse("quadrilateral", false, 10).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSynthesisConfig")]
pub struct SynthesisConfig {
    topology: Topology,
    use_decoupling: bool,
    delay_duration: u64,
}

impl SynthesisConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    /// Returns `InvalidDelay` if `delay_duration` is negative
    pub fn new(topology: Topology, use_decoupling: bool, delay_duration: i64) -> Result<Self> {
        let delay_duration =
            u64::try_from(delay_duration).map_err(|_| QuantumError::InvalidDelay(delay_duration))?;
        Ok(Self {
            topology,
            use_decoupling,
            delay_duration,
        })
    }

    /// Create a configuration from a topology tag
    ///
    /// # Errors
    /// Returns `UnsupportedTopology` for tags other than `line`/`star`, and
    /// `InvalidDelay` for a negative delay
    pub fn parse(topology: &str, use_decoupling: bool, delay_duration: i64) -> Result<Self> {
        Self::new(topology.parse()?, use_decoupling, delay_duration)
    }

    /// Line topology at 700 dt with decoupling
    pub fn velocity() -> Self {
        Self {
            topology: Topology::Line,
            use_decoupling: true,
            delay_duration: VELOCITY_DELAY_DT,
        }
    }

    /// Star topology with decoupling and a caller-chosen window
    pub fn endurance(delay_duration: u64) -> Self {
        Self {
            topology: Topology::Star,
            use_decoupling: true,
            delay_duration,
        }
    }

    /// Endurance preset at its usual 1000 dt window
    pub fn endurance_default() -> Self {
        Self::endurance(ENDURANCE_DELAY_DT)
    }

    /// Toggle the decoupling pulse pair
    pub fn with_decoupling(mut self, use_decoupling: bool) -> Self {
        self.use_decoupling = use_decoupling;
        self
    }

    /// Replace the survival window
    pub fn with_delay(mut self, delay_duration: u64) -> Self {
        self.delay_duration = delay_duration;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    #[inline]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub const fn use_decoupling(&self) -> bool {
        self.use_decoupling
    }

    /// Survival window in dt
    #[inline]
    pub const fn delay_duration(&self) -> u64 {
        self.delay_duration
    }
}

impl fmt::Display for SynthesisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}dt ({})",
            self.topology,
            self.delay_duration,
            if self.use_decoupling { "decoupled" } else { "passive" }
        )
    }
}

/// Unvalidated wire form; deserialization goes through [`SynthesisConfig::parse`]
#[derive(Deserialize)]
struct RawSynthesisConfig {
    topology: String,
    #[serde(default = "default_decoupling")]
    use_decoupling: bool,
    // Wide enough for every stored u64 window and for negative input
    delay_duration: i128,
}

fn default_decoupling() -> bool {
    true
}

impl TryFrom<RawSynthesisConfig> for SynthesisConfig {
    type Error = QuantumError;

    fn try_from(raw: RawSynthesisConfig) -> Result<Self> {
        let delay_duration = u64::try_from(raw.delay_duration).map_err(|_| {
            QuantumError::InvalidDelay(raw.delay_duration.clamp(i64::MIN.into(), i64::MAX.into()) as i64)
        })?;
        Ok(Self {
            topology: raw.topology.parse()?,
            use_decoupling: raw.use_decoupling,
            delay_duration,
        })
    }
}
