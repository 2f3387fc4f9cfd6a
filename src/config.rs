//! Engine configuration: sample rate, block size, topology and seed.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_BLOCK_SIZE;

/// Which tone stage follows the frog block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Frog block → comb → four-band EQ.
    #[default]
    CombEq,
    /// Frog block → pure delay → comb → resonant bump.
    DelayBump,
}

impl Topology {
    pub fn name(&self) -> &'static str {
        match self {
            Topology::CombEq => "comb-eq",
            Topology::DelayBump => "delay-bump",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comb-eq" | "a" => Ok(Topology::CombEq),
            "delay-bump" | "b" => Ok(Topology::DelayBump),
            other => Err(ConfigError::UnknownTopology(other.to_string())),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Sample rate must be finite and positive
    #[error("invalid sample rate {0} (must be finite and > 0)")]
    InvalidSampleRate(f32),

    /// Block size out of range
    #[error("invalid block size {size} (must be 1..={max})")]
    InvalidBlockSize { size: usize, max: usize },

    /// Topology name not recognised
    #[error("unknown topology '{0}' (expected comb-eq or delay-bump)")]
    UnknownTopology(String),

    /// Config asks for a different topology than the engine type implements
    #[error("config selects topology {found}, engine implements {expected}")]
    TopologyMismatch { expected: Topology, found: Topology },

    /// Config file could not be read
    #[cfg(feature = "serde")]
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to build an engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub block_size: usize,
    pub topology: Topology,
    /// Seed for the stochastic modulator; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
            block_size: 48,
            topology: Topology::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize {
                size: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        for rate in [0.0, -48_000.0, f32::NAN, f32::INFINITY] {
            let config = EngineConfig {
                sample_rate: rate,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSampleRate(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_block_size() {
        for size in [0, MAX_BLOCK_SIZE + 1] {
            let config = EngineConfig {
                block_size: size,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidBlockSize { .. })
            ));
        }
    }

    #[test]
    fn test_topology_names_round_trip() {
        for topology in [Topology::CombEq, Topology::DelayBump] {
            assert_eq!(topology.name().parse::<Topology>().ok(), Some(topology));
        }
        assert!(matches!(
            "granular".parse::<Topology>(),
            Err(ConfigError::UnknownTopology(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "topology": "delay-bump", "seed": 7 }"#)
            .expect("valid config");
        assert_eq!(config.topology, Topology::DelayBump);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.sample_rate, crate::DEFAULT_SAMPLE_RATE);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_is_validated() {
        let result = EngineConfig::from_json(r#"{ "block_size": 0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidBlockSize { .. })));
    }
}
