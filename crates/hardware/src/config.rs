//! Configuration system for the MAU model.
//!
//! This module defines the configuration structures used to parameterize the
//! model. It provides:
//! 1. **Defaults:** Baseline chip dimensions and diagnostic settings.
//! 2. **Structures:** Hierarchical config for general settings and chip topology.
//! 3. **Validation:** Range checks against the fixed chip geometry.
//!
//! Configuration is supplied as JSON (CLI `--config`) or via `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{MAX_PIPES, MAX_STAGES};
use crate::common::{LogFlags, ModelError, Result};

/// Default configuration constants for the model.
mod defaults {
    /// Number of pipes instantiated.
    pub const PIPES: usize = 4;

    /// MAU stages per pipe.
    pub const STAGES: usize = 12;
}

/// Root configuration structure containing all model settings.
///
/// # Examples
///
/// ```
/// use mausim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.chip.pipes, 4);
/// assert_eq!(config.chip.stages, 12);
/// ```
///
/// Deserializing from JSON, with omitted sections taking their defaults:
///
/// ```
/// use mausim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "chip": { "pipes": 1, "stages": 2 } }"#).unwrap();
/// assert_eq!(config.chip.pipes, 1);
/// assert!(!config.general.trace_packets);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General model settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Chip topology
    #[serde(default)]
    pub chip: ChipConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` on malformed input and
    /// `ModelError::InvalidConfig` when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration against the chip geometry.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.chip.pipes == 0 || self.chip.pipes > MAX_PIPES {
            return Err(ModelError::InvalidConfig(format!(
                "chip.pipes must be in 1..={MAX_PIPES}, got {}",
                self.chip.pipes
            )));
        }
        if self.chip.stages == 0 || self.chip.stages > MAX_STAGES {
            return Err(ModelError::InvalidConfig(format!(
                "chip.stages must be in 1..={MAX_STAGES}, got {}",
                self.chip.stages
            )));
        }
        let flags = self.general.log_flags.0;
        if LogFlags::from_bits(flags).is_none() {
            return Err(ModelError::InvalidConfig(format!(
                "general.log_flags must be within {:#x}, got {flags:#x}",
                LogFlags::ALL.0
            )));
        }
        Ok(())
    }
}

/// General model settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Enabled diagnostic categories (see `LogFlags`)
    #[serde(default)]
    pub log_flags: LogFlags,

    /// Emit one `tracing` event per packet with its input and output PHV
    #[serde(default)]
    pub trace_packets: bool,
}

/// Chip topology: how many pipes and stages are instantiated.
#[derive(Debug, Clone, Deserialize)]
pub struct ChipConfig {
    /// Number of pipes
    #[serde(default = "ChipConfig::default_pipes")]
    pub pipes: usize,

    /// MAU stages per pipe
    #[serde(default = "ChipConfig::default_stages")]
    pub stages: usize,
}

impl ChipConfig {
    /// Returns the default number of pipes.
    fn default_pipes() -> usize {
        defaults::PIPES
    }

    /// Returns the default number of stages per pipe.
    fn default_stages() -> usize {
        defaults::STAGES
    }
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            pipes: defaults::PIPES,
            stages: defaults::STAGES,
        }
    }
}
