//! Model error definitions.
//!
//! This module defines the error type returned by every fallible model operation. It covers:
//! 1. **Addressing:** Register and memory addresses that do not decode to a known location.
//! 2. **Topology:** Pipes, stages, and ports that do not exist in the configured chip.
//! 3. **Input:** Invalid configuration and failures reading or parsing JSON inputs.

use thiserror::Error;

/// Errors raised by the MAU model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The register address has an unknown family or an out-of-range field.
    #[error("unknown register address {0:#010x}")]
    UnknownRegister(u32),

    /// The memory address has an unknown type or an out-of-range field.
    #[error("unknown memory address {0:#012x}")]
    UnknownMemory(u64),

    /// A register-map accessor was given an index outside the stage geometry.
    #[error("field out of range: {0}")]
    FieldOutOfRange(String),

    /// The addressed pipe or stage is not present in the configured chip.
    #[error("pipe {pipe} stage {stage} is not present")]
    NoSuchStage {
        /// Pipe number from the address.
        pipe: usize,
        /// Stage number from the address.
        stage: usize,
    },

    /// The port id does not name a port of a configured pipe.
    #[error("invalid port {0}")]
    InvalidPort(u16),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A JSON input (configuration, register script, PHV image) failed to parse.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Reading an input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the model.
pub type Result<T> = std::result::Result<T, ModelError>;
