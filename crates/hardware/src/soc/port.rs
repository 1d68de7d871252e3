//! Ports.
//!
//! A port id carries its pipe in bits `[8:7]` and the pipe-local port number
//! in bits `[6:0]`. Packets entering a port are processed by the stages of
//! that port's pipe.

use std::fmt;

use crate::common::constants::{PORT_LOCAL_MASK, PORT_PIPE_SHIFT, PORTS_PER_PIPE};
use crate::common::{ModelError, Result};
use crate::config::ChipConfig;

/// A validated port of a configured pipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Port {
    id: u16,
    pipe: usize,
}

impl Port {
    /// Validates a port id against the chip topology.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidPort` when the pipe is not configured or
    /// the local port number is past the last port of a pipe.
    pub fn new(id: u16, chip: &ChipConfig) -> Result<Self> {
        let pipe = usize::from(id >> PORT_PIPE_SHIFT);
        let local = id & PORT_LOCAL_MASK;
        if pipe >= chip.pipes || local >= PORTS_PER_PIPE {
            return Err(ModelError::InvalidPort(id));
        }
        Ok(Self { id, pipe })
    }

    /// Builds the port id of a pipe-local port.
    pub const fn make_id(pipe: usize, local: u16) -> u16 {
        (pipe as u16) << PORT_PIPE_SHIFT | (local & PORT_LOCAL_MASK)
    }

    /// Port id.
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Pipe the port belongs to.
    pub const fn pipe(&self) -> usize {
        self.pipe
    }

    /// Pipe-local port number.
    pub const fn local(&self) -> u16 {
        self.id & PORT_LOCAL_MASK
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {} (pipe {}, local {})", self.id, self.pipe, self.local())
    }
}
