//! Register scripts and PHV images.
//!
//! Register sequences produced by configuration tooling are stored as JSON and
//! replayed into any `RegisterSink`:
//!
//! ```json
//! { "ops": [
//!     { "op": "out_word", "addr": 2097152, "value": 1024 },
//!     { "op": "indirect_write", "addr": 4294967296, "data0": 0, "data1": 0 }
//! ] }
//! ```
//!
//! A PHV image is the JSON form of one packet header vector: its gress, the
//! version of that gress, and a sparse container map.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::phv::Phv;
use crate::soc::RegisterSink;

/// One recorded register operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RegisterOp {
    /// A 32-bit register poke.
    OutWord {
        /// Raw register address.
        addr: u32,
        /// Value written.
        value: u32,
    },
    /// A 128-bit memory line write.
    IndirectWrite {
        /// Raw memory address.
        addr: u64,
        /// Bits `[63:0]`.
        data0: u64,
        /// Bits `[127:64]`.
        data1: u64,
    },
}

impl RegisterOp {
    /// Applies this operation to a sink.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn apply(&self, sink: &mut impl RegisterSink) -> Result<()> {
        match *self {
            Self::OutWord { addr, value } => sink.out_word(addr, value),
            Self::IndirectWrite { addr, data0, data1 } => sink.indirect_write(addr, data0, data1),
        }
    }
}

/// An ordered register write sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterScript {
    /// Operations in replay order.
    #[serde(default)]
    pub ops: Vec<RegisterOp>,
}

impl RegisterScript {
    /// Parses a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Io` when the file cannot be read and
    /// `ModelError::Json` when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serializes the script as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replays every operation in order; returns the number applied.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first sink error.
    pub fn apply(&self, sink: &mut impl RegisterSink) -> Result<usize> {
        for op in &self.ops {
            op.apply(sink)?;
        }
        Ok(self.ops.len())
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the script has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A sink that records writes instead of applying them.
#[derive(Clone, Debug, Default)]
pub struct RegisterRecorder {
    script: RegisterScript,
}

impl RegisterRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded so far.
    pub fn ops(&self) -> &[RegisterOp] {
        &self.script.ops
    }

    /// Finishes recording.
    pub fn into_script(self) -> RegisterScript {
        self.script
    }
}

impl RegisterSink for RegisterRecorder {
    fn out_word(&mut self, addr: u32, value: u32) -> Result<()> {
        self.script.ops.push(RegisterOp::OutWord { addr, value });
        Ok(())
    }

    fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        self.script
            .ops
            .push(RegisterOp::IndirectWrite { addr, data0, data1 });
        Ok(())
    }
}

/// Pipeline direction of a packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gress {
    /// Ingress pipeline.
    #[default]
    Ingress,
    /// Egress pipeline.
    Egress,
}

/// JSON form of a PHV.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhvImage {
    /// Gress of the packet.
    #[serde(default)]
    pub gress: Gress,
    /// Version of that gress.
    #[serde(default)]
    pub version: u8,
    /// Container values by index.
    #[serde(default)]
    pub containers: BTreeMap<usize, u32>,
}

impl PhvImage {
    /// Parses an image from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an image file.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Io` or `ModelError::Json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serializes the image as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the PHV; out-of-range containers are ignored.
    pub fn to_phv(&self) -> Phv {
        let mut phv = Phv::new();
        let ingress = self.gress == Gress::Ingress;
        if ingress {
            phv.set_ingress();
        } else {
            phv.set_egress();
        }
        phv.set_version(self.version, ingress);
        for (&index, &value) in &self.containers {
            phv.set(index, value);
        }
        phv
    }

    /// Captures a PHV's gress, version, and valid containers.
    pub fn from_phv(phv: &Phv) -> Self {
        Self {
            gress: if phv.is_ingress() {
                Gress::Ingress
            } else {
                Gress::Egress
            },
            version: phv.version(),
            containers: phv.iter_valid().collect(),
        }
    }
}
