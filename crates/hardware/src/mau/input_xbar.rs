//! Exact-match input crossbar.
//!
//! Builds the 128-byte match input bus from PHV containers. Each bus byte is
//! driven by at most one container byte; undriven bytes read as zero. The bus
//! is consumed in 16-byte groups by the hash units, SRAM comparators, and
//! stash comparators.

use crate::common::constants::{GROUP_BYTES, INPUT_GROUPS, MATCH_INPUT_BYTES};
use crate::phv::Phv;
use crate::regs::MauRegs;

/// Control word bit that enables a bus byte.
const BYTE_CTL_ENABLE: u32 = 1 << 10;

/// Container byte feeding one input bus byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteSource {
    /// PHV container index.
    pub container: usize,
    /// Byte within the container, 0 = least significant.
    pub byte: usize,
}

impl ByteSource {
    /// Decodes a `byte_ctl` register; `None` when the byte is disabled.
    pub const fn decode(ctl: u32) -> Option<Self> {
        if ctl & BYTE_CTL_ENABLE == 0 {
            return None;
        }
        Some(Self {
            container: (ctl & 0xFF) as usize,
            byte: ((ctl >> 8) & 0x3) as usize,
        })
    }

    /// Encodes a `byte_ctl` register value.
    pub const fn encode(self) -> u32 {
        BYTE_CTL_ENABLE | (self.byte as u32 & 0x3) << 8 | (self.container as u32 & 0xFF)
    }
}

/// The committed input crossbar.
#[derive(Clone, Debug)]
pub struct InputXbar {
    slots: [Option<ByteSource>; MATCH_INPUT_BYTES],
}

/// The match input bus for one packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchInput {
    bytes: [u8; MATCH_INPUT_BYTES],
}

impl InputXbar {
    /// Decodes the crossbar from the register image.
    pub fn from_regs(regs: &MauRegs) -> Self {
        Self {
            slots: std::array::from_fn(|i| ByteSource::decode(regs.input_xbar[i])),
        }
    }

    /// Drives the input bus from a PHV.
    pub fn build(&self, phv: &Phv) -> MatchInput {
        let mut bytes = [0u8; MATCH_INPUT_BYTES];
        for (out, slot) in bytes.iter_mut().zip(self.slots.iter()) {
            if let Some(src) = slot {
                *out = phv.byte(src.container, src.byte);
            }
        }
        MatchInput { bytes }
    }
}

impl MatchInput {
    /// Wraps raw bus bytes.
    pub const fn from_bytes(bytes: [u8; MATCH_INPUT_BYTES]) -> Self {
        Self { bytes }
    }

    /// Returns input group `group` as a 128-bit value, bus byte `16 * group` least significant.
    pub fn group(&self, group: usize) -> u128 {
        if group >= INPUT_GROUPS {
            return 0;
        }
        let start = group * GROUP_BYTES;
        let mut le = [0u8; GROUP_BYTES];
        le.copy_from_slice(&self.bytes[start..start + GROUP_BYTES]);
        u128::from_le_bytes(le)
    }

    /// Raw bus bytes.
    pub const fn bytes(&self) -> &[u8; MATCH_INPUT_BYTES] {
        &self.bytes
    }
}
