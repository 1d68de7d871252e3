//! Packet Header Vector.
//!
//! The PHV is the in-flight representation of a packet's header and metadata
//! fields as 224 containers of three widths:
//! 1. **32-bit containers:** indices `0..64`.
//! 2. **8-bit containers:** indices `64..128`.
//! 3. **16-bit containers:** indices `128..224`.
//!
//! Besides container values the PHV carries its gress (ingress or egress) and
//! one version number per gress; stash entries and SRAM words only match
//! packets whose version bit they mark valid.

use crate::common::constants::{PHV_16_BASE, PHV_8_BASE, PHV_VERSIONS, PHV_WORDS};

/// Width of a PHV container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerWidth {
    /// 8-bit container.
    W8,
    /// 16-bit container.
    W16,
    /// 32-bit container.
    W32,
}

impl ContainerWidth {
    /// Width of the container holding `index`, or `None` past the last container.
    pub const fn of(index: usize) -> Option<Self> {
        if index < PHV_8_BASE {
            Some(Self::W32)
        } else if index < PHV_16_BASE {
            Some(Self::W8)
        } else if index < PHV_WORDS {
            Some(Self::W16)
        } else {
            None
        }
    }

    /// Container width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
        }
    }

    /// Mask of the bits a container of this width holds.
    pub const fn mask(self) -> u32 {
        match self {
            Self::W8 => 0xFF,
            Self::W16 => 0xFFFF,
            Self::W32 => 0xFFFF_FFFF,
        }
    }
}

/// Packet Header Vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phv {
    words: [u32; PHV_WORDS],
    valid: [u64; PHV_WORDS.div_ceil(64)],
    ingress: bool,
    /// Version per gress: index 0 ingress, 1 egress.
    versions: [u8; 2],
}

impl Default for Phv {
    fn default() -> Self {
        Self::new()
    }
}

impl Phv {
    /// Creates an ingress PHV with every container unset and version 0.
    pub const fn new() -> Self {
        Self {
            words: [0; PHV_WORDS],
            valid: [0; PHV_WORDS.div_ceil(64)],
            ingress: true,
            versions: [0; 2],
        }
    }

    /// Sets a container, truncating `value` to the container width.
    ///
    /// Indices past the last container are ignored.
    pub fn set(&mut self, index: usize, value: u32) {
        let Some(width) = ContainerWidth::of(index) else {
            tracing::warn!(index, "ignoring PHV write past the last container");
            return;
        };
        self.words[index] = value & width.mask();
        self.valid[index / 64] |= 1 << (index % 64);
    }

    /// Returns a container's value; unset or out-of-range containers read as zero.
    pub fn get(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    /// Returns whether a container has been written.
    pub fn is_valid(&self, index: usize) -> bool {
        index < PHV_WORDS && self.valid[index / 64] & (1 << (index % 64)) != 0
    }

    /// Clears a container back to unset.
    pub fn clear(&mut self, index: usize) {
        if index < PHV_WORDS {
            self.words[index] = 0;
            self.valid[index / 64] &= !(1 << (index % 64));
        }
    }

    /// Iterates over the written containers as `(index, value)`.
    pub fn iter_valid(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        (0..PHV_WORDS)
            .filter(|&i| self.is_valid(i))
            .map(|i| (i, self.words[i]))
    }

    /// Returns byte `byte` (0 = least significant) of a container.
    pub fn byte(&self, index: usize, byte: usize) -> u8 {
        match ContainerWidth::of(index) {
            Some(width) if byte < width.bytes() => (self.get(index) >> (8 * byte)) as u8,
            _ => 0,
        }
    }

    /// Marks the PHV as egress.
    pub fn set_egress(&mut self) {
        self.ingress = false;
    }

    /// Marks the PHV as ingress.
    pub fn set_ingress(&mut self) {
        self.ingress = true;
    }

    /// Returns whether the PHV is ingress.
    pub const fn is_ingress(&self) -> bool {
        self.ingress
    }

    /// Sets the version of one gress; versions wrap into `0..4`.
    pub fn set_version(&mut self, version: u8, ingress: bool) {
        self.versions[usize::from(!ingress)] = version % PHV_VERSIONS;
    }

    /// Version of the PHV's current gress.
    pub const fn version(&self) -> u8 {
        self.versions[if self.ingress { 0 } else { 1 }]
    }
}
