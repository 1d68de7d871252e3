//! Raw register and memory address types.
//!
//! This module defines strong types for the two address spaces of the chip so
//! register offsets and wide-memory offsets are never mixed. It provides:
//! 1. **Type Safety:** `RegAddr` for 32-bit `OutWord` targets, `MemAddr` for 64-bit `IndirectWrite` targets.
//! 2. **Pipe/Stage Extraction:** Helpers that read the routing fields shared by every address.

use std::fmt;

/// A 32-bit register address.
///
/// Layout: `[31:30]` pipe, `[29:26]` stage, `[25:21]` register family, `[20:0]` offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegAddr(pub u32);

/// A 64-bit wide-memory address.
///
/// Layout: `[41:40]` pipe, `[39:36]` stage, `[35:32]` memory type, `[17:0]` location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemAddr(pub u64);

impl RegAddr {
    /// Bit position of the pipe field.
    pub const PIPE_SHIFT: u32 = 30;
    /// Bit position of the stage field.
    pub const STAGE_SHIFT: u32 = 26;
    /// Bit position of the family field.
    pub const FAMILY_SHIFT: u32 = 21;
    /// Mask of the offset field.
    pub const OFFSET_MASK: u32 = (1 << Self::FAMILY_SHIFT) - 1;

    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Pipe the register belongs to.
    #[inline]
    pub const fn pipe(self) -> usize {
        (self.0 >> Self::PIPE_SHIFT) as usize & 0x3
    }

    /// Stage the register belongs to.
    #[inline]
    pub const fn stage(self) -> usize {
        (self.0 >> Self::STAGE_SHIFT) as usize & 0xF
    }

    /// Register family id.
    #[inline]
    pub const fn family(self) -> u32 {
        (self.0 >> Self::FAMILY_SHIFT) & 0x1F
    }

    /// Offset within the family.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0 & Self::OFFSET_MASK
    }
}

impl MemAddr {
    /// Bit position of the pipe field.
    pub const PIPE_SHIFT: u32 = 40;
    /// Bit position of the stage field.
    pub const STAGE_SHIFT: u32 = 36;
    /// Bit position of the memory type field.
    pub const TYPE_SHIFT: u32 = 32;

    /// Returns the raw 64-bit value.
    #[inline]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Pipe the memory belongs to.
    #[inline]
    pub const fn pipe(self) -> usize {
        (self.0 >> Self::PIPE_SHIFT) as usize & 0x3
    }

    /// Stage the memory belongs to.
    #[inline]
    pub const fn stage(self) -> usize {
        (self.0 >> Self::STAGE_SHIFT) as usize & 0xF
    }

    /// Memory type id.
    #[inline]
    pub const fn mem_type(self) -> u64 {
        (self.0 >> Self::TYPE_SHIFT) & 0xF
    }

    /// Location bits below the memory type.
    #[inline]
    pub const fn location(self) -> u64 {
        self.0 & 0xFFFF_FFFF
    }
}

impl fmt::Display for RegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Display for MemAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#012x}", self.0)
    }
}
