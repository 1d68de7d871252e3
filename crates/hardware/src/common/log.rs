//! Diagnostic log categories.
//!
//! Each unit of the stage checks its category before emitting `tracing`
//! events, so a test can turn on stash diagnostics without drowning in
//! register-write traces.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bit set of enabled log categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LogFlags(pub u32);

impl LogFlags {
    /// No diagnostics.
    pub const NONE: Self = Self(0);
    /// Register and memory writes.
    pub const REGS: Self = Self(1 << 0);
    /// Hash outputs per group.
    pub const HASH: Self = Self(1 << 1);
    /// SRAM unit hits.
    pub const SRAM: Self = Self(1 << 2);
    /// Stash entry evaluation.
    pub const STASH: Self = Self(1 << 3);
    /// Action execution and PHV writes.
    pub const ACTION: Self = Self(1 << 4);
    /// Every category.
    pub const ALL: Self = Self(0x1F);

    /// Returns whether every category in `other` is enabled.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the flag set for `bits`, or `None` if any bit names no category.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }
}

impl BitOr for LogFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
