//! Exact-match SRAM units.
//!
//! A stage has 8 rows of 12 SRAM units, each holding 1024 lines of 128-bit
//! match words. An enabled unit reads one input group, indexes its lines with
//! the group's hash, and reports a hit when:
//! 1. The unit's bank-enable word accepts the hash bank context.
//! 2. The stored word's version nibble (`[123:120]`) marks the packet version valid.
//! 3. The stored word equals the key outside the unit's match mask.
//!
//! Unit storage is allocated on first write; unwritten lines read as zero.

use crate::common::constants::{SRAM_COLS, SRAM_LINES, SRAM_ROWS};
use crate::common::data::{bank_accepts, masked_eq, words_to_u128};
use crate::mau::hash::HashValue;
use crate::mau::result_bus::{HitSource, MatchResult};
use crate::regs::MauRegs;

/// Bit position of the version nibble inside a match word.
pub const VERSION_SHIFT: u32 = 120;

/// Bit position of the overhead word inside a match word.
pub const OVERHEAD_SHIFT: u32 = 32;

/// Decoded control of one SRAM unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SramUnitConfig {
    /// Unit takes part in lookups.
    pub enabled: bool,
    /// Input group (and hash group) the unit reads.
    pub group: usize,
    /// Result bus of the row the unit drives (0 or 1).
    pub bus_sel: usize,
    /// Virtual page number placed above the line in the match address.
    pub vpn: u32,
    /// Bank-enable word (mask `[11:0]`, id `[23:12]`).
    pub bank_enable: u32,
    /// Match mask, 1 = ignore.
    pub mask: u128,
}

impl SramUnitConfig {
    /// Decodes one unit from the register image.
    pub fn from_regs(regs: &MauRegs, row: usize, col: usize) -> Self {
        let unit = &regs.sram[row][col];
        Self {
            enabled: unit.ctl & 1 != 0,
            group: ((unit.ctl >> 1) & 0x7) as usize,
            bus_sel: ((unit.ctl >> 4) & 0x1) as usize,
            vpn: (unit.ctl >> 5) & 0x1FFF,
            bank_enable: unit.bank_enable,
            mask: words_to_u128(&unit.match_mask),
        }
    }

    /// Encodes the `ctl` register value for a unit.
    pub const fn encode_ctl(enabled: bool, group: usize, bus_sel: usize, vpn: u32) -> u32 {
        (vpn & 0x1FFF) << 5 | (bus_sel as u32 & 1) << 4 | (group as u32 & 0x7) << 1 | enabled as u32
    }
}

/// Backing storage for every SRAM unit of a stage.
#[derive(Clone, Debug)]
pub struct SramArray {
    units: Vec<Vec<u128>>,
}

impl Default for SramArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SramArray {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self {
            units: vec![Vec::new(); SRAM_ROWS * SRAM_COLS],
        }
    }

    /// Writes one line.
    pub fn write(&mut self, row: usize, col: usize, line: usize, value: u128) {
        let unit = &mut self.units[row * SRAM_COLS + col];
        if unit.is_empty() {
            unit.resize(SRAM_LINES, 0);
        }
        unit[line] = value;
    }

    /// Reads one line.
    pub fn read(&self, row: usize, col: usize, line: usize) -> u128 {
        self.units[row * SRAM_COLS + col]
            .get(line)
            .copied()
            .unwrap_or(0)
    }

    /// Looks up one unit.
    pub fn lookup(
        &self,
        cfg: &SramUnitConfig,
        row: usize,
        col: usize,
        hash: HashValue,
        key: u128,
        version: u8,
    ) -> Option<MatchResult> {
        if !cfg.enabled || !bank_accepts(cfg.bank_enable, hash.bank()) {
            return None;
        }
        let line = hash.line();
        let word = self.read(row, col, line as usize);
        let versions = (word >> VERSION_SHIFT) as u32 & 0xF;
        if versions & (1 << version) == 0 || !masked_eq(key, word, cfg.mask) {
            return None;
        }
        Some(MatchResult {
            row,
            address: cfg.vpn << 10 | line,
            overhead: (word >> OVERHEAD_SHIFT) as u32,
            source: HitSource::Sram { col },
        })
    }
}
