//! Stash: per-row associative override for the exact-match SRAM.
//!
//! Each row carries four stash entries split into two halves of two. A half
//! owns the input group, match mask, and result-bus selection its entries
//! share; each entry owns its hash key, bank enable, match address, version
//! valid bits, and 128 bits of data. An entry hits only when all of the
//! following hold:
//! 1. Its half is enabled.
//! 2. Its version-valid bit for the packet version is set.
//! 3. Its bank enable accepts the hash bank context.
//! 4. Its hash key equals the hash line address.
//! 5. Its data equals the key outside the half's match mask.
//!
//! A hit is placed on the buses its half selects, where it supersedes any
//! SRAM hit on those buses. The two halves are interchangeable.

use crate::common::constants::{
    LINE_MASK, MATCH_ADDRESS_BITS, RESULT_BUSES_PER_ROW, STASH_ENTRIES, STASH_ENTRIES_PER_HALF,
    STASH_HALVES,
};
use crate::common::data::{bank_accepts, masked_eq, words_to_u128};
use crate::mau::hash::HashValue;
use crate::mau::result_bus::{HitSource, MatchResult};
use crate::mau::sram::OVERHEAD_SHIFT;
use crate::regs::MauRegs;

/// One stash entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StashEntry {
    /// Hash line the entry is tagged with.
    pub hashkey_data: u32,
    /// Bank-enable word (mask `[11:0]`, id `[23:12]`).
    pub bank_enable: u32,
    /// Match address reported on a hit.
    pub match_address: u32,
    /// Per-version valid bits.
    pub version_valid: u8,
    /// Entry data, compared with the key and carrying the overhead word.
    pub data: u128,
}

/// Shared control of one stash half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StashHalf {
    /// Half takes part in lookups.
    pub enabled: bool,
    /// Input group (and hash group) the comparator reads.
    pub group: usize,
    /// Match mask, 1 = ignore.
    pub mask: u128,
    /// Row result buses driven on a hit (bit per bus).
    pub result_bus_select: u32,
}

/// Why an entry did not hit; used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StashMiss {
    /// The entry's half is disabled.
    Disabled,
    /// Version-valid bit clear for the packet version.
    Version,
    /// Bank enable rejects the bank context.
    Bank,
    /// Hash key differs from the hash line.
    Hashkey,
    /// Data differs from the key under the mask.
    Data,
}

impl StashHalf {
    /// Half an entry belongs to.
    pub const fn of_entry(entry: usize) -> usize {
        entry / STASH_ENTRIES_PER_HALF
    }

    /// Encodes a `stash_match_input_data_ctl` register value.
    pub const fn encode_input_data_ctl(enabled: bool, group: usize) -> u32 {
        (group as u32 & 0x7) << 1 | enabled as u32
    }
}

/// The committed stash of one row.
#[derive(Clone, Debug, Default)]
pub struct Stash {
    /// Entries, indexed by entry number.
    pub entries: [StashEntry; STASH_ENTRIES],
    /// Halves, indexed by half number.
    pub halves: [StashHalf; STASH_HALVES],
}

impl Stash {
    /// Decodes one row's stash from the register image.
    pub fn from_regs(regs: &MauRegs, row: usize) -> Self {
        let r = &regs.stash[row];
        let entries = std::array::from_fn(|e| StashEntry {
            hashkey_data: r.hashkey_data[e] & LINE_MASK as u32,
            bank_enable: r.bank_enable[e],
            match_address: r.match_address[e] & ((1 << MATCH_ADDRESS_BITS) - 1),
            version_valid: (r.version_valid[e] & 0xF) as u8,
            data: words_to_u128(&r.data[e]),
        });
        let halves = std::array::from_fn(|h| StashHalf {
            enabled: r.input_data_ctl[h] & 1 != 0,
            group: ((r.input_data_ctl[h] >> 1) & 0x7) as usize,
            mask: words_to_u128(&r.match_mask[h]),
            result_bus_select: r.result_bus_select[h] & ((1 << RESULT_BUSES_PER_ROW) - 1),
        });
        Self { entries, halves }
    }

    /// Returns whether any half is enabled.
    pub fn any_enabled(&self) -> bool {
        self.halves.iter().any(|h| h.enabled)
    }

    /// Evaluates one entry against the hash and key of its half's input group.
    ///
    /// # Errors
    ///
    /// Returns the first failed condition when the entry does not hit.
    pub fn evaluate(
        &self,
        row: usize,
        entry: usize,
        hash: HashValue,
        key: u128,
        version: u8,
    ) -> Result<MatchResult, StashMiss> {
        let half = &self.halves[StashHalf::of_entry(entry)];
        let e = &self.entries[entry];
        if !half.enabled {
            return Err(StashMiss::Disabled);
        }
        if e.version_valid & (1 << version) == 0 {
            return Err(StashMiss::Version);
        }
        if !bank_accepts(e.bank_enable, hash.bank()) {
            return Err(StashMiss::Bank);
        }
        if e.hashkey_data != hash.line() {
            return Err(StashMiss::Hashkey);
        }
        if !masked_eq(key, e.data, half.mask) {
            return Err(StashMiss::Data);
        }
        Ok(MatchResult {
            row,
            address: e.match_address,
            overhead: (e.data >> OVERHEAD_SHIFT) as u32,
            source: HitSource::Stash { entry },
        })
    }
}
