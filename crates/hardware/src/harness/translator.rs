//! Action half-word crossbar translator.
//!
//! The action crossbar is configured one action bus byte at a time, but its
//! registers pack four byte lanes per 32-bit word. The translator keeps a
//! shadow of every `ctl_word`, lets callers set single lanes, and flushes only
//! the words touched since the last flush as whole register writes.

use std::collections::BTreeSet;

use crate::common::constants::{ACTION_HV_HALVES, ACTION_HV_LANES, ACTION_HV_SLOTS, ACTION_HV_WORDS, SRAM_ROWS};
use crate::common::Result;
use crate::regs::{MauRegMap, RegisterUtils};
use crate::soc::RegisterSink;

/// Shadow of the action crossbar registers of one stage.
#[derive(Clone, Debug)]
pub struct ActionHvTranslator {
    map: MauRegMap,
    shadow: [[[u32; ACTION_HV_WORDS]; ACTION_HV_HALVES]; SRAM_ROWS],
    dirty: BTreeSet<(usize, usize, usize)>,
}

impl ActionHvTranslator {
    /// Creates an all-zero shadow for one stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when `pipe` or `stage` is past the
    /// chip geometry.
    pub fn new(pipe: usize, stage: usize) -> Result<Self> {
        Ok(Self {
            map: RegisterUtils::ref_mau(pipe, stage)?,
            shadow: [[[0; ACTION_HV_WORDS]; ACTION_HV_HALVES]; SRAM_ROWS],
            dirty: BTreeSet::new(),
        })
    }

    /// Sets the lane for action bus slot `half * 64 + index` of `row`.
    ///
    /// `value` is the full lane byte: source byte in `[3:0]`, enable in `[7]`.
    /// Out-of-range coordinates are ignored.
    pub fn ctl_word(&mut self, row: usize, half: usize, index: usize, value: u8) {
        if row >= SRAM_ROWS || half >= ACTION_HV_HALVES || index >= ACTION_HV_SLOTS {
            tracing::warn!(row, half, index, "ignoring action crossbar lane out of range");
            return;
        }
        let word = index / ACTION_HV_LANES;
        let shift = (index % ACTION_HV_LANES) * 8;
        let slot = &mut self.shadow[row][half][word];
        *slot = (*slot & !(0xFF << shift)) | u32::from(value) << shift;
        let _ = self.dirty.insert((row, half, word));
    }

    /// Shadow value of one register word, or `None` past the crossbar.
    pub fn word(&self, row: usize, half: usize, word: usize) -> Option<u32> {
        self.shadow.get(row)?.get(half)?.get(word).copied()
    }

    /// Number of words waiting to be flushed.
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Writes every touched word to `sink` in address order; returns the count.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first sink error; unflushed words stay pending.
    pub fn do_writes(&mut self, sink: &mut impl RegisterSink) -> Result<usize> {
        let mut written = 0;
        while let Some(&(row, half, word)) = self.dirty.first() {
            let addr = self.map.action_hv_ctl_word(row, half, word)?;
            sink.out_word(addr, self.shadow[row][half][word])?;
            let _ = self.dirty.pop_first();
            written += 1;
        }
        Ok(written)
    }

    /// Clears the shadow and drops pending writes.
    pub fn reset(&mut self) {
        self.shadow = [[[0; ACTION_HV_WORDS]; ACTION_HV_HALVES]; SRAM_ROWS];
        self.dirty.clear();
    }
}
