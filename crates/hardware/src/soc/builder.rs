//! Chip construction and the top-level `Chip` type.
//!
//! Builds every stage of the configured topology and runs packets through a
//! pipe. It performs:
//! 1. **Stage setup:** One `Mau` per pipe and stage behind an `Interconnect`.
//! 2. **Diagnostics:** Propagates log flags to every stage.
//! 3. **Pipe traversal:** Passes a PHV through the stages of a pipe in order.

use crate::common::{LogFlags, Result};
use crate::config::ChipConfig;
use crate::phv::Phv;
use crate::soc::interconnect::Interconnect;
use crate::stats::MauStats;

/// All pipes of the chip.
#[derive(Clone, Debug)]
pub struct Chip {
    /// Register interconnect; owns every stage.
    pub bus: Interconnect,
}

impl Chip {
    /// Builds the stages of `chip` with the given diagnostics enabled.
    pub fn new(chip: &ChipConfig, log_flags: LogFlags) -> Self {
        let mut bus = Interconnect::new(chip);
        for mau in bus.iter_mut() {
            mau.set_log_flags(log_flags);
        }
        Self { bus }
    }

    /// Resets every stage to power-on state, keeping diagnostics.
    pub fn reset(&mut self) {
        for mau in self.bus.iter_mut() {
            mau.reset();
        }
    }

    /// Replaces the diagnostics of every stage.
    pub fn set_log_flags(&mut self, flags: LogFlags) {
        for mau in self.bus.iter_mut() {
            mau.set_log_flags(flags);
        }
    }

    /// Runs a PHV through every stage of `pipe`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when the pipe is not configured.
    pub fn process(&mut self, pipe: usize, phv: &Phv) -> Result<Phv> {
        let mut current = phv.clone();
        for mau in self.bus.pipe_mut(pipe)? {
            current = mau.process(&current);
        }
        Ok(current)
    }

    /// Counters of every stage combined.
    pub fn stats(&self) -> MauStats {
        self.bus.iter().fold(MauStats::default(), |mut acc, mau| {
            acc.merge(mau.stats());
            acc
        })
    }
}
