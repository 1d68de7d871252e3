//! Match result buses.
//!
//! Every row drives two result buses. SRAM units and stash halves place hits
//! on the buses they select; when more than one hit lands on the same bus the
//! bus keeps one according to a fixed priority:
//! 1. A stash hit supersedes any SRAM hit.
//! 2. Among stash hits, the lowest entry index wins.
//! 3. Among SRAM hits, the lowest column wins.

use crate::common::constants::{RESULT_BUSES, RESULT_BUSES_PER_ROW};

/// Where a hit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSource {
    /// An exact-match SRAM unit.
    Sram {
        /// SRAM column within the row.
        col: usize,
    },
    /// A stash entry.
    Stash {
        /// Stash entry index within the row.
        entry: usize,
    },
}

impl HitSource {
    /// Priority key: lower wins.
    const fn rank(self) -> (u8, usize) {
        match self {
            Self::Stash { entry } => (0, entry),
            Self::Sram { col } => (1, col),
        }
    }
}

/// A hit carried on a result bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Row that produced the hit.
    pub row: usize,
    /// Match address (23 bits).
    pub address: u32,
    /// Overhead word of the matched entry (instruction pointer in `[5:0]`).
    pub overhead: u32,
    /// Unit that produced the hit.
    pub source: HitSource,
}

/// Outcome of offering a hit to a bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    /// The bus was idle and now carries the hit.
    Taken,
    /// The hit replaced a lower-priority hit.
    Superseded(HitSource),
    /// A higher-priority hit already holds the bus.
    Rejected,
}

/// The result buses of one stage for one packet.
#[derive(Clone, Debug, Default)]
pub struct ResultBuses {
    buses: [Option<MatchResult>; RESULT_BUSES],
}

impl ResultBuses {
    /// Creates idle buses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Global bus id of bus `sel` of `row`.
    pub const fn bus_id(row: usize, sel: usize) -> usize {
        row * RESULT_BUSES_PER_ROW + sel
    }

    /// Offers a hit to a bus, applying the bus priority.
    pub fn offer(&mut self, bus: usize, hit: MatchResult) -> Offer {
        let Some(slot) = self.buses.get_mut(bus) else {
            return Offer::Rejected;
        };
        match *slot {
            None => {
                *slot = Some(hit);
                Offer::Taken
            }
            Some(held) if hit.source.rank() < held.source.rank() => {
                let previous = held.source;
                *slot = Some(hit);
                Offer::Superseded(previous)
            }
            Some(_) => Offer::Rejected,
        }
    }

    /// Returns the hit on a bus, if any.
    pub fn get(&self, bus: usize) -> Option<&MatchResult> {
        self.buses.get(bus).and_then(Option::as_ref)
    }

    /// Returns the hit on the lowest-numbered bus selected by `mask`.
    pub fn first_in_mask(&self, mask: u32) -> Option<(usize, &MatchResult)> {
        (0..RESULT_BUSES)
            .filter(|bus| mask & (1 << bus) != 0)
            .find_map(|bus| self.get(bus).map(|hit| (bus, hit)))
    }
}
