//! Stage statistics collection and reporting.
//!
//! Each MAU stage counts what happened to the packets it processed:
//! 1. **Traffic:** Packets processed.
//! 2. **Match:** SRAM hits, stash hits, and stash hits that superseded an SRAM hit.
//! 3. **Action:** Table misses, instructions executed, and container writes.

use std::ops::AddAssign;

/// Per-stage counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MauStats {
    /// Packets processed.
    pub packets: u64,
    /// SRAM units that hit (before bus arbitration).
    pub sram_hits: u64,
    /// Stash entries that hit (before bus arbitration).
    pub stash_hits: u64,
    /// Stash hits that replaced an SRAM hit on a result bus.
    pub stash_overrides: u64,
    /// Enabled logical tables with no hit on any of their buses.
    pub table_misses: u64,
    /// Instructions executed.
    pub actions: u64,
    /// PHV containers written by instructions.
    pub phv_writes: u64,
}

impl MauStats {
    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.packets += other.packets;
        self.sram_hits += other.sram_hits;
        self.stash_hits += other.stash_hits;
        self.stash_overrides += other.stash_overrides;
        self.table_misses += other.table_misses;
        self.actions += other.actions;
        self.phv_writes += other.phv_writes;
    }

    /// Total hits from either source.
    pub const fn hits(&self) -> u64 {
        self.sram_hits + self.stash_hits
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        let pkts = if self.packets == 0 { 1 } else { self.packets };
        println!("\n==========================================================");
        println!("MAU STAGE STATISTICS");
        println!("==========================================================");
        println!("packets                  {}", self.packets);
        println!("----------------------------------------------------------");
        println!("MATCH");
        println!("  sram.hits              {}", self.sram_hits);
        println!("  stash.hits             {}", self.stash_hits);
        println!("  stash.overrides        {}", self.stash_overrides);
        println!(
            "  hits.per_packet        {:.2}",
            self.hits() as f64 / pkts as f64
        );
        println!("----------------------------------------------------------");
        println!("ACTION");
        println!("  table.misses           {}", self.table_misses);
        println!("  actions                {}", self.actions);
        println!("  phv.writes             {}", self.phv_writes);
        println!("==========================================================");
    }
}

impl AddAssign for MauStats {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
