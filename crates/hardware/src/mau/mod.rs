//! Match-Action Unit stage.
//!
//! A `Mau` owns the register image and wide memories of one stage and turns an
//! input PHV into an output PHV. Processing a packet runs these steps:
//! 1. **Commit:** Decodes the register image into typed unit configuration
//!    when any register changed since the last packet.
//! 2. **Match:** Builds the input bus, hashes every group, and looks up the
//!    SRAM units and stash entries of every row.
//! 3. **Arbitrate:** Places hits on the row result buses; stash hits win.
//! 4. **Action:** Runs the logical tables in order against a copy of the PHV.
//!
//! Register writes between packets never affect a packet in flight: the
//! committed configuration is only rebuilt at the start of `process` or by an
//! explicit `commit`.

/// Action data memory, action crossbar, instructions, logical tables.
pub mod action;
/// Galois-field hash units.
pub mod hash;
/// Exact-match input crossbar.
pub mod input_xbar;
/// Row result buses and hit priority.
pub mod result_bus;
/// Exact-match SRAM units.
pub mod sram;
/// Stash entries and halves.
pub mod stash;

use tracing::{debug, trace};

use crate::common::constants::{
    LOGICAL_TABLES, RESULT_BUSES_PER_ROW, SRAM_COLS, SRAM_ROWS, STASH_ENTRIES,
};
use crate::common::data::halves_to_u128;
use crate::common::{LogFlags, ModelError, Result};
use crate::phv::Phv;
use crate::regs::{MauMem, MauMemAddr, MauReg, MauRegAddr, MauRegs};
use crate::stats::MauStats;

use self::action::{ActionDataMem, ActionUnit, TableOutcome};
use self::hash::HashUnit;
use self::input_xbar::InputXbar;
use self::result_bus::{HitSource, Offer, ResultBuses};
use self::sram::{SramArray, SramUnitConfig};
use self::stash::{Stash, StashHalf};

/// Typed configuration decoded from the register image at commit time.
#[derive(Clone, Debug)]
pub struct StageConfig {
    /// Input crossbar.
    pub xbar: InputXbar,
    /// Hash groups.
    pub hash: HashUnit,
    /// SRAM unit controls, `[row][col]`.
    pub sram: [[SramUnitConfig; SRAM_COLS]; SRAM_ROWS],
    /// Stash of each row.
    pub stash: [Stash; SRAM_ROWS],
    /// Action side.
    pub action: ActionUnit,
}

impl StageConfig {
    /// Decodes every unit from the register image.
    pub fn from_regs(regs: &MauRegs) -> Self {
        Self {
            xbar: InputXbar::from_regs(regs),
            hash: HashUnit::from_regs(regs),
            sram: std::array::from_fn(|row| {
                std::array::from_fn(|col| SramUnitConfig::from_regs(regs, row, col))
            }),
            stash: std::array::from_fn(|row| Stash::from_regs(regs, row)),
            action: ActionUnit::from_regs(regs),
        }
    }
}

/// One MAU stage.
#[derive(Clone, Debug)]
pub struct Mau {
    pipe: usize,
    stage: usize,
    regs: MauRegs,
    srams: SramArray,
    adm: ActionDataMem,
    /// `None` while register writes are pending.
    committed: Option<StageConfig>,
    stats: MauStats,
    log_flags: LogFlags,
}

impl Mau {
    /// Creates a stage with every register and memory zero.
    pub fn new(pipe: usize, stage: usize) -> Self {
        Self {
            pipe,
            stage,
            regs: MauRegs::new(),
            srams: SramArray::new(),
            adm: ActionDataMem::new(),
            committed: None,
            stats: MauStats::default(),
            log_flags: LogFlags::NONE,
        }
    }

    /// Returns registers, memories, and counters to their power-on state.
    pub fn reset(&mut self) {
        let log_flags = self.log_flags;
        *self = Self::new(self.pipe, self.stage);
        self.log_flags = log_flags;
    }

    /// Pipe number.
    pub const fn pipe(&self) -> usize {
        self.pipe
    }

    /// Stage number.
    pub const fn stage(&self) -> usize {
        self.stage
    }

    /// Enabled diagnostic categories.
    pub const fn log_flags(&self) -> LogFlags {
        self.log_flags
    }

    /// Replaces the enabled diagnostic categories.
    pub fn set_log_flags(&mut self, flags: LogFlags) {
        self.log_flags = flags;
    }

    /// Counters accumulated since the last reset.
    pub const fn stats(&self) -> &MauStats {
        &self.stats
    }

    /// Whether register writes are waiting for a commit.
    pub const fn is_dirty(&self) -> bool {
        self.committed.is_none()
    }

    /// Register image.
    pub const fn regs(&self) -> &MauRegs {
        &self.regs
    }

    fn reg_error(&self, reg: MauReg) -> ModelError {
        let addr = MauRegAddr {
            pipe: self.pipe,
            stage: self.stage,
            reg,
        };
        ModelError::UnknownRegister(addr.encode().val())
    }

    /// Writes one register.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` when a field of `reg` lies outside
    /// the stage geometry.
    pub fn write_reg(&mut self, reg: MauReg, value: u32) -> Result<()> {
        if !reg.in_range() {
            return Err(self.reg_error(reg));
        }
        if self.log_flags.contains(LogFlags::REGS) {
            trace!(pipe = self.pipe, stage = self.stage, "{reg} <= {value:#010x}");
        }
        self.regs.write(reg, value);
        self.committed = None;
        Ok(())
    }

    /// Reads one register.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` when a field of `reg` lies outside
    /// the stage geometry.
    pub fn read_reg(&self, reg: MauReg) -> Result<u32> {
        if !reg.in_range() {
            return Err(self.reg_error(reg));
        }
        Ok(self.regs.read(reg))
    }

    fn check_mem(&self, mem: MauMem) -> Result<()> {
        if mem.in_range() {
            return Ok(());
        }
        let addr = MauMemAddr {
            pipe: self.pipe,
            stage: self.stage,
            mem,
        };
        Err(ModelError::UnknownMemory(addr.encode().val()))
    }

    /// Writes one 128-bit memory line; `data0` holds bits `[63:0]`.
    ///
    /// Memory contents are read at lookup time, so no commit is needed.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` when the location lies outside the
    /// stage geometry.
    pub fn write_mem(&mut self, mem: MauMem, data0: u64, data1: u64) -> Result<()> {
        self.check_mem(mem)?;
        let value = halves_to_u128(data0, data1);
        if self.log_flags.contains(LogFlags::REGS) {
            trace!(pipe = self.pipe, stage = self.stage, "{mem} <= {value:#034x}");
        }
        match mem {
            MauMem::Sram { row, col, line } => self.srams.write(row, col, line, value),
            MauMem::ActionData { row, line } => self.adm.write(row, line, value),
        }
        Ok(())
    }

    /// Reads one 128-bit memory line.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` when the location lies outside the
    /// stage geometry.
    pub fn read_mem(&self, mem: MauMem) -> Result<u128> {
        self.check_mem(mem)?;
        Ok(match mem {
            MauMem::Sram { row, col, line } => self.srams.read(row, col, line),
            MauMem::ActionData { row, line } => self.adm.read(row, line),
        })
    }

    /// Decodes the register image if it changed; returns the configuration in force.
    pub fn commit(&mut self) -> &StageConfig {
        let regs = &self.regs;
        self.committed
            .get_or_insert_with(|| StageConfig::from_regs(regs))
    }

    /// Processes one PHV, returning the output PHV.
    pub fn process(&mut self, phv: &Phv) -> Phv {
        let regs = &self.regs;
        let cfg = self
            .committed
            .get_or_insert_with(|| StageConfig::from_regs(regs));
        let flags = self.log_flags;
        let (pipe, stage) = (self.pipe, self.stage);
        let version = phv.version();
        let mut stats = MauStats {
            packets: 1,
            ..MauStats::default()
        };

        let input = cfg.xbar.build(phv);
        let hashes = cfg.hash.compute(&input);
        if flags.contains(LogFlags::HASH) {
            for (group, h) in hashes.iter().enumerate() {
                debug!(pipe, stage, group, line = h.line(), bank = h.bank(), "hash {:#015x}", h.0);
            }
        }

        let mut buses = ResultBuses::new();
        for row in 0..SRAM_ROWS {
            for (col, unit) in cfg.sram[row].iter().enumerate() {
                if !unit.enabled {
                    continue;
                }
                let key = input.group(unit.group);
                let found = self
                    .srams
                    .lookup(unit, row, col, hashes[unit.group], key, version);
                if let Some(hit) = found {
                    stats.sram_hits += 1;
                    if flags.contains(LogFlags::SRAM) {
                        debug!(pipe, stage, row, col, address = hit.address, "sram hit");
                    }
                    let _ = buses.offer(ResultBuses::bus_id(row, unit.bus_sel), hit);
                }
            }

            let row_stash = &cfg.stash[row];
            if !row_stash.any_enabled() {
                continue;
            }
            for entry in 0..STASH_ENTRIES {
                let half = &row_stash.halves[StashHalf::of_entry(entry)];
                if !half.enabled {
                    continue;
                }
                let key = input.group(half.group);
                match row_stash.evaluate(row, entry, hashes[half.group], key, version) {
                    Ok(hit) => {
                        stats.stash_hits += 1;
                        if flags.contains(LogFlags::STASH) {
                            debug!(pipe, stage, row, entry, address = hit.address, "stash hit");
                        }
                        for sel in 0..RESULT_BUSES_PER_ROW {
                            if half.result_bus_select & (1 << sel) == 0 {
                                continue;
                            }
                            let bus = ResultBuses::bus_id(row, sel);
                            if let Offer::Superseded(HitSource::Sram { col }) = buses.offer(bus, hit) {
                                stats.stash_overrides += 1;
                                if flags.contains(LogFlags::STASH) {
                                    debug!(pipe, stage, row, entry, col, bus, "stash overrides sram");
                                }
                            }
                        }
                    }
                    Err(miss) => {
                        if flags.contains(LogFlags::STASH) {
                            trace!(pipe, stage, row, entry, ?miss, "stash miss");
                        }
                    }
                }
            }
        }

        let mut out = phv.clone();
        for table in 0..LOGICAL_TABLES {
            match cfg.action.run_table(table, &buses, &self.adm, &mut out) {
                TableOutcome::Idle => {}
                TableOutcome::Miss => stats.table_misses += 1,
                TableOutcome::Hit { bus, instr, writes } => {
                    stats.actions += 1;
                    stats.phv_writes += writes as u64;
                    if flags.contains(LogFlags::ACTION) {
                        debug!(pipe, stage, table, bus, instr, writes, "action");
                    }
                }
            }
        }

        self.stats.merge(&stats);
        out
    }
}
