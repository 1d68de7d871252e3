//! Top-level model.
//!
//! `Model` is the explicit context every operation goes through: there is no
//! process-wide chip instance. It provides:
//! 1. **Register access:** Raw `out_word`/`indirect_write` addresses are
//!    decoded and routed to the owning stage.
//! 2. **Packet processing:** A PHV entering a port runs through every stage of
//!    the port's pipe in order.
//! 3. **Lifecycle:** `reset` returns every stage to power-on state.

use tracing::info;

use crate::common::{LogFlags, MemAddr, RegAddr, Result};
use crate::config::Config;
use crate::mau::Mau;
use crate::phv::Phv;
use crate::soc::{Chip, Port, RegisterSink};
use crate::stats::MauStats;

/// The modelled chip plus its configuration.
#[derive(Clone, Debug)]
pub struct Model {
    config: Config,
    chip: Chip,
}

impl Model {
    /// Builds a model from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidConfig` when the configuration fails validation.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let chip = Chip::new(&config.chip, config.general.log_flags);
        Ok(Self { config, chip })
    }

    /// Configuration the model was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns every register, memory, and counter to power-on state.
    pub fn reset(&mut self) {
        self.chip.reset();
    }

    /// Writes one register at a raw address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` or `ModelError::NoSuchStage`.
    pub fn write_reg(&mut self, addr: u32, value: u32) -> Result<()> {
        self.chip.bus.write_reg(RegAddr(addr), value)
    }

    /// Reads one register at a raw address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` or `ModelError::NoSuchStage`.
    pub fn read_reg(&self, addr: u32) -> Result<u32> {
        self.chip.bus.read_reg(RegAddr(addr))
    }

    /// Writes one 128-bit memory line at a raw address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` or `ModelError::NoSuchStage`.
    pub fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        self.chip.bus.write_mem(MemAddr(addr), data0, data1)
    }

    /// Reads one 128-bit memory line at a raw address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` or `ModelError::NoSuchStage`.
    pub fn read_mem(&self, addr: u64) -> Result<u128> {
        self.chip.bus.read_mem(MemAddr(addr))
    }

    /// Returns one stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` outside the configured topology.
    pub fn mau(&self, pipe: usize, stage: usize) -> Result<&Mau> {
        self.chip.bus.mau(pipe, stage)
    }

    /// Returns one stage mutably.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` outside the configured topology.
    pub fn mau_mut(&mut self, pipe: usize, stage: usize) -> Result<&mut Mau> {
        self.chip.bus.mau_mut(pipe, stage)
    }

    /// Validates a port id against this model's topology.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidPort`.
    pub fn port(&self, id: u16) -> Result<Port> {
        Port::new(id, &self.config.chip)
    }

    /// Runs a PHV through every stage of the port's pipe; the input is not modified.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when the port's pipe is not present.
    pub fn process(&mut self, port: &Port, phv: &Phv) -> Result<Phv> {
        let out = self.chip.process(port.pipe(), phv)?;
        if self.config.general.trace_packets {
            info!(port = port.id(), "in  {:?}", phv.iter_valid().collect::<Vec<_>>());
            info!(port = port.id(), "out {:?}", out.iter_valid().collect::<Vec<_>>());
        }
        Ok(out)
    }

    /// Counters of every stage combined.
    pub fn stats(&self) -> MauStats {
        self.chip.stats()
    }

    /// Diagnostics currently enabled.
    pub const fn log_flags(&self) -> LogFlags {
        self.config.general.log_flags
    }

    /// Replaces the diagnostics of every stage.
    pub fn set_log_flags(&mut self, flags: LogFlags) {
        self.config.general.log_flags = flags;
        self.chip.set_log_flags(flags);
    }
}

impl RegisterSink for Model {
    fn out_word(&mut self, addr: u32, value: u32) -> Result<()> {
        self.write_reg(addr, value)
    }

    fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        Self::indirect_write(self, addr, data0, data1)
    }
}
