//! Scoped model access for tests.
//!
//! `TestUtil` borrows a `Model` for one pipe and stage. Register pokes and
//! memory writes pass straight through; packets are allocated, sent into a
//! port, and the returned PHV inspected. `finish_test` hands back the
//! counters and leaves the model reset for the next test.

use crate::common::{LogFlags, Result};
use crate::phv::Phv;
use crate::regs::MauRegMap;
use crate::sim::Model;
use crate::soc::{Port, RegisterSink};
use crate::stats::MauStats;

/// A model borrowed for one test, scoped to one pipe and stage.
#[derive(Debug)]
pub struct TestUtil<'m> {
    model: &'m mut Model,
    pipe: usize,
    stage: usize,
}

impl<'m> TestUtil<'m> {
    /// Scopes `model` to one stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when the stage is not present.
    pub fn new(model: &'m mut Model, pipe: usize, stage: usize) -> Result<Self> {
        let _ = model.mau(pipe, stage)?;
        Ok(Self { model, pipe, stage })
    }

    /// Register map of the scoped stage.
    pub const fn reg_map(&self) -> MauRegMap {
        MauRegMap::of_present_stage(self.pipe, self.stage)
    }

    /// The underlying model.
    pub fn model(&mut self) -> &mut Model {
        &mut *self.model
    }

    /// Writes one register at a raw address.
    ///
    /// # Errors
    ///
    /// As for `Model::write_reg`.
    pub fn out_word(&mut self, addr: u32, value: u32) -> Result<()> {
        self.model.write_reg(addr, value)
    }

    /// Writes one memory line at a raw address.
    ///
    /// # Errors
    ///
    /// As for `Model::indirect_write`.
    pub fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        self.model.indirect_write(addr, data0, data1)
    }

    /// Allocates an empty ingress PHV at version 0.
    pub fn phv_alloc(&self) -> Phv {
        Phv::new()
    }

    /// Looks up a port.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidPort`.
    pub fn port_get(&self, id: u16) -> Result<Port> {
        self.model.port(id)
    }

    /// Sends a PHV into a port and returns the PHV leaving the pipe.
    ///
    /// # Errors
    ///
    /// As for `Model::process`.
    pub fn port_process_inbound(&mut self, port: &Port, phv: &Phv) -> Result<Phv> {
        self.model.process(port, phv)
    }

    /// Replaces the diagnostics of the scoped stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` if the stage disappeared.
    pub fn update_log_flags(&mut self, flags: LogFlags) -> Result<()> {
        self.model.mau_mut(self.pipe, self.stage)?.set_log_flags(flags);
        Ok(())
    }

    /// Returns the counters of the whole model and resets it.
    pub fn finish_test(self) -> MauStats {
        let stats = self.model.stats();
        self.model.reset();
        stats
    }
}

impl RegisterSink for TestUtil<'_> {
    fn out_word(&mut self, addr: u32, value: u32) -> Result<()> {
        Self::out_word(self, addr, value)
    }

    fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        Self::indirect_write(self, addr, data0, data1)
    }
}
