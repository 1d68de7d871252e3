//! Register interconnect.
//!
//! Routes decoded register and memory addresses to the stage that owns them.
//! It provides:
//! 1. **Stage storage:** One `Mau` per configured pipe and stage, pipe-major.
//! 2. **Routing:** Raw addresses are decoded, checked against the configured
//!    topology, and dispatched to the owning stage.

use crate::common::{MemAddr, ModelError, RegAddr, Result};
use crate::config::ChipConfig;
use crate::mau::Mau;
use crate::regs::{MauMemAddr, MauRegAddr};

/// Every stage of the chip, addressed by pipe and stage.
#[derive(Clone, Debug)]
pub struct Interconnect {
    pipes: usize,
    stages: usize,
    maus: Vec<Mau>,
}

impl Interconnect {
    /// Creates the stages of the configured topology.
    pub fn new(chip: &ChipConfig) -> Self {
        let maus = (0..chip.pipes)
            .flat_map(|pipe| (0..chip.stages).map(move |stage| Mau::new(pipe, stage)))
            .collect();
        Self {
            pipes: chip.pipes,
            stages: chip.stages,
            maus,
        }
    }

    fn index(&self, pipe: usize, stage: usize) -> Result<usize> {
        if pipe >= self.pipes || stage >= self.stages {
            return Err(ModelError::NoSuchStage { pipe, stage });
        }
        Ok(pipe * self.stages + stage)
    }

    /// Returns one stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` outside the configured topology.
    pub fn mau(&self, pipe: usize, stage: usize) -> Result<&Mau> {
        let idx = self.index(pipe, stage)?;
        Ok(&self.maus[idx])
    }

    /// Returns one stage mutably.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` outside the configured topology.
    pub fn mau_mut(&mut self, pipe: usize, stage: usize) -> Result<&mut Mau> {
        let idx = self.index(pipe, stage)?;
        Ok(&mut self.maus[idx])
    }

    /// Stages of one pipe in processing order.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when the pipe is not configured.
    pub fn pipe_mut(&mut self, pipe: usize) -> Result<&mut [Mau]> {
        let start = self.index(pipe, 0)?;
        Ok(&mut self.maus[start..start + self.stages])
    }

    /// Every stage, pipe-major.
    pub fn iter(&self) -> impl Iterator<Item = &Mau> {
        self.maus.iter()
    }

    /// Every stage mutably, pipe-major.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Mau> {
        self.maus.iter_mut()
    }

    /// Decodes and applies a register write.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` for undecodable addresses and
    /// `ModelError::NoSuchStage` for stages outside the topology.
    pub fn write_reg(&mut self, addr: RegAddr, value: u32) -> Result<()> {
        let target = MauRegAddr::decode(addr)?;
        self.mau_mut(target.pipe, target.stage)?
            .write_reg(target.reg, value)
    }

    /// Decodes and performs a register read.
    ///
    /// # Errors
    ///
    /// As for `write_reg`.
    pub fn read_reg(&self, addr: RegAddr) -> Result<u32> {
        let target = MauRegAddr::decode(addr)?;
        self.mau(target.pipe, target.stage)?.read_reg(target.reg)
    }

    /// Decodes and applies a memory line write.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` for undecodable addresses and
    /// `ModelError::NoSuchStage` for stages outside the topology.
    pub fn write_mem(&mut self, addr: MemAddr, data0: u64, data1: u64) -> Result<()> {
        let target = MauMemAddr::decode(addr)?;
        self.mau_mut(target.pipe, target.stage)?
            .write_mem(target.mem, data0, data1)
    }

    /// Decodes and performs a memory line read.
    ///
    /// # Errors
    ///
    /// As for `write_mem`.
    pub fn read_mem(&self, addr: MemAddr) -> Result<u128> {
        let target = MauMemAddr::decode(addr)?;
        self.mau(target.pipe, target.stage)?.read_mem(target.mem)
    }
}
