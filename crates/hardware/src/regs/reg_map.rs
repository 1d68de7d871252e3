//! Typed accessors for register and memory addresses.
//!
//! Register sequences address fields by path, e.g.
//! `ref_mau(0, 0).rams().row(3).stash().hashkey_data(1)` for
//! `rams.array.row[3].stash.stash_hashkey_data[1]`. Each leaf accessor returns the
//! raw address ready for `out_word` or `indirect_write`.
//!
//! Pipe and stage are checked by `ref_mau`; every other index is checked by
//! the leaf accessor. An index outside the geometry is an error, never an
//! address that lands on a neighbouring field.

use super::map::{MauMem, MauMemAddr, MauReg, MauRegAddr};
use crate::common::constants::{MAX_PIPES, MAX_STAGES};
use crate::common::{ModelError, Result};

/// Entry point for register-map lookups.
#[derive(Debug, Clone, Copy)]
pub struct RegisterUtils;

impl RegisterUtils {
    /// Returns the register map of one MAU stage.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NoSuchStage` when `pipe` or `stage` is past the
    /// chip geometry.
    pub fn ref_mau(pipe: usize, stage: usize) -> Result<MauRegMap> {
        if pipe >= MAX_PIPES || stage >= MAX_STAGES {
            return Err(ModelError::NoSuchStage { pipe, stage });
        }
        Ok(MauRegMap { pipe, stage })
    }
}

/// Register map of one MAU stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MauRegMap {
    pipe: usize,
    stage: usize,
}

impl MauRegMap {
    /// Map of a stage already known to exist in the configured chip.
    pub(crate) const fn of_present_stage(pipe: usize, stage: usize) -> Self {
        Self { pipe, stage }
    }

    fn reg(self, reg: MauReg) -> Result<u32> {
        if !reg.in_range() {
            return Err(ModelError::FieldOutOfRange(reg.to_string()));
        }
        Ok(MauRegAddr {
            pipe: self.pipe,
            stage: self.stage,
            reg,
        }
        .encode()
        .val())
    }

    fn mem(self, mem: MauMem) -> Result<u64> {
        if !mem.in_range() {
            return Err(ModelError::FieldOutOfRange(mem.to_string()));
        }
        Ok(MauMemAddr {
            pipe: self.pipe,
            stage: self.stage,
            mem,
        }
        .encode()
        .val())
    }

    /// Pipe this map addresses.
    pub const fn pipe(self) -> usize {
        self.pipe
    }

    /// Stage this map addresses.
    pub const fn stage(self) -> usize {
        self.stage
    }

    /// `input_xbar.byte_ctl[byte]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn input_xbar_byte_ctl(self, byte: usize) -> Result<u32> {
        self.reg(MauReg::InputXbarByteCtl { byte })
    }

    /// `hash.galois_field_matrix[group][row][word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn galois_field_matrix(self, group: usize, row: usize, word: usize) -> Result<u32> {
        self.reg(MauReg::GaloisFieldMatrix { group, row, word })
    }

    /// `hash.hash_seed[group][word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn hash_seed(self, group: usize, word: usize) -> Result<u32> {
        self.reg(MauReg::HashSeed { group, word })
    }

    /// `rams.array`
    pub const fn rams(self) -> RamsMap {
        RamsMap { mau: self }
    }

    /// `action_hv_xbar.row[row].ctl_word[half][word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn action_hv_ctl_word(self, row: usize, half: usize, word: usize) -> Result<u32> {
        self.reg(MauReg::ActionHvCtlWord { row, half, word })
    }

    /// `adm.row[row].line[line]` (wide memory)
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn action_data(self, row: usize, line: usize) -> Result<u64> {
        self.mem(MauMem::ActionData { row, line })
    }

    /// `imem[instr][container]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn imem(self, instr: usize, container: usize) -> Result<u32> {
        self.reg(MauReg::Imem { instr, container })
    }

    /// `logical_table[table].ctl`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn logical_table_ctl(self, table: usize) -> Result<u32> {
        self.reg(MauReg::LogicalTableCtl { table })
    }
}

/// `rams.array` of one stage.
#[derive(Debug, Clone, Copy)]
pub struct RamsMap {
    mau: MauRegMap,
}

impl RamsMap {
    /// `rams.array.row[row]`
    pub const fn row(self, row: usize) -> RowMap {
        RowMap { mau: self.mau, row }
    }
}

/// `rams.array.row[row]`
#[derive(Debug, Clone, Copy)]
pub struct RowMap {
    mau: MauRegMap,
    row: usize,
}

impl RowMap {
    /// `rams.array.row[row].ram[col]`
    pub const fn ram(self, col: usize) -> RamMap {
        RamMap {
            mau: self.mau,
            row: self.row,
            col,
        }
    }

    /// `rams.array.row[row].stash`
    pub const fn stash(self) -> StashMap {
        StashMap {
            mau: self.mau,
            row: self.row,
        }
    }
}

/// One SRAM unit's registers and lines.
#[derive(Debug, Clone, Copy)]
pub struct RamMap {
    mau: MauRegMap,
    row: usize,
    col: usize,
}

impl RamMap {
    /// `.ctl`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn ctl(self) -> Result<u32> {
        self.mau.reg(MauReg::SramCtl {
            row: self.row,
            col: self.col,
        })
    }

    /// `.bank_enable`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn bank_enable(self) -> Result<u32> {
        self.mau.reg(MauReg::SramBankEnable {
            row: self.row,
            col: self.col,
        })
    }

    /// `.match_mask[word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn match_mask(self, word: usize) -> Result<u32> {
        self.mau.reg(MauReg::SramMatchMask {
            row: self.row,
            col: self.col,
            word,
        })
    }

    /// `.line[line]` (wide memory)
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn line(self, line: usize) -> Result<u64> {
        self.mau.mem(MauMem::Sram {
            row: self.row,
            col: self.col,
            line,
        })
    }
}

/// One row's stash registers.
#[derive(Debug, Clone, Copy)]
pub struct StashMap {
    mau: MauRegMap,
    row: usize,
}

impl StashMap {
    /// `.stash_hashkey_data[entry]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn hashkey_data(self, entry: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashHashkeyData {
            row: self.row,
            entry,
        })
    }

    /// `.stash_bank_enable[entry]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn bank_enable(self, entry: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashBankEnable {
            row: self.row,
            entry,
        })
    }

    /// `.stash_match_address[entry]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn match_address(self, entry: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashMatchAddress {
            row: self.row,
            entry,
        })
    }

    /// `.stash_version_valid[entry]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn version_valid(self, entry: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashVersionValid {
            row: self.row,
            entry,
        })
    }

    /// `.stash_data[entry][word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn data(self, entry: usize, word: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashData {
            row: self.row,
            entry,
            word,
        })
    }

    /// `.stash_match_mask[half][word]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn match_mask(self, half: usize, word: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashMatchMask {
            row: self.row,
            half,
            word,
        })
    }

    /// `.stash_match_result_bus_select[half]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn result_bus_select(self, half: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashResultBusSelect {
            row: self.row,
            half,
        })
    }

    /// `.stash_match_input_data_ctl[half]`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FieldOutOfRange` when an index is past the stage geometry.
    pub fn input_data_ctl(self, half: usize) -> Result<u32> {
        self.mau.reg(MauReg::StashInputDataCtl {
            row: self.row,
            half,
        })
    }
}
