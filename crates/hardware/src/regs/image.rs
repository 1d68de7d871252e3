//! Register image of one MAU stage.
//!
//! Holds the last value written to every register of the stage. Writes are
//! stored verbatim; field extraction happens when the stage commits its
//! configuration, so a read returns exactly what was written.

use super::map::MauReg;
use crate::common::constants::{
    ACTION_HV_HALVES, ACTION_HV_WORDS, GROUP_BITS, HASH_GROUPS, IMEM_INSTRUCTIONS,
    LOGICAL_TABLES, MATCH_INPUT_BYTES, MATCH_WORDS, PHV_WORDS, SRAM_COLS, SRAM_ROWS,
    STASH_ENTRIES, STASH_HALVES,
};

/// Per-row stash registers.
#[derive(Clone, Debug, Default)]
pub struct StashRegs {
    /// `stash_hashkey_data[entry]`
    pub hashkey_data: [u32; STASH_ENTRIES],
    /// `stash_bank_enable[entry]`
    pub bank_enable: [u32; STASH_ENTRIES],
    /// `stash_match_address[entry]`
    pub match_address: [u32; STASH_ENTRIES],
    /// `stash_version_valid[entry]`
    pub version_valid: [u32; STASH_ENTRIES],
    /// `stash_data[entry][word]`
    pub data: [[u32; MATCH_WORDS]; STASH_ENTRIES],
    /// `stash_match_mask[half][word]`
    pub match_mask: [[u32; MATCH_WORDS]; STASH_HALVES],
    /// `stash_match_result_bus_select[half]`
    pub result_bus_select: [u32; STASH_HALVES],
    /// `stash_match_input_data_ctl[half]`
    pub input_data_ctl: [u32; STASH_HALVES],
}

/// Per-unit SRAM registers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SramRegs {
    /// `ctl`
    pub ctl: u32,
    /// `bank_enable`
    pub bank_enable: u32,
    /// `match_mask[word]`
    pub match_mask: [u32; MATCH_WORDS],
}

/// Every register of one stage.
#[derive(Clone, Debug)]
pub struct MauRegs {
    /// `input_xbar.byte_ctl[byte]`
    pub input_xbar: [u32; MATCH_INPUT_BYTES],
    /// `hash.galois_field_matrix`, flattened as `[group][row][word]`
    galois: Vec<u32>,
    /// `hash.hash_seed[group][word]`
    pub hash_seed: [[u32; 2]; HASH_GROUPS],
    /// `rams.array.row[row].ram[col]`
    pub sram: [[SramRegs; SRAM_COLS]; SRAM_ROWS],
    /// `rams.array.row[row].stash`
    pub stash: [StashRegs; SRAM_ROWS],
    /// `action_hv_xbar.row[row].ctl_word[half][word]`
    pub action_hv: [[[u32; ACTION_HV_WORDS]; ACTION_HV_HALVES]; SRAM_ROWS],
    /// `imem`, flattened as `[instr][container]`
    imem: Vec<u32>,
    /// `logical_table[table].ctl`
    pub logical_table: [u32; LOGICAL_TABLES],
}

impl Default for MauRegs {
    fn default() -> Self {
        Self::new()
    }
}

impl MauRegs {
    /// Creates a register image with every register zero.
    pub fn new() -> Self {
        Self {
            input_xbar: [0; MATCH_INPUT_BYTES],
            galois: vec![0; HASH_GROUPS * GROUP_BITS * 2],
            hash_seed: [[0; 2]; HASH_GROUPS],
            sram: [[SramRegs::default(); SRAM_COLS]; SRAM_ROWS],
            stash: std::array::from_fn(|_| StashRegs::default()),
            action_hv: [[[0; ACTION_HV_WORDS]; ACTION_HV_HALVES]; SRAM_ROWS],
            imem: vec![0; IMEM_INSTRUCTIONS * PHV_WORDS],
            logical_table: [0; LOGICAL_TABLES],
        }
    }

    /// Writes one register.
    pub fn write(&mut self, reg: MauReg, value: u32) {
        *self.slot_mut(reg) = value;
    }

    /// Reads one register.
    pub fn read(&self, reg: MauReg) -> u32 {
        match reg {
            MauReg::InputXbarByteCtl { byte } => self.input_xbar[byte],
            MauReg::GaloisFieldMatrix { group, row, word } => {
                self.galois[Self::galois_index(group, row, word)]
            }
            MauReg::HashSeed { group, word } => self.hash_seed[group][word],
            MauReg::SramCtl { row, col } => self.sram[row][col].ctl,
            MauReg::SramBankEnable { row, col } => self.sram[row][col].bank_enable,
            MauReg::SramMatchMask { row, col, word } => self.sram[row][col].match_mask[word],
            MauReg::StashHashkeyData { row, entry } => self.stash[row].hashkey_data[entry],
            MauReg::StashBankEnable { row, entry } => self.stash[row].bank_enable[entry],
            MauReg::StashMatchAddress { row, entry } => self.stash[row].match_address[entry],
            MauReg::StashVersionValid { row, entry } => self.stash[row].version_valid[entry],
            MauReg::StashData { row, entry, word } => self.stash[row].data[entry][word],
            MauReg::StashMatchMask { row, half, word } => self.stash[row].match_mask[half][word],
            MauReg::StashResultBusSelect { row, half } => {
                self.stash[row].result_bus_select[half]
            }
            MauReg::StashInputDataCtl { row, half } => self.stash[row].input_data_ctl[half],
            MauReg::ActionHvCtlWord { row, half, word } => self.action_hv[row][half][word],
            MauReg::Imem { instr, container } => self.imem[instr * PHV_WORDS + container],
            MauReg::LogicalTableCtl { table } => self.logical_table[table],
        }
    }

    /// Returns one 52-bit Galois matrix row.
    pub fn galois_row(&self, group: usize, row: usize) -> u64 {
        let lo = u64::from(self.galois[Self::galois_index(group, row, 0)]);
        let hi = u64::from(self.galois[Self::galois_index(group, row, 1)]);
        hi << 32 | lo
    }

    /// Returns the instruction words of one instruction, indexed by container.
    pub fn imem_instruction(&self, instr: usize) -> &[u32] {
        &self.imem[instr * PHV_WORDS..(instr + 1) * PHV_WORDS]
    }

    const fn galois_index(group: usize, row: usize, word: usize) -> usize {
        (group * GROUP_BITS + row) * 2 + word
    }

    fn slot_mut(&mut self, reg: MauReg) -> &mut u32 {
        match reg {
            MauReg::InputXbarByteCtl { byte } => &mut self.input_xbar[byte],
            MauReg::GaloisFieldMatrix { group, row, word } => {
                &mut self.galois[Self::galois_index(group, row, word)]
            }
            MauReg::HashSeed { group, word } => &mut self.hash_seed[group][word],
            MauReg::SramCtl { row, col } => &mut self.sram[row][col].ctl,
            MauReg::SramBankEnable { row, col } => &mut self.sram[row][col].bank_enable,
            MauReg::SramMatchMask { row, col, word } => &mut self.sram[row][col].match_mask[word],
            MauReg::StashHashkeyData { row, entry } => &mut self.stash[row].hashkey_data[entry],
            MauReg::StashBankEnable { row, entry } => &mut self.stash[row].bank_enable[entry],
            MauReg::StashMatchAddress { row, entry } => &mut self.stash[row].match_address[entry],
            MauReg::StashVersionValid { row, entry } => &mut self.stash[row].version_valid[entry],
            MauReg::StashData { row, entry, word } => &mut self.stash[row].data[entry][word],
            MauReg::StashMatchMask { row, half, word } => {
                &mut self.stash[row].match_mask[half][word]
            }
            MauReg::StashResultBusSelect { row, half } => {
                &mut self.stash[row].result_bus_select[half]
            }
            MauReg::StashInputDataCtl { row, half } => &mut self.stash[row].input_data_ctl[half],
            MauReg::ActionHvCtlWord { row, half, word } => &mut self.action_hv[row][half][word],
            MauReg::Imem { instr, container } => &mut self.imem[instr * PHV_WORDS + container],
            MauReg::LogicalTableCtl { table } => &mut self.logical_table[table],
        }
    }
}
