//! Register and memory address map.
//!
//! Every register the stage exposes is one variant of [`MauReg`]; every wide
//! memory location is one variant of [`MauMem`]. Both encode to and decode
//! from the raw address formats in [`crate::common::addr`], so register
//! sequences produced by external tooling land on the same fields bit for bit.

use std::fmt;

use crate::common::addr::{MemAddr, RegAddr};
use crate::common::constants::{
    ACTION_DATA_LINES, ACTION_HV_HALVES, ACTION_HV_WORDS, GROUP_BITS, HASH_GROUPS,
    IMEM_INSTRUCTIONS, LOGICAL_TABLES, MATCH_INPUT_BYTES, MATCH_WORDS, MAX_PIPES, MAX_STAGES,
    PHV_WORDS, SRAM_COLS, SRAM_LINES, SRAM_ROWS, STASH_ENTRIES, STASH_HALVES,
};
use crate::common::{ModelError, Result};

/// Register family ids, stored in address bits `[25:21]`.
mod family {
    pub const INPUT_XBAR_BYTE_CTL: u32 = 0;
    pub const GALOIS_FIELD_MATRIX: u32 = 1;
    pub const HASH_SEED: u32 = 2;
    pub const SRAM_CTL: u32 = 3;
    pub const SRAM_BANK_ENABLE: u32 = 4;
    pub const SRAM_MATCH_MASK: u32 = 5;
    pub const STASH_HASHKEY_DATA: u32 = 6;
    pub const STASH_BANK_ENABLE: u32 = 7;
    pub const STASH_MATCH_ADDRESS: u32 = 8;
    pub const STASH_VERSION_VALID: u32 = 9;
    pub const STASH_DATA: u32 = 10;
    pub const STASH_MATCH_MASK: u32 = 11;
    pub const STASH_RESULT_BUS_SELECT: u32 = 12;
    pub const STASH_INPUT_DATA_CTL: u32 = 13;
    pub const ACTION_HV_CTL_WORD: u32 = 14;
    pub const IMEM: u32 = 15;
    pub const LOGICAL_TABLE_CTL: u32 = 16;
}

/// Memory type ids, stored in address bits `[35:32]`.
mod mem_type {
    pub const SRAM: u64 = 0;
    pub const ACTION_DATA: u64 = 1;
}

/// One 32-bit register of a MAU stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MauReg {
    /// Exact-match input crossbar control for one input bus byte.
    InputXbarByteCtl {
        /// Input bus byte (0..128).
        byte: usize,
    },
    /// One half of one Galois matrix row.
    GaloisFieldMatrix {
        /// Hash group.
        group: usize,
        /// Input bit the row belongs to (0..128).
        row: usize,
        /// 0 = bits `[31:0]`, 1 = bits `[51:32]`.
        word: usize,
    },
    /// One half of a hash group's seed.
    HashSeed {
        /// Hash group.
        group: usize,
        /// 0 = bits `[31:0]`, 1 = bits `[51:32]`.
        word: usize,
    },
    /// SRAM unit control (enable, input group, result bus, vpn).
    SramCtl {
        /// SRAM row.
        row: usize,
        /// SRAM column.
        col: usize,
    },
    /// SRAM unit bank enable.
    SramBankEnable {
        /// SRAM row.
        row: usize,
        /// SRAM column.
        col: usize,
    },
    /// One word of an SRAM unit's match mask.
    SramMatchMask {
        /// SRAM row.
        row: usize,
        /// SRAM column.
        col: usize,
        /// Mask word (0..4).
        word: usize,
    },
    /// Stash entry hash key.
    StashHashkeyData {
        /// Row owning the stash.
        row: usize,
        /// Stash entry.
        entry: usize,
    },
    /// Stash entry bank enable.
    StashBankEnable {
        /// Row owning the stash.
        row: usize,
        /// Stash entry.
        entry: usize,
    },
    /// Stash entry match address.
    StashMatchAddress {
        /// Row owning the stash.
        row: usize,
        /// Stash entry.
        entry: usize,
    },
    /// Stash entry per-version valid bits.
    StashVersionValid {
        /// Row owning the stash.
        row: usize,
        /// Stash entry.
        entry: usize,
    },
    /// One word of a stash entry's data.
    StashData {
        /// Row owning the stash.
        row: usize,
        /// Stash entry.
        entry: usize,
        /// Data word (0..4).
        word: usize,
    },
    /// One word of a stash half's match mask.
    StashMatchMask {
        /// Row owning the stash.
        row: usize,
        /// Stash half.
        half: usize,
        /// Mask word (0..4).
        word: usize,
    },
    /// Result buses driven by a stash half.
    StashResultBusSelect {
        /// Row owning the stash.
        row: usize,
        /// Stash half.
        half: usize,
    },
    /// Enable and input group of a stash half.
    StashInputDataCtl {
        /// Row owning the stash.
        row: usize,
        /// Stash half.
        half: usize,
    },
    /// Four packed byte lanes of the action half-word crossbar.
    ActionHvCtlWord {
        /// Row whose action data feeds the crossbar.
        row: usize,
        /// Crossbar half.
        half: usize,
        /// Control word (0..16).
        word: usize,
    },
    /// Instruction word for one PHV container.
    Imem {
        /// Instruction index.
        instr: usize,
        /// PHV container.
        container: usize,
    },
    /// Logical table control (enable, result bus mask).
    LogicalTableCtl {
        /// Logical table.
        table: usize,
    },
}

impl MauReg {
    /// Family id of this register.
    pub const fn family(&self) -> u32 {
        match self {
            Self::InputXbarByteCtl { .. } => family::INPUT_XBAR_BYTE_CTL,
            Self::GaloisFieldMatrix { .. } => family::GALOIS_FIELD_MATRIX,
            Self::HashSeed { .. } => family::HASH_SEED,
            Self::SramCtl { .. } => family::SRAM_CTL,
            Self::SramBankEnable { .. } => family::SRAM_BANK_ENABLE,
            Self::SramMatchMask { .. } => family::SRAM_MATCH_MASK,
            Self::StashHashkeyData { .. } => family::STASH_HASHKEY_DATA,
            Self::StashBankEnable { .. } => family::STASH_BANK_ENABLE,
            Self::StashMatchAddress { .. } => family::STASH_MATCH_ADDRESS,
            Self::StashVersionValid { .. } => family::STASH_VERSION_VALID,
            Self::StashData { .. } => family::STASH_DATA,
            Self::StashMatchMask { .. } => family::STASH_MATCH_MASK,
            Self::StashResultBusSelect { .. } => family::STASH_RESULT_BUS_SELECT,
            Self::StashInputDataCtl { .. } => family::STASH_INPUT_DATA_CTL,
            Self::ActionHvCtlWord { .. } => family::ACTION_HV_CTL_WORD,
            Self::Imem { .. } => family::IMEM,
            Self::LogicalTableCtl { .. } => family::LOGICAL_TABLE_CTL,
        }
    }

    /// Offset of this register within its family.
    pub const fn offset(&self) -> u32 {
        let off = match *self {
            Self::InputXbarByteCtl { byte } => byte,
            Self::GaloisFieldMatrix { group, row, word } => group << 8 | row << 1 | word,
            Self::HashSeed { group, word } => group << 1 | word,
            Self::SramCtl { row, col } | Self::SramBankEnable { row, col } => row << 4 | col,
            Self::SramMatchMask { row, col, word } => row << 6 | col << 2 | word,
            Self::StashHashkeyData { row, entry }
            | Self::StashBankEnable { row, entry }
            | Self::StashMatchAddress { row, entry }
            | Self::StashVersionValid { row, entry } => row << 2 | entry,
            Self::StashData { row, entry, word } => row << 4 | entry << 2 | word,
            Self::StashMatchMask { row, half, word } => row << 3 | half << 2 | word,
            Self::StashResultBusSelect { row, half } | Self::StashInputDataCtl { row, half } => {
                row << 1 | half
            }
            Self::ActionHvCtlWord { row, half, word } => row << 5 | half << 4 | word,
            Self::Imem { instr, container } => instr << 8 | container,
            Self::LogicalTableCtl { table } => table,
        };
        off as u32
    }

    /// Decodes a family id and offset, rejecting out-of-range fields.
    pub fn decode(family_id: u32, offset: u32) -> Option<Self> {
        let off = offset as usize;
        let reg = match family_id {
            family::INPUT_XBAR_BYTE_CTL => Self::InputXbarByteCtl { byte: off },
            family::GALOIS_FIELD_MATRIX => Self::GaloisFieldMatrix {
                group: off >> 8,
                row: (off >> 1) & 0x7F,
                word: off & 1,
            },
            family::HASH_SEED => Self::HashSeed {
                group: off >> 1,
                word: off & 1,
            },
            family::SRAM_CTL => Self::SramCtl {
                row: off >> 4,
                col: off & 0xF,
            },
            family::SRAM_BANK_ENABLE => Self::SramBankEnable {
                row: off >> 4,
                col: off & 0xF,
            },
            family::SRAM_MATCH_MASK => Self::SramMatchMask {
                row: off >> 6,
                col: (off >> 2) & 0xF,
                word: off & 3,
            },
            family::STASH_HASHKEY_DATA => Self::StashHashkeyData {
                row: off >> 2,
                entry: off & 3,
            },
            family::STASH_BANK_ENABLE => Self::StashBankEnable {
                row: off >> 2,
                entry: off & 3,
            },
            family::STASH_MATCH_ADDRESS => Self::StashMatchAddress {
                row: off >> 2,
                entry: off & 3,
            },
            family::STASH_VERSION_VALID => Self::StashVersionValid {
                row: off >> 2,
                entry: off & 3,
            },
            family::STASH_DATA => Self::StashData {
                row: off >> 4,
                entry: (off >> 2) & 3,
                word: off & 3,
            },
            family::STASH_MATCH_MASK => Self::StashMatchMask {
                row: off >> 3,
                half: (off >> 2) & 1,
                word: off & 3,
            },
            family::STASH_RESULT_BUS_SELECT => Self::StashResultBusSelect {
                row: off >> 1,
                half: off & 1,
            },
            family::STASH_INPUT_DATA_CTL => Self::StashInputDataCtl {
                row: off >> 1,
                half: off & 1,
            },
            family::ACTION_HV_CTL_WORD => Self::ActionHvCtlWord {
                row: off >> 5,
                half: (off >> 4) & 1,
                word: off & 0xF,
            },
            family::IMEM => Self::Imem {
                instr: off >> 8,
                container: off & 0xFF,
            },
            family::LOGICAL_TABLE_CTL => Self::LogicalTableCtl { table: off },
            _ => return None,
        };
        reg.in_range().then_some(reg)
    }

    /// Returns whether every field lies inside the stage geometry.
    pub const fn in_range(&self) -> bool {
        match *self {
            Self::InputXbarByteCtl { byte } => byte < MATCH_INPUT_BYTES,
            Self::GaloisFieldMatrix { group, row, word } => {
                group < HASH_GROUPS && row < GROUP_BITS && word < 2
            }
            Self::HashSeed { group, word } => group < HASH_GROUPS && word < 2,
            Self::SramCtl { row, col } | Self::SramBankEnable { row, col } => {
                row < SRAM_ROWS && col < SRAM_COLS
            }
            Self::SramMatchMask { row, col, word } => {
                row < SRAM_ROWS && col < SRAM_COLS && word < MATCH_WORDS
            }
            Self::StashHashkeyData { row, entry }
            | Self::StashBankEnable { row, entry }
            | Self::StashMatchAddress { row, entry }
            | Self::StashVersionValid { row, entry } => row < SRAM_ROWS && entry < STASH_ENTRIES,
            Self::StashData { row, entry, word } => {
                row < SRAM_ROWS && entry < STASH_ENTRIES && word < MATCH_WORDS
            }
            Self::StashMatchMask { row, half, word } => {
                row < SRAM_ROWS && half < STASH_HALVES && word < MATCH_WORDS
            }
            Self::StashResultBusSelect { row, half } | Self::StashInputDataCtl { row, half } => {
                row < SRAM_ROWS && half < STASH_HALVES
            }
            Self::ActionHvCtlWord { row, half, word } => {
                row < SRAM_ROWS && half < ACTION_HV_HALVES && word < ACTION_HV_WORDS
            }
            Self::Imem { instr, container } => {
                instr < IMEM_INSTRUCTIONS && container < PHV_WORDS
            }
            Self::LogicalTableCtl { table } => table < LOGICAL_TABLES,
        }
    }
}

impl fmt::Display for MauReg {
    /// Formats the register as its path in the register map.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InputXbarByteCtl { byte } => write!(f, "input_xbar.byte_ctl[{byte}]"),
            Self::GaloisFieldMatrix { group, row, word } => {
                write!(f, "hash.galois_field_matrix[{group}][{row}][{word}]")
            }
            Self::HashSeed { group, word } => write!(f, "hash.hash_seed[{group}][{word}]"),
            Self::SramCtl { row, col } => write!(f, "rams.array.row[{row}].ram[{col}].ctl"),
            Self::SramBankEnable { row, col } => {
                write!(f, "rams.array.row[{row}].ram[{col}].bank_enable")
            }
            Self::SramMatchMask { row, col, word } => {
                write!(f, "rams.array.row[{row}].ram[{col}].match_mask[{word}]")
            }
            Self::StashHashkeyData { row, entry } => {
                write!(f, "rams.array.row[{row}].stash.stash_hashkey_data[{entry}]")
            }
            Self::StashBankEnable { row, entry } => {
                write!(f, "rams.array.row[{row}].stash.stash_bank_enable[{entry}]")
            }
            Self::StashMatchAddress { row, entry } => {
                write!(f, "rams.array.row[{row}].stash.stash_match_address[{entry}]")
            }
            Self::StashVersionValid { row, entry } => {
                write!(f, "rams.array.row[{row}].stash.stash_version_valid[{entry}]")
            }
            Self::StashData { row, entry, word } => {
                write!(f, "rams.array.row[{row}].stash.stash_data[{entry}][{word}]")
            }
            Self::StashMatchMask { row, half, word } => {
                write!(f, "rams.array.row[{row}].stash.stash_match_mask[{half}][{word}]")
            }
            Self::StashResultBusSelect { row, half } => write!(
                f,
                "rams.array.row[{row}].stash.stash_match_result_bus_select[{half}]"
            ),
            Self::StashInputDataCtl { row, half } => write!(
                f,
                "rams.array.row[{row}].stash.stash_match_input_data_ctl[{half}]"
            ),
            Self::ActionHvCtlWord { row, half, word } => {
                write!(f, "action_hv_xbar.row[{row}].ctl_word[{half}][{word}]")
            }
            Self::Imem { instr, container } => write!(f, "imem[{instr}][{container}]"),
            Self::LogicalTableCtl { table } => write!(f, "logical_table[{table}].ctl"),
        }
    }
}

/// A register together with the pipe and stage that own it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MauRegAddr {
    /// Pipe number.
    pub pipe: usize,
    /// Stage number.
    pub stage: usize,
    /// Register within the stage.
    pub reg: MauReg,
}

impl MauRegAddr {
    /// Encodes the raw 32-bit address.
    pub const fn encode(&self) -> RegAddr {
        RegAddr(
            (self.pipe as u32) << RegAddr::PIPE_SHIFT
                | (self.stage as u32) << RegAddr::STAGE_SHIFT
                | self.reg.family() << RegAddr::FAMILY_SHIFT
                | self.reg.offset(),
        )
    }

    /// Decodes a raw 32-bit address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownRegister` when the family is unknown or a
    /// field is outside the stage geometry.
    pub fn decode(addr: RegAddr) -> Result<Self> {
        let reg = MauReg::decode(addr.family(), addr.offset())
            .ok_or(ModelError::UnknownRegister(addr.val()))?;
        if addr.pipe() >= MAX_PIPES || addr.stage() >= MAX_STAGES {
            return Err(ModelError::UnknownRegister(addr.val()));
        }
        Ok(Self {
            pipe: addr.pipe(),
            stage: addr.stage(),
            reg,
        })
    }
}

impl fmt::Display for MauRegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipe[{}].mau[{}].{}", self.pipe, self.stage, self.reg)
    }
}

/// One 128-bit location of a stage's wide memories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MauMem {
    /// An exact-match SRAM line.
    Sram {
        /// SRAM row.
        row: usize,
        /// SRAM column.
        col: usize,
        /// Line within the unit.
        line: usize,
    },
    /// An action data memory line.
    ActionData {
        /// Row owning the memory.
        row: usize,
        /// Line within the memory.
        line: usize,
    },
}

impl MauMem {
    /// Returns whether every field lies inside the stage geometry.
    pub const fn in_range(&self) -> bool {
        match *self {
            Self::Sram { row, col, line } => row < SRAM_ROWS && col < SRAM_COLS && line < SRAM_LINES,
            Self::ActionData { row, line } => row < SRAM_ROWS && line < ACTION_DATA_LINES,
        }
    }

    const fn type_and_location(&self) -> (u64, u64) {
        match *self {
            Self::Sram { row, col, line } => (
                mem_type::SRAM,
                (row as u64) << 14 | (col as u64) << 10 | line as u64,
            ),
            Self::ActionData { row, line } => {
                (mem_type::ACTION_DATA, (row as u64) << 14 | line as u64)
            }
        }
    }

    fn decode(kind: u64, location: u64) -> Option<Self> {
        let row = (location >> 14) as usize;
        let line = (location & 0x3FF) as usize;
        let mem = match kind {
            mem_type::SRAM => Self::Sram {
                row,
                col: ((location >> 10) & 0xF) as usize,
                line,
            },
            // Column bits must be clear for action data.
            mem_type::ACTION_DATA if (location >> 10) & 0xF == 0 => Self::ActionData { row, line },
            _ => return None,
        };
        mem.in_range().then_some(mem)
    }
}

impl fmt::Display for MauMem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Sram { row, col, line } => {
                write!(f, "rams.array.row[{row}].ram[{col}].line[{line}]")
            }
            Self::ActionData { row, line } => write!(f, "adm.row[{row}].line[{line}]"),
        }
    }
}

/// A wide-memory location together with the pipe and stage that own it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MauMemAddr {
    /// Pipe number.
    pub pipe: usize,
    /// Stage number.
    pub stage: usize,
    /// Memory location within the stage.
    pub mem: MauMem,
}

impl MauMemAddr {
    /// Encodes the raw 64-bit address.
    pub const fn encode(&self) -> MemAddr {
        let (kind, location) = self.mem.type_and_location();
        MemAddr(
            (self.pipe as u64) << MemAddr::PIPE_SHIFT
                | (self.stage as u64) << MemAddr::STAGE_SHIFT
                | kind << MemAddr::TYPE_SHIFT
                | location,
        )
    }

    /// Decodes a raw 64-bit address.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownMemory` for unknown memory types, stray bits,
    /// or locations outside the stage geometry.
    pub fn decode(addr: MemAddr) -> Result<Self> {
        let stray = addr.val() >> (MemAddr::PIPE_SHIFT + 2) != 0
            || addr.location() >> 18 != 0
            || addr.stage() >= MAX_STAGES;
        if stray {
            return Err(ModelError::UnknownMemory(addr.val()));
        }
        let mem = MauMem::decode(addr.mem_type(), addr.location())
            .ok_or(ModelError::UnknownMemory(addr.val()))?;
        Ok(Self {
            pipe: addr.pipe(),
            stage: addr.stage(),
            mem,
        })
    }
}

impl fmt::Display for MauMemAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipe[{}].mau[{}].{}", self.pipe, self.stage, self.mem)
    }
}
