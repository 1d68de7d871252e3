//! Action side of a stage.
//!
//! Once the result buses settle, logical tables pick their hits and run the
//! selected instruction against the output PHV:
//! 1. **Table select:** An enabled logical table takes the lowest-numbered
//!    bus in its mask that carries a hit; tables run in index order.
//! 2. **Action data:** The hit's row and `address & 0x3ff` select a 128-bit
//!    word from that row's action data memory.
//! 3. **Action bus:** The row's half-word crossbar copies bytes of the action
//!    data word onto the 128-byte action bus.
//! 4. **Instruction:** The overhead's `[5:0]` picks an instruction; each of
//!    its per-container words is a nop, a load from the action bus, or a load
//!    immediate.

use crate::common::constants::{
    ACTION_BUS_BYTES, ACTION_DATA_LINES, ACTION_HV_LANES, ACTION_HV_SLOTS, ACTION_HV_WORDS,
    IMEM_INSTRUCTIONS, LINE_MASK, LOGICAL_TABLES, PHV_WORDS, SRAM_ROWS,
};
use crate::mau::result_bus::{MatchResult, ResultBuses};
use crate::phv::{ContainerWidth, Phv};
use crate::regs::MauRegs;

/// Lane bit that enables an action bus byte.
pub const LANE_ENABLE: u8 = 0x80;

/// Overhead bits holding the instruction address.
pub const INSTRUCTION_MASK: u32 = 0x3f;

/// Action data memories of every row.
#[derive(Clone, Debug)]
pub struct ActionDataMem {
    rows: Vec<Vec<u128>>,
}

impl Default for ActionDataMem {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDataMem {
    /// Creates empty memories.
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new(); SRAM_ROWS],
        }
    }

    /// Writes one line.
    pub fn write(&mut self, row: usize, line: usize, value: u128) {
        let mem = &mut self.rows[row];
        if mem.is_empty() {
            mem.resize(ACTION_DATA_LINES, 0);
        }
        mem[line] = value;
    }

    /// Reads one line; unwritten lines are zero.
    pub fn read(&self, row: usize, line: usize) -> u128 {
        self.rows[row].get(line).copied().unwrap_or(0)
    }
}

/// Per-row action half-word crossbar.
///
/// Slot `half * 64 + index` of the action bus takes the byte named by lane
/// `index % 4` of `ctl_word[half][index / 4]`.
#[derive(Clone, Debug)]
pub struct ActionXbar {
    rows: [[Option<u8>; ACTION_BUS_BYTES]; SRAM_ROWS],
}

impl ActionXbar {
    /// Decodes the crossbar from the register image.
    pub fn from_regs(regs: &MauRegs) -> Self {
        let rows = std::array::from_fn(|row| {
            std::array::from_fn(|slot| {
                let half = slot / ACTION_HV_SLOTS;
                let index = slot % ACTION_HV_SLOTS;
                let word = regs.action_hv[row][half][index / ACTION_HV_LANES];
                decode_lane(word, index % ACTION_HV_LANES)
            })
        });
        Self { rows }
    }

    /// Drives the action bus of `row` from one action data word.
    pub fn fill(&self, row: usize, data: u128) -> [u8; ACTION_BUS_BYTES] {
        let bytes = data.to_le_bytes();
        let mut bus = [0u8; ACTION_BUS_BYTES];
        for (out, lane) in bus.iter_mut().zip(self.rows[row].iter()) {
            if let Some(src) = lane {
                *out = bytes[usize::from(*src)];
            }
        }
        bus
    }
}

/// Source byte of lane `lane` of a crossbar word; `None` when disabled.
pub const fn decode_lane(word: u32, lane: usize) -> Option<u8> {
    let byte = (word >> (lane * 8)) as u8;
    if byte & LANE_ENABLE == 0 {
        None
    } else {
        Some(byte & 0x0f)
    }
}

const _: () = assert!(ACTION_HV_WORDS * ACTION_HV_LANES == ACTION_HV_SLOTS);

/// One per-container instruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImemOp {
    /// Leave the container alone.
    #[default]
    Nop,
    /// Load container-width bytes from the action bus, little-endian.
    Load {
        /// First action bus byte.
        src: usize,
    },
    /// Load a 16-bit immediate.
    Immediate(u32),
}

impl ImemOp {
    /// Decodes an `imem` word; unknown opcodes act as nops.
    pub const fn decode(word: u32) -> Self {
        match word & 0xf {
            1 => Self::Load {
                src: ((word >> 8) & 0xff) as usize,
            },
            2 => Self::Immediate(word >> 16),
            _ => Self::Nop,
        }
    }

    /// Encodes an `imem` word.
    pub const fn encode(self) -> u32 {
        match self {
            Self::Nop => 0,
            Self::Load { src } => (src as u32 & 0xff) << 8 | 1,
            Self::Immediate(value) => (value & 0xffff) << 16 | 2,
        }
    }

    /// Value this op produces for a container of `width`, or `None` for a nop.
    pub fn evaluate(self, width: ContainerWidth, bus: &[u8; ACTION_BUS_BYTES]) -> Option<u32> {
        match self {
            Self::Nop => None,
            Self::Immediate(value) => Some(value & width.mask()),
            Self::Load { src } => {
                let value = (0..width.bytes()).fold(0u32, |acc, i| {
                    let byte = bus.get(src + i).copied().unwrap_or(0);
                    acc | u32::from(byte) << (8 * i)
                });
                Some(value)
            }
        }
    }
}

/// Decoded logical table control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalTable {
    /// Table runs on every packet.
    pub enabled: bool,
    /// Result buses the table listens to.
    pub bus_mask: u32,
}

impl LogicalTable {
    /// Decodes a `logical_table.ctl` register.
    pub const fn decode(ctl: u32) -> Self {
        Self {
            enabled: ctl & 1 != 0,
            bus_mask: (ctl >> 1) & 0xffff,
        }
    }

    /// Encodes a `logical_table.ctl` register.
    pub const fn encode(self) -> u32 {
        (self.bus_mask & 0xffff) << 1 | self.enabled as u32
    }
}

/// What one logical table did for a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableOutcome {
    /// The table is disabled.
    Idle,
    /// No bus in the table's mask carried a hit.
    Miss,
    /// The table ran an instruction.
    Hit {
        /// Bus that supplied the hit.
        bus: usize,
        /// Instruction address.
        instr: usize,
        /// Containers written.
        writes: usize,
    },
}

/// The committed action configuration of a stage.
#[derive(Clone, Debug)]
pub struct ActionUnit {
    xbar: ActionXbar,
    imem: Vec<ImemOp>,
    tables: [LogicalTable; LOGICAL_TABLES],
}

impl ActionUnit {
    /// Decodes the action side from the register image.
    pub fn from_regs(regs: &MauRegs) -> Self {
        let imem = (0..IMEM_INSTRUCTIONS)
            .flat_map(|i| regs.imem_instruction(i).iter().map(|w| ImemOp::decode(*w)))
            .collect();
        Self {
            xbar: ActionXbar::from_regs(regs),
            imem,
            tables: regs.logical_table.map(LogicalTable::decode),
        }
    }

    /// Logical tables in index order.
    pub const fn tables(&self) -> &[LogicalTable; LOGICAL_TABLES] {
        &self.tables
    }

    /// Runs one logical table against the result buses, writing into `out`.
    pub fn run_table(
        &self,
        table: usize,
        buses: &ResultBuses,
        adm: &ActionDataMem,
        out: &mut Phv,
    ) -> TableOutcome {
        let t = self.tables[table];
        if !t.enabled {
            return TableOutcome::Idle;
        }
        let Some((bus, hit)) = buses.first_in_mask(t.bus_mask) else {
            return TableOutcome::Miss;
        };
        let (instr, writes) = self.execute(hit, adm, out);
        TableOutcome::Hit { bus, instr, writes }
    }

    /// Executes the instruction selected by a hit; returns the instruction and write count.
    pub fn execute(&self, hit: &MatchResult, adm: &ActionDataMem, out: &mut Phv) -> (usize, usize) {
        let instr = (hit.overhead & INSTRUCTION_MASK) as usize;
        let data = adm.read(hit.row, (u64::from(hit.address) & LINE_MASK) as usize);
        let bus = self.xbar.fill(hit.row, data);
        let ops = &self.imem[instr * PHV_WORDS..(instr + 1) * PHV_WORDS];
        let mut writes = 0;
        for (container, op) in ops.iter().enumerate() {
            let Some(width) = ContainerWidth::of(container) else {
                continue;
            };
            if let Some(value) = op.evaluate(width, &bus) {
                out.set(container, value);
                writes += 1;
            }
        }
        (instr, writes)
    }
}
