//! Chip Geometry Constants.
//!
//! This module defines the fixed dimensions of the modelled chip. It includes:
//! 1. **Chip Constants:** Pipe, stage, and port counts.
//! 2. **PHV Constants:** Container counts and index ranges per container width.
//! 3. **Match Constants:** Input bus, hash, SRAM, and stash dimensions.
//! 4. **Action Constants:** Action data, action bus, and instruction memory sizes.

/// Maximum number of pipes on the chip.
pub const MAX_PIPES: usize = 4;

/// Maximum number of MAU stages per pipe.
pub const MAX_STAGES: usize = 16;

/// Number of front-panel ports attached to each pipe.
pub const PORTS_PER_PIPE: u16 = 72;

/// Shift applied to the pipe number inside a port id.
pub const PORT_PIPE_SHIFT: u16 = 7;

/// Mask for the pipe-local part of a port id.
pub const PORT_LOCAL_MASK: u16 = (1 << PORT_PIPE_SHIFT) - 1;

/// Number of 32-bit PHV containers (indices `0..64`).
pub const PHV_32_COUNT: usize = 64;

/// Number of 8-bit PHV containers (indices `64..128`).
pub const PHV_8_COUNT: usize = 64;

/// Number of 16-bit PHV containers (indices `128..224`).
pub const PHV_16_COUNT: usize = 96;

/// First 8-bit container index.
pub const PHV_8_BASE: usize = PHV_32_COUNT;

/// First 16-bit container index.
pub const PHV_16_BASE: usize = PHV_8_BASE + PHV_8_COUNT;

/// Total number of PHV containers.
pub const PHV_WORDS: usize = PHV_16_BASE + PHV_16_COUNT;

/// Number of distinct packet versions tracked per gress.
pub const PHV_VERSIONS: u8 = 4;

/// Width of the exact-match input bus in bytes.
pub const MATCH_INPUT_BYTES: usize = 128;

/// Number of 128-bit groups on the exact-match input bus.
pub const INPUT_GROUPS: usize = 8;

/// Bytes per input group.
pub const GROUP_BYTES: usize = MATCH_INPUT_BYTES / INPUT_GROUPS;

/// Bits per input group (one Galois matrix row per bit).
pub const GROUP_BITS: usize = GROUP_BYTES * 8;

/// Number of hash groups; hash group `g` hashes input group `g`.
pub const HASH_GROUPS: usize = INPUT_GROUPS;

/// Width of one hash output in bits.
pub const HASH_BITS: u32 = 52;

/// Mask for a hash output.
pub const HASH_MASK: u64 = (1 << HASH_BITS) - 1;

/// Number of hash bits used as the RAM line address.
pub const LINE_BITS: u32 = 10;

/// Mask for a RAM line address.
pub const LINE_MASK: u64 = (1 << LINE_BITS) - 1;

/// Number of hash bits used as the bank context, above the line bits.
pub const BANK_BITS: u32 = 12;

/// Mask for a bank context / bank-enable field.
pub const BANK_MASK: u32 = (1 << BANK_BITS) - 1;

/// Number of SRAM rows per stage.
pub const SRAM_ROWS: usize = 8;

/// Number of SRAM columns per row.
pub const SRAM_COLS: usize = 12;

/// Lines per SRAM unit.
pub const SRAM_LINES: usize = 1 << LINE_BITS;

/// Stash entries per row.
pub const STASH_ENTRIES: usize = 4;

/// Stash halves per row.
pub const STASH_HALVES: usize = 2;

/// Stash entries that share one half's mask and control.
pub const STASH_ENTRIES_PER_HALF: usize = STASH_ENTRIES / STASH_HALVES;

/// 32-bit words in one 128-bit match word.
pub const MATCH_WORDS: usize = 4;

/// Result buses driven by each row.
pub const RESULT_BUSES_PER_ROW: usize = 2;

/// Result buses per stage.
pub const RESULT_BUSES: usize = SRAM_ROWS * RESULT_BUSES_PER_ROW;

/// Width of a match address in bits.
pub const MATCH_ADDRESS_BITS: u32 = 23;

/// Lines of action data memory per row.
pub const ACTION_DATA_LINES: usize = 1024;

/// Width of the action bus in bytes.
pub const ACTION_BUS_BYTES: usize = 128;

/// Halves of the action half-word crossbar.
pub const ACTION_HV_HALVES: usize = 2;

/// Action bus slots served by one crossbar half.
pub const ACTION_HV_SLOTS: usize = ACTION_BUS_BYTES / ACTION_HV_HALVES;

/// Byte lanes packed into one crossbar control register.
pub const ACTION_HV_LANES: usize = 4;

/// Control registers per crossbar half.
pub const ACTION_HV_WORDS: usize = ACTION_HV_SLOTS / ACTION_HV_LANES;

/// Instructions held in instruction memory.
pub const IMEM_INSTRUCTIONS: usize = 64;

/// Logical tables per stage.
pub const LOGICAL_TABLES: usize = 16;
