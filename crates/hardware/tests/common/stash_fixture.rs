//! Stage programming for the stash scenario.
//!
//! Pipe 0 stage 0 is programmed so that container 0 feeds input group 0,
//! whose hash lands on line 848 in bank 0x40a. Row `ROW` has an SRAM unit on
//! that line holding a stale word (so the SRAM misses), and logical table 0
//! listens to the row's bus 0. A hit with overhead 2 loads action data bytes
//! 0 and 1 of line 0x350 into containers 66 and 67.

use mausim_core::common::constants::GROUP_BITS;
use mausim_core::harness::{ActionHvTranslator, TestUtil};
use mausim_core::mau::action::{ImemOp, LogicalTable};
use mausim_core::mau::input_xbar::ByteSource;
use mausim_core::mau::result_bus::ResultBuses;
use mausim_core::mau::sram::SramUnitConfig;
use mausim_core::mau::stash::StashHalf;
use mausim_core::regs::MauRegMap;
use mausim_core::soc::RegisterSink;
use mausim_core::Phv;

pub const ROW: usize = 5;
pub const SRAM_COL: usize = 0;
pub const PORT: u16 = 0;

pub const KEY: u32 = 0xA9BC_5010;
pub const HASHKEY: u32 = 848;
pub const BANK_ENABLE: u32 = 0x40_afff;
pub const MATCH_ADDRESS: u32 = 0x06_a750;
pub const VERSION_VALID: u32 = 0xF;
pub const STASH_DATA: [u32; 4] = [KEY, 0x0000_0002, 0x0000_0000, 0x0f00_0000];
pub const MATCH_MASK: [u32; 4] = [0, 0xFFFF_FFFF, 0, 0xFFFF_FFFF];

/// vpn placing the SRAM match address on the same action data line.
pub const SRAM_VPN: u32 = 0x1A9;

pub const BASELINE_66: u32 = 0x23;
pub const BASELINE_67: u32 = 0x11;
pub const HIT_66: u32 = 0xf4;
pub const HIT_67: u32 = 0xb4;

/// Instruction of the stash entry (overhead 2).
pub const STASH_INSTR: usize = 2;
/// Instruction an SRAM hit runs in the arbitration tests.
pub const SRAM_INSTR: usize = 3;
pub const SRAM_IMMEDIATE: u32 = 0x55;

/// Galois row 31 folds the key's top bit onto the identity of bits `[21:0]`.
const GALOIS_ROW_31: u64 = 0x2C_7B40;

fn galois_row(row: usize) -> u64 {
    match row {
        0..=21 => 1 << row,
        31 => GALOIS_ROW_31,
        _ => 0,
    }
}

/// Programs everything except the stash entries.
pub fn program_stage(tu: &mut TestUtil<'_>) {
    let map = tu.reg_map();

    for byte in 0..4 {
        let ctl = ByteSource { container: 0, byte }.encode();
        tu.out_word(map.input_xbar_byte_ctl(byte).unwrap(), ctl).unwrap();
    }

    for row in 0..GROUP_BITS {
        let value = galois_row(row);
        tu.out_word(map.galois_field_matrix(0, row, 0).unwrap(), value as u32).unwrap();
        tu.out_word(map.galois_field_matrix(0, row, 1).unwrap(), (value >> 32) as u32).unwrap();
    }

    let ram = map.rams().row(ROW).ram(SRAM_COL);
    tu.out_word(ram.ctl().unwrap(), SramUnitConfig::encode_ctl(true, 0, 0, SRAM_VPN)).unwrap();
    tu.out_word(ram.bank_enable().unwrap(), BANK_ENABLE).unwrap();
    for (w, mask) in MATCH_MASK.iter().enumerate() {
        tu.out_word(ram.match_mask(w).unwrap(), *mask).unwrap();
    }
    write_sram_word(tu, KEY ^ 1, SRAM_INSTR as u32);

    let stash = map.rams().row(ROW).stash();
    for half in 0..2 {
        for (w, mask) in MATCH_MASK.iter().enumerate() {
            tu.out_word(stash.match_mask(half, w).unwrap(), *mask).unwrap();
        }
        tu.out_word(stash.result_bus_select(half).unwrap(), 0b01).unwrap();
        tu.out_word(stash.input_data_ctl(half).unwrap(), StashHalf::encode_input_data_ctl(true, 0))
            .unwrap();
    }

    let line = (MATCH_ADDRESS & 0x3ff) as usize;
    let adm = u64::from(HIT_67) << 8 | u64::from(HIT_66);
    tu.indirect_write(map.action_data(ROW, line).unwrap(), adm, 0).unwrap();

    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(ROW, 0, 0, 0x80);
    hv.ctl_word(ROW, 0, 1, 0x81);
    assert_eq!(hv.do_writes(tu).unwrap(), 1);

    let load = |src| ImemOp::Load { src }.encode();
    tu.out_word(map.imem(STASH_INSTR, 66).unwrap(), load(0)).unwrap();
    tu.out_word(map.imem(STASH_INSTR, 67).unwrap(), load(1)).unwrap();
    tu.out_word(
        map.imem(SRAM_INSTR, 66).unwrap(),
        ImemOp::Immediate(SRAM_IMMEDIATE).encode(),
    )
    .unwrap();

    let table = LogicalTable {
        enabled: true,
        bus_mask: 1 << ResultBuses::bus_id(ROW, 0),
    };
    tu.out_word(map.logical_table_ctl(0).unwrap(), table.encode()).unwrap();
}

/// Writes SRAM line 848 with `key` and an overhead selecting `instr`, valid for every version.
pub fn write_sram_word(tu: &mut TestUtil<'_>, key: u32, instr: u32) {
    let map = tu.reg_map();
    let data0 = u64::from(instr) << 32 | u64::from(key);
    let data1 = 0x0f00_0000_u64 << 32;
    let line = map.rams().row(ROW).ram(SRAM_COL).line(HASHKEY as usize).unwrap();
    tu.indirect_write(line, data0, data1).unwrap();
}

/// Programs one stash entry with the scenario's matching values.
pub fn program_stash_entry(tu: &mut TestUtil<'_>, entry: usize) {
    let map = tu.reg_map();
    write_stash_entry(tu, map, entry);
}

/// Emits the register writes of one scenario stash entry into any sink.
pub fn write_stash_entry(sink: &mut impl RegisterSink, map: MauRegMap, entry: usize) {
    let stash = map.rams().row(ROW).stash();
    sink.out_word(stash.hashkey_data(entry).unwrap(), HASHKEY).unwrap();
    sink.out_word(stash.bank_enable(entry).unwrap(), BANK_ENABLE).unwrap();
    sink.out_word(stash.match_address(entry).unwrap(), MATCH_ADDRESS).unwrap();
    sink.out_word(stash.version_valid(entry).unwrap(), VERSION_VALID).unwrap();
    for (w, data) in STASH_DATA.iter().enumerate() {
        sink.out_word(stash.data(entry, w).unwrap(), *data).unwrap();
    }
}

/// The scenario's input PHV.
pub fn input_phv(tu: &TestUtil<'_>) -> Phv {
    let mut phv = tu.phv_alloc();
    phv.set(0, KEY);
    phv.set(66, BASELINE_66);
    phv.set(67, BASELINE_67);
    phv
}

/// Runs the input PHV through the scenario port and returns containers 66 and 67.
pub fn run(tu: &mut TestUtil<'_>) -> (u32, u32) {
    let port = tu.port_get(PORT).unwrap();
    let phv = input_phv(tu);
    let out = tu.port_process_inbound(&port, &phv).unwrap();
    (out.get(66), out.get(67))
}
