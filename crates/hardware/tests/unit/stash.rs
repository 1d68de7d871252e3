//! # Stash Scenario Tests
//!
//! Drives one stage through the stash configuration sequence: every hit
//! condition is broken and restored in turn while a packet is sent after each
//! change, and both stash halves are exercised.

use crate::common::harness::TestContext;
use crate::common::stash_fixture::{
    self as fx, BASELINE_66, BASELINE_67, HASHKEY, HIT_66, HIT_67, ROW,
};
use mausim_core::common::LogFlags;
use pretty_assertions::assert_eq;

#[test]
fn stash_hit_condition_sequence() {
    let mut ctx = TestContext::new();
    let mut tu = ctx.tu(0, 0);
    tu.update_log_flags(LogFlags::STASH | LogFlags::ACTION).unwrap();
    fx::program_stage(&mut tu);
    let stash = tu.reg_map().rams().row(ROW).stash();

    // No stash entry: the stale SRAM word misses and the input survives.
    assert_eq!(fx::run(&mut tu), (BASELINE_66, BASELINE_67));

    // Half 0, entry 1.
    fx::program_stash_entry(&mut tu, 1);
    assert_eq!(fx::run(&mut tu), (HIT_66, HIT_67));

    // Wrong hashkey.
    tu.out_word(stash.hashkey_data(1).unwrap(), 849).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);

    // Half 1, entry 3, with entry 1 still broken.
    fx::program_stash_entry(&mut tu, 3);
    assert_eq!(fx::run(&mut tu), (HIT_66, HIT_67));

    // Both entries broken.
    tu.out_word(stash.data(3, 2).unwrap(), 0xFFFF_FFFF).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);

    // Entry 1 fixed; entry 3 still broken.
    tu.out_word(stash.hashkey_data(1).unwrap(), HASHKEY).unwrap();
    assert_eq!(fx::run(&mut tu), (HIT_66, HIT_67));

    // Bank enable with another bank id.
    tu.out_word(stash.bank_enable(1).unwrap(), 0xBA_Dfff).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);

    // Narrower mask whose id agrees with the bank on the masked bits.
    tu.out_word(stash.bank_enable(1).unwrap(), 0x00_A00F).unwrap();
    assert_eq!(fx::run(&mut tu), (HIT_66, HIT_67));

    let stats = tu.finish_test();
    assert_eq!(stats.packets, 8 * 12);
    assert_eq!(stats.stash_hits, 4);
    assert_eq!(stats.sram_hits, 0);
    assert_eq!(stats.actions, 4);
    assert_eq!(stats.phv_writes, 8);
}

#[test]
fn version_valid_gates_hit() {
    let mut ctx = TestContext::new();
    let mut tu = ctx.tu(0, 0);
    fx::program_stage(&mut tu);
    fx::program_stash_entry(&mut tu, 0);
    let stash = tu.reg_map().rams().row(ROW).stash();

    // Valid for versions 1..3 only.
    tu.out_word(stash.version_valid(0).unwrap(), 0b1110).unwrap();
    let port = tu.port_get(fx::PORT).unwrap();
    let mut phv = fx::input_phv(&tu);
    assert_eq!(tu.port_process_inbound(&port, &phv).unwrap().get(66), BASELINE_66);

    phv.set_version(2, true);
    assert_eq!(tu.port_process_inbound(&port, &phv).unwrap().get(66), HIT_66);

    // An egress packet uses the egress version, still 0.
    phv.set_egress();
    assert_eq!(tu.port_process_inbound(&port, &phv).unwrap().get(66), BASELINE_66);
}

#[test]
fn disabled_half_never_hits() {
    let mut ctx = TestContext::new();
    let mut tu = ctx.tu(0, 0);
    fx::program_stage(&mut tu);
    fx::program_stash_entry(&mut tu, 1);
    let stash = tu.reg_map().rams().row(ROW).stash();

    tu.out_word(stash.input_data_ctl(0).unwrap(), 0).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);

    // Half 0 enabled again but reading an input group with no bytes.
    tu.out_word(stash.input_data_ctl(0).unwrap(), 0b0011).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);
}

#[test]
fn masked_bits_are_ignored() {
    let mut ctx = TestContext::new();
    let mut tu = ctx.tu(0, 0);
    fx::program_stage(&mut tu);
    fx::program_stash_entry(&mut tu, 2);
    let stash = tu.reg_map().rams().row(ROW).stash();

    // Words 1 and 3 are masked for half 1; word 2 is not.
    tu.out_word(stash.data(2, 3).unwrap(), 0x1234_5678).unwrap();
    assert_eq!(fx::run(&mut tu).0, HIT_66);

    tu.out_word(stash.match_mask(1, 3).unwrap(), 0).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);
}

#[test]
fn result_bus_select_routes_hit() {
    let mut ctx = TestContext::new();
    let mut tu = ctx.tu(0, 0);
    fx::program_stage(&mut tu);
    fx::program_stash_entry(&mut tu, 1);
    let stash = tu.reg_map().rams().row(ROW).stash();

    // Bus 1 of the row: the logical table only listens to bus 0.
    tu.out_word(stash.result_bus_select(0).unwrap(), 0b10).unwrap();
    assert_eq!(fx::run(&mut tu).0, BASELINE_66);

    tu.out_word(stash.result_bus_select(0).unwrap(), 0b11).unwrap();
    assert_eq!(fx::run(&mut tu).0, HIT_66);
}
