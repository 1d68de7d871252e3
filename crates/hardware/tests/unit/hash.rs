//! # Hash Tests
//!
//! Verifies the GF(2) hash: linearity in the input, seed application, and the
//! line/bank split the SRAM and stash consume.

use mausim_core::common::constants::GROUP_BITS;
use mausim_core::mau::hash::{HashGroup, HashUnit, HashValue};
use mausim_core::mau::input_xbar::MatchInput;
use mausim_core::regs::{MauReg, MauRegs};
use proptest::prelude::*;

fn rows_from(seed_rows: &[u64]) -> [u64; GROUP_BITS] {
    std::array::from_fn(|i| seed_rows[i % seed_rows.len()].rotate_left(i as u32))
}

#[test]
fn scenario_key_lands_on_line_848_bank_0x40a() {
    let rows = std::array::from_fn(|i| match i {
        0..=21 => 1u64 << i,
        31 => 0x2C_7B40,
        _ => 0,
    });
    let h = HashGroup::new(rows, 0).hash(0xA9BC_5010);
    assert_eq!(h, HashValue(0x10_2B50));
    assert_eq!(h.line(), 848);
    assert_eq!(h.bank(), 0x40a);
}

#[test]
fn rows_are_truncated_to_52_bits() {
    let group = HashGroup::new([u64::MAX; GROUP_BITS], u64::MAX);
    assert_eq!(group.hash(0).0, (1 << 52) - 1);
    assert_eq!(group.hash(1).0, 0);
}

#[test]
fn unit_reads_matrix_and_seed_from_registers() {
    let mut regs = MauRegs::new();
    regs.write(MauReg::GaloisFieldMatrix { group: 2, row: 0, word: 1 }, 0x000F_0000);
    regs.write(MauReg::HashSeed { group: 2, word: 0 }, 0x5);
    let unit = HashUnit::from_regs(&regs);

    let mut bytes = [0u8; 128];
    bytes[32] = 1;
    let hashes = unit.compute(&MatchInput::from_bytes(bytes));
    assert_eq!(hashes[2].0, 0x000F_0000_0000_0000 | 0x5);
    assert_eq!(hashes[0].0, 0);
}

proptest! {
    #[test]
    fn hash_is_linear_over_xor(
        seed_rows in proptest::collection::vec(any::<u64>(), 1..8),
        a in any::<u128>(),
        b in any::<u128>(),
    ) {
        let group = HashGroup::new(rows_from(&seed_rows), 0);
        prop_assert_eq!(group.hash(a ^ b).0, group.hash(a).0 ^ group.hash(b).0);
    }

    #[test]
    fn seed_is_xored_on_top(
        seed_rows in proptest::collection::vec(any::<u64>(), 1..8),
        seed in any::<u64>(),
        key in any::<u128>(),
    ) {
        let plain = HashGroup::new(rows_from(&seed_rows), 0);
        let seeded = HashGroup::new(rows_from(&seed_rows), seed);
        prop_assert_eq!(seeded.hash(key).0, plain.hash(key).0 ^ (seed & ((1 << 52) - 1)));
    }
}
