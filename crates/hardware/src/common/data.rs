//! 128-bit match word helpers.
//!
//! Match words, stash data, and action data words are 128 bits wide but are
//! programmed as four 32-bit register words or two 64-bit halves. These helpers
//! convert between the forms and implement the masked comparison shared by the
//! SRAM and stash comparators.

use super::constants::{BANK_BITS, BANK_MASK, MATCH_WORDS};

/// Assembles four 32-bit words (word 0 least significant) into one 128-bit value.
#[inline]
pub fn words_to_u128(words: &[u32; MATCH_WORDS]) -> u128 {
    words
        .iter()
        .enumerate()
        .fold(0u128, |acc, (i, w)| acc | (u128::from(*w) << (32 * i)))
}

/// Splits a 128-bit value into four 32-bit words (word 0 least significant).
#[inline]
pub fn u128_to_words(value: u128) -> [u32; MATCH_WORDS] {
    std::array::from_fn(|i| (value >> (32 * i)) as u32)
}

/// Assembles the two 64-bit halves of an `IndirectWrite`.
#[inline]
pub const fn halves_to_u128(data0: u64, data1: u64) -> u128 {
    (data1 as u128) << 64 | data0 as u128
}

/// Compares `key` against `stored`, ignoring bit positions set in `ignore_mask`.
#[inline]
pub const fn masked_eq(key: u128, stored: u128, ignore_mask: u128) -> bool {
    (key ^ stored) & !ignore_mask == 0
}

/// Returns whether a bank context is accepted by a bank-enable word.
///
/// The word carries the compare mask in its low 12 bits and the bank id above
/// them; only bank bits selected by the mask take part in the compare.
#[inline]
pub const fn bank_accepts(bank_enable: u32, bank: u32) -> bool {
    let mask = bank_enable & BANK_MASK;
    let id = (bank_enable >> BANK_BITS) & BANK_MASK;
    (bank & mask) == (id & mask)
}
