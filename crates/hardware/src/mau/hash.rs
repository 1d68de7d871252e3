//! Galois-field hash units.
//!
//! Each hash group multiplies its 128-bit input group by a 128 x 52 matrix
//! over GF(2): every set input bit contributes its matrix row by XOR, and the
//! group seed is XORed on top. The 52-bit result is split into the RAM line
//! address (`[9:0]`) and the bank context (`[21:10]`).

use crate::common::constants::{BANK_MASK, GROUP_BITS, HASH_GROUPS, HASH_MASK, LINE_BITS, LINE_MASK};
use crate::mau::input_xbar::MatchInput;
use crate::regs::MauRegs;

/// One hash output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashValue(pub u64);

impl HashValue {
    /// RAM line address, bits `[9:0]`.
    #[inline]
    pub const fn line(self) -> u32 {
        (self.0 & LINE_MASK) as u32
    }

    /// Bank context, bits `[21:10]`.
    #[inline]
    pub const fn bank(self) -> u32 {
        (self.0 >> LINE_BITS) as u32 & BANK_MASK
    }
}

/// One hash group's matrix and seed.
#[derive(Clone, Debug)]
pub struct HashGroup {
    rows: [u64; GROUP_BITS],
    seed: u64,
}

impl HashGroup {
    /// Builds a group from explicit matrix rows and seed.
    pub fn new(rows: [u64; GROUP_BITS], seed: u64) -> Self {
        Self {
            rows: rows.map(|r| r & HASH_MASK),
            seed: seed & HASH_MASK,
        }
    }

    /// Hashes one 128-bit input group.
    pub fn hash(&self, input: u128) -> HashValue {
        let mut acc = self.seed;
        let mut bits = input;
        while bits != 0 {
            let bit = bits.trailing_zeros() as usize;
            acc ^= self.rows[bit];
            bits &= bits - 1;
        }
        HashValue(acc)
    }
}

/// All hash groups of a stage.
#[derive(Clone, Debug)]
pub struct HashUnit {
    groups: Vec<HashGroup>,
}

impl HashUnit {
    /// Decodes every hash group from the register image.
    pub fn from_regs(regs: &MauRegs) -> Self {
        let groups = (0..HASH_GROUPS)
            .map(|g| {
                let rows = std::array::from_fn(|row| regs.galois_row(g, row));
                let seed = u64::from(regs.hash_seed[g][1]) << 32 | u64::from(regs.hash_seed[g][0]);
                HashGroup::new(rows, seed)
            })
            .collect();
        Self { groups }
    }

    /// Hashes every input group of the bus.
    pub fn compute(&self, input: &MatchInput) -> [HashValue; HASH_GROUPS] {
        std::array::from_fn(|g| self.groups[g].hash(input.group(g)))
    }
}
