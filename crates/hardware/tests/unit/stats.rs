//! # Statistics Tests

use mausim_core::MauStats;
use pretty_assertions::assert_eq;

fn sample() -> MauStats {
    MauStats {
        packets: 3,
        sram_hits: 1,
        stash_hits: 2,
        stash_overrides: 1,
        table_misses: 4,
        actions: 2,
        phv_writes: 5,
    }
}

#[test]
fn merge_adds_every_counter() {
    let mut total = sample();
    total.merge(&sample());
    assert_eq!(
        total,
        MauStats {
            packets: 6,
            sram_hits: 2,
            stash_hits: 4,
            stash_overrides: 2,
            table_misses: 8,
            actions: 4,
            phv_writes: 10,
        }
    );
}

#[test]
fn add_assign_matches_merge() {
    let mut a = MauStats::default();
    a += sample();
    a += sample();
    let mut b = sample();
    b.merge(&sample());
    assert_eq!(a, b);
}

#[test]
fn hits_counts_both_sources() {
    assert_eq!(sample().hits(), 3);
    assert_eq!(MauStats::default().hits(), 0);
}
