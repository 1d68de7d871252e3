//! # PHV Tests

use mausim_core::phv::{ContainerWidth, Phv};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0, ContainerWidth::W32)]
#[case(63, ContainerWidth::W32)]
#[case(64, ContainerWidth::W8)]
#[case(127, ContainerWidth::W8)]
#[case(128, ContainerWidth::W16)]
#[case(223, ContainerWidth::W16)]
fn container_widths(#[case] index: usize, #[case] width: ContainerWidth) {
    assert_eq!(ContainerWidth::of(index), Some(width));
}

#[test]
fn past_last_container_has_no_width() {
    assert_eq!(ContainerWidth::of(224), None);
}

#[test]
fn set_masks_and_marks_valid() {
    let mut phv = Phv::new();
    phv.set(66, 0x1_23);
    phv.set(130, 0xABCD_EF01);
    assert_eq!(phv.get(66), 0x23);
    assert_eq!(phv.get(130), 0xEF01);
    assert!(phv.is_valid(66));
    assert!(!phv.is_valid(67));
    assert_eq!(phv.iter_valid().collect::<Vec<_>>(), vec![(66, 0x23), (130, 0xEF01)]);
}

#[test]
fn bytes_are_little_endian_within_width() {
    let mut phv = Phv::new();
    phv.set(0, 0xA9BC_5010);
    assert_eq!(phv.byte(0, 0), 0x10);
    assert_eq!(phv.byte(0, 3), 0xA9);
    phv.set(70, 0x42);
    assert_eq!(phv.byte(70, 1), 0);
}

#[test]
fn versions_are_per_gress() {
    let mut phv = Phv::new();
    phv.set_version(3, true);
    phv.set_version(1, false);
    assert!(phv.is_ingress());
    assert_eq!(phv.version(), 3);
    phv.set_egress();
    assert_eq!(phv.version(), 1);
    phv.set_version(6, false);
    assert_eq!(phv.version(), 2);
}

#[test]
fn clear_unsets_container() {
    let mut phv = Phv::new();
    phv.set(5, 9);
    phv.clear(5);
    assert_eq!(phv.get(5), 0);
    assert!(!phv.is_valid(5));
}
