//! # Action Crossbar Translator Tests
//!
//! The translator stages single action bus bytes and flushes whole
//! `ctl_word` registers. A mock sink checks exactly which writes leave it.

use mausim_core::common::ModelError;
use mausim_core::harness::ActionHvTranslator;
use mausim_core::mau::action::LANE_ENABLE;
use mausim_core::regs::RegisterUtils;
use mockall::predicate::eq;
use mockall::Sequence;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;
use crate::common::mocks::sink::MockSink;

#[test]
fn lanes_pack_into_one_word() {
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(5, 0, 0, LANE_ENABLE);
    hv.ctl_word(5, 0, 1, LANE_ENABLE | 1);
    hv.ctl_word(5, 0, 3, LANE_ENABLE | 0xf);
    assert_eq!(hv.word(5, 0, 0), Some(0x8f00_8180));
    assert_eq!(hv.pending(), 1);

    hv.ctl_word(5, 0, 1, 0);
    assert_eq!(hv.word(5, 0, 0), Some(0x8f00_0080));
    assert_eq!(hv.pending(), 1);
}

#[test]
fn flush_writes_touched_words_in_address_order() {
    let map = RegisterUtils::ref_mau(1, 4).unwrap();
    let mut hv = ActionHvTranslator::new(1, 4).unwrap();
    hv.ctl_word(7, 1, 63, LANE_ENABLE | 2);
    hv.ctl_word(0, 0, 4, LANE_ENABLE | 3);
    hv.ctl_word(0, 0, 0, LANE_ENABLE);

    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    for (addr, value) in [
        (map.action_hv_ctl_word(0, 0, 0).unwrap(), 0x0000_0080),
        (map.action_hv_ctl_word(0, 0, 1).unwrap(), 0x0000_0083),
        (map.action_hv_ctl_word(7, 1, 15).unwrap(), 0x8200_0000),
    ] {
        let _ = sink
            .expect_out_word()
            .with(eq(addr), eq(value))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
    }
    let _ = sink.expect_indirect_write().never();

    assert_eq!(hv.do_writes(&mut sink).unwrap(), 3);
    assert_eq!(hv.pending(), 0);
}

#[test]
fn second_flush_only_writes_new_changes() {
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(2, 1, 8, LANE_ENABLE);
    let mut first = MockSink::new();
    let _ = first.expect_out_word().times(1).returning(|_, _| Ok(()));
    assert_eq!(hv.do_writes(&mut first).unwrap(), 1);

    let mut idle = MockSink::new();
    let _ = idle.expect_out_word().never();
    assert_eq!(hv.do_writes(&mut idle).unwrap(), 0);

    hv.ctl_word(2, 1, 9, LANE_ENABLE | 1);
    let addr = RegisterUtils::ref_mau(0, 0).unwrap().action_hv_ctl_word(2, 1, 2).unwrap();
    let mut second = MockSink::new();
    let _ = second
        .expect_out_word()
        .with(eq(addr), eq(0x0000_8180))
        .times(1)
        .returning(|_, _| Ok(()));
    assert_eq!(hv.do_writes(&mut second).unwrap(), 1);
}

#[test]
fn failed_write_stays_pending() {
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(1, 0, 0, LANE_ENABLE);
    hv.ctl_word(1, 0, 4, LANE_ENABLE);

    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    let _ = sink
        .expect_out_word()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    let _ = sink
        .expect_out_word()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|addr, _| Err(ModelError::UnknownRegister(addr)));

    assert!(hv.do_writes(&mut sink).is_err());
    assert_eq!(hv.pending(), 1);
}

#[test]
fn out_of_range_lane_is_ignored() {
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(8, 0, 0, LANE_ENABLE);
    hv.ctl_word(0, 2, 0, LANE_ENABLE);
    hv.ctl_word(0, 0, 64, LANE_ENABLE);
    assert_eq!(hv.pending(), 0);
    assert_eq!(hv.word(8, 0, 0), None);
    assert_eq!(hv.word(0, 0, 16), None);
}

#[rstest]
#[case::pipe_past_chip(4, 0)]
#[case::stage_past_pipe(0, 16)]
fn new_rejects_missing_stage(#[case] pipe: usize, #[case] stage: usize) {
    assert!(matches!(
        ActionHvTranslator::new(pipe, stage),
        Err(ModelError::NoSuchStage { pipe: p, stage: s }) if p == pipe && s == stage
    ));
}

#[test]
fn reset_drops_shadow_and_pending() {
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(3, 0, 2, LANE_ENABLE | 5);
    hv.reset();
    assert_eq!(hv.word(3, 0, 0), Some(0));
    assert_eq!(hv.pending(), 0);
}

#[test]
fn flush_into_model_configures_stage() {
    let mut ctx = TestContext::single_pipe(1);
    let mut hv = ActionHvTranslator::new(0, 0).unwrap();
    hv.ctl_word(4, 1, 6, LANE_ENABLE | 9);
    assert_eq!(hv.do_writes(&mut ctx.model).unwrap(), 1);
    let addr = RegisterUtils::ref_mau(0, 0).unwrap().action_hv_ctl_word(4, 1, 1).unwrap();
    assert_eq!(ctx.model.read_reg(addr).unwrap(), 0x0089_0000);
}
