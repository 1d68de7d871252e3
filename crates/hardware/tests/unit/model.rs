//! # Model Tests
//!
//! Lifecycle, register routing, ports, and topology errors of the top-level
//! model.

use mausim_core::common::{LogFlags, ModelError};
use mausim_core::mau::action::LogicalTable;
use mausim_core::regs::{MauReg, RegisterUtils};
use mausim_core::soc::Port;
use mausim_core::Phv;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn register_reads_back_what_was_written() {
    let mut ctx = TestContext::new();
    let stash = |stage| RegisterUtils::ref_mau(2, stage).unwrap().rams().row(4).stash();
    let addr = stash(7).match_address(3).unwrap();
    ctx.model.write_reg(addr, 0x12_3456).unwrap();
    assert_eq!(ctx.model.read_reg(addr).unwrap(), 0x12_3456);
    assert_eq!(ctx.model.read_reg(stash(6).match_address(3).unwrap()).unwrap(), 0);
}

#[test]
fn register_write_marks_only_its_stage_dirty() {
    let mut ctx = TestContext::single_pipe(2);
    let _ = ctx.model.mau_mut(0, 0).unwrap().commit();
    let _ = ctx.model.mau_mut(0, 1).unwrap().commit();
    ctx.model
        .write_reg(RegisterUtils::ref_mau(0, 1).unwrap().logical_table_ctl(0).unwrap(), 1)
        .unwrap();
    assert!(!ctx.model.mau(0, 0).unwrap().is_dirty());
    assert!(ctx.model.mau(0, 1).unwrap().is_dirty());
}

#[test]
fn register_write_lands_in_stage_image_and_commits() {
    let mut ctx = TestContext::single_pipe(1);
    let table = LogicalTable { enabled: true, bus_mask: 0b101 };
    let addr = RegisterUtils::ref_mau(0, 0).unwrap().logical_table_ctl(4).unwrap();
    ctx.model.write_reg(addr, table.encode()).unwrap();

    let mau = ctx.model.mau_mut(0, 0).unwrap();
    assert_eq!(mau.regs().read(MauReg::LogicalTableCtl { table: 4 }), table.encode());
    let tables = mau.commit().action.tables();
    assert_eq!(tables[4], table);
    assert_eq!(tables[3], LogicalTable::default());
}

#[test]
fn model_keeps_its_configuration() {
    let ctx = TestContext::single_pipe(3);
    assert_eq!(ctx.model.config().chip.pipes, 1);
    assert_eq!(ctx.model.config().chip.stages, 3);
    assert_eq!(ctx.model.log_flags(), LogFlags::NONE);
}

#[test]
fn stage_log_flags_override_only_that_stage() {
    let mut ctx = TestContext::single_pipe(2);
    ctx.model.set_log_flags(LogFlags::HASH);
    ctx.tu(0, 0).update_log_flags(LogFlags::STASH).unwrap();

    assert_eq!(ctx.model.log_flags(), LogFlags::HASH);
    assert_eq!(ctx.model.config().general.log_flags, LogFlags::HASH);
    assert_eq!(ctx.model.mau(0, 0).unwrap().log_flags(), LogFlags::STASH);
    assert_eq!(ctx.model.mau(0, 1).unwrap().log_flags(), LogFlags::HASH);
}

#[test]
fn memory_reads_back_and_unwritten_lines_are_zero() {
    let mut ctx = TestContext::new();
    let map = RegisterUtils::ref_mau(1, 3).unwrap();
    let addr = map.action_data(6, 0x3ff).unwrap();
    ctx.model.indirect_write(addr, 0x1111, 0x2222).unwrap();
    assert_eq!(ctx.model.read_mem(addr).unwrap(), 0x2222_u128 << 64 | 0x1111);
    assert_eq!(ctx.model.read_mem(map.rams().row(6).ram(2).line(17).unwrap()).unwrap(), 0);
}

#[test]
fn unknown_register_is_rejected() {
    let mut ctx = TestContext::new();
    assert!(matches!(
        ctx.model.write_reg(0x0220_0000, 1),
        Err(ModelError::UnknownRegister(0x0220_0000))
    ));
    assert!(matches!(
        ctx.model.read_reg(0x0000_0080),
        Err(ModelError::UnknownRegister(_))
    ));
}

#[test]
fn stage_outside_topology_is_rejected() {
    let mut ctx = TestContext::single_pipe(2);
    let past_last_stage = RegisterUtils::ref_mau(0, 2).unwrap().logical_table_ctl(0).unwrap();
    assert!(matches!(
        ctx.model.write_reg(past_last_stage, 1),
        Err(ModelError::NoSuchStage { pipe: 0, stage: 2 })
    ));
    let other_pipe = RegisterUtils::ref_mau(1, 0).unwrap().action_data(0, 0).unwrap();
    assert!(matches!(
        ctx.model.indirect_write(other_pipe, 0, 0),
        Err(ModelError::NoSuchStage { pipe: 1, stage: 0 })
    ));
    assert!(ctx.model.mau(0, 5).is_err());
}

#[test]
fn ports_are_validated_against_topology() {
    let ctx = TestContext::single_pipe(1);
    let port = ctx.model.port(Port::make_id(0, 71)).unwrap();
    assert_eq!(port.pipe(), 0);
    assert_eq!(port.local(), 71);
    assert!(matches!(
        ctx.model.port(Port::make_id(0, 72)),
        Err(ModelError::InvalidPort(72))
    ));
    assert!(matches!(
        ctx.model.port(Port::make_id(1, 0)),
        Err(ModelError::InvalidPort(128))
    ));
}

#[test]
fn port_ids_pack_pipe_above_local() {
    assert_eq!(Port::make_id(3, 5), 3 << 7 | 5);
    let ctx = TestContext::new();
    let port = ctx.model.port(Port::make_id(3, 5)).unwrap();
    assert_eq!(port.pipe(), 3);
    assert_eq!(port.to_string(), "port 389 (pipe 3, local 5)");
}

#[test]
fn unprogrammed_pipe_passes_phv_through() {
    let mut ctx = TestContext::new();
    let port = ctx.model.port(Port::make_id(2, 0)).unwrap();
    let mut phv = Phv::new();
    phv.set(10, 0xDEAD_BEEF);
    phv.set(200, 0x1234);
    let out = ctx.model.process(&port, &phv).unwrap();
    assert_eq!(out, phv);
    let stats = ctx.model.stats();
    assert_eq!(stats.packets, 12);
    assert_eq!(stats.hits(), 0);
    assert_eq!(stats.actions, 0);
}

#[test]
fn reset_clears_registers_memories_and_counters() {
    let mut ctx = TestContext::new();
    let map = RegisterUtils::ref_mau(0, 0).unwrap();
    ctx.model.write_reg(map.imem(1, 2).unwrap(), 0x55_0002).unwrap();
    ctx.model.indirect_write(map.action_data(0, 1).unwrap(), 7, 0).unwrap();
    let port = ctx.model.port(0).unwrap();
    let _ = ctx.model.process(&port, &Phv::new()).unwrap();

    ctx.model.reset();
    assert_eq!(ctx.model.read_reg(map.imem(1, 2).unwrap()).unwrap(), 0);
    assert_eq!(ctx.model.read_mem(map.action_data(0, 1).unwrap()).unwrap(), 0);
    assert_eq!(ctx.model.stats().packets, 0);
}
