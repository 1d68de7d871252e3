//! # Configuration Tests
//!
//! Tests for configuration defaults, deserialization, and validation.

use mausim_core::common::{LogFlags, ModelError};
use mausim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.chip.pipes, 4);
    assert_eq!(config.chip.stages, 12);
    assert_eq!(config.general.log_flags, LogFlags::NONE);
    assert!(!config.general.trace_packets);
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_partial_sections_take_defaults() {
    let config = Config::from_json(r#"{ "chip": { "stages": 3 } }"#).unwrap();
    assert_eq!(config.chip.pipes, 4);
    assert_eq!(config.chip.stages, 3);
}

#[test]
fn test_json_deserialization_with_log_flags() {
    let json = r#"{ "general": { "log_flags": 24, "trace_packets": true } }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_packets);
    assert!(config.general.log_flags.contains(LogFlags::STASH));
    assert!(config.general.log_flags.contains(LogFlags::ACTION));
    assert!(!config.general.log_flags.contains(LogFlags::SRAM));
}

#[test]
fn test_validation_rejects_topology() {
    for json in [
        r#"{ "chip": { "pipes": 0 } }"#,
        r#"{ "chip": { "pipes": 5 } }"#,
        r#"{ "chip": { "stages": 17 } }"#,
        r#"{ "general": { "log_flags": 32 } }"#,
        r#"{ "general": { "log_flags": 4294967295 } }"#,
    ] {
        assert!(
            matches!(Config::from_json(json), Err(ModelError::InvalidConfig(_))),
            "{json} should be rejected"
        );
    }
}

#[test]
fn test_malformed_json_is_a_json_error() {
    assert!(matches!(
        Config::from_json("{ chip: "),
        Err(ModelError::Json(_))
    ));
}

#[test]
fn test_log_flags_combine() {
    let mut flags = LogFlags::HASH | LogFlags::SRAM;
    flags |= LogFlags::REGS;
    assert!(flags.contains(LogFlags::HASH | LogFlags::REGS));
    assert!(!flags.contains(LogFlags::ALL));
    assert!(LogFlags::ALL.contains(flags));
}

#[test]
fn test_log_flags_from_bits_rejects_unknown_categories() {
    assert_eq!(LogFlags::from_bits(0x18), Some(LogFlags::STASH | LogFlags::ACTION));
    assert_eq!(LogFlags::from_bits(0x1F), Some(LogFlags::ALL));
    assert_eq!(LogFlags::from_bits(0x20), None);
    assert_eq!(LogFlags::from_bits(0x1_0001), None);
}
