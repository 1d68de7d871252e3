//! Register model of a MAU stage.
//!
//! This module describes the configuration surface of a stage. It provides:
//! 1. **Address Map:** Typed registers and wide-memory locations with bit-exact encode/decode.
//! 2. **Accessors:** Path-style address lookups (`ref_mau(pipe, stage).rams().row(r)...`).
//! 3. **Register Image:** Storage for the last value written to every register.

/// Register image storage.
pub mod image;

/// Register and memory address map.
pub mod map;

/// Typed address accessors.
pub mod reg_map;

pub use image::MauRegs;
pub use map::{MauMem, MauMemAddr, MauReg, MauRegAddr};
pub use reg_map::{MauRegMap, RegisterUtils};
