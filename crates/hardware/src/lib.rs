//! Match-Action Unit stage model.
//!
//! This crate implements a functional model of the MAU stages of a
//! programmable switch pipeline with the following:
//! 1. **Registers:** Typed register and memory addresses, the per-stage
//!    register image, and path-style accessors for building addresses.
//! 2. **MAU:** Input crossbar, Galois hash, exact-match SRAM, stash, result
//!    bus arbitration, and the action side (action data, crossbar, instructions).
//! 3. **Chip:** Pipes of stages behind an address-routing interconnect, ports,
//!    and the register sink seam.
//! 4. **Model:** The top-level context, register scripts, and PHV images.
//! 5. **Harness:** Scoped test access and action crossbar byte staging.

/// Common types and constants (addresses, geometry, errors, log flags).
pub mod common;
/// Model configuration (defaults, chip topology, diagnostics).
pub mod config;
/// Test-facing harness (test utility, action crossbar translator).
pub mod harness;
/// MAU stage (match units, result buses, action side).
pub mod mau;
/// Packet Header Vector.
pub mod phv;
/// Register map, register image, typed accessors.
pub mod regs;
/// Model context, register scripts, PHV images.
pub mod sim;
/// Chip-level components (interconnect, builder, ports, register sink).
pub mod soc;
/// Per-stage statistics.
pub mod stats;

/// Error type and result alias.
pub use crate::common::{ModelError, Result};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// One MAU stage.
pub use crate::mau::Mau;
/// Packet Header Vector.
pub use crate::phv::Phv;
/// Typed register address builder.
pub use crate::regs::RegisterUtils;
/// Top-level model; construct with `Model::new`.
pub use crate::sim::Model;
/// Register write seam.
pub use crate::soc::{Port, RegisterSink};
/// Per-stage counters.
pub use crate::stats::MauStats;
