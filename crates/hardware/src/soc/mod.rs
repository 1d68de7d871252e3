//! Chip-level components.
//!
//! This module organizes the parts that sit above a single stage: the
//! register interconnect, the chip builder, ports, and the register sink
//! seam through which register sequences are applied.

/// Chip builder and pipe traversal.
pub mod builder;

/// Address routing to stages.
pub mod interconnect;

/// Port ids and validation.
pub mod port;

/// Register sink trait.
pub mod traits;

pub use builder::Chip;
pub use interconnect::Interconnect;
pub use port::Port;
pub use traits::RegisterSink;
