//! Common utilities and types used throughout the MAU model.
//!
//! This module provides building blocks shared across all components of the
//! model. It includes:
//! 1. **Address Types:** Strong types for register and wide-memory addresses.
//! 2. **Constants:** Chip, PHV, match, and action geometry.
//! 3. **Match Data:** 128-bit word assembly and masked comparison.
//! 4. **Error Handling:** The model error type and result alias.
//! 5. **Log Flags:** Categories that gate diagnostic output.

/// Register and memory address types.
pub mod addr;

/// Chip geometry constants.
pub mod constants;

/// 128-bit match word helpers.
pub mod data;

/// Error type and result alias.
pub mod error;

/// Diagnostic log categories.
pub mod log;

pub use addr::{MemAddr, RegAddr};
pub use error::{ModelError, Result};
pub use log::LogFlags;
