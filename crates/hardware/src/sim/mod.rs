//! Model context and register scripts.
//!
//! Provides the top-level `Model` through which registers are written and
//! packets processed, plus the JSON forms of register sequences and PHVs.

/// Top-level model.
pub mod model;

/// Register scripts, recorder, and PHV images.
pub mod script;

pub use model::Model;
pub use script::{PhvImage, RegisterOp, RegisterRecorder, RegisterScript};
