//! Test-facing harness.
//!
//! Wraps a `Model` for driving register sequences and packets the way chip
//! bring-up tests do, and stages action crossbar bytes into whole register
//! words.

/// Scoped model access for tests.
pub mod test_util;

/// Action half-word crossbar byte staging.
pub mod translator;

pub use test_util::TestUtil;
pub use translator::ActionHvTranslator;
