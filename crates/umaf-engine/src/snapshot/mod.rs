//! Structural checks and readable outlines of envelopes, for tests and the
//! CLI's structure dump.

pub mod invariants;
pub mod outline;

pub use invariants::{InvariantViolation, validate};
pub use outline::outline;
