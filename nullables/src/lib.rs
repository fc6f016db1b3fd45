//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (the clock, the storage backend) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Fail on demand, to exercise error paths
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::FailingStore;
