//! Simulated cross-chain bridge.
//!
//! A transfer is stored `pending` and, after a fixed settlement delay,
//! flips to `confirmed` with a generated transaction hash. No chain is
//! contacted and settlement never fails.

pub mod error;
pub mod relay;

pub use error::BridgeError;
pub use relay::{generate_tx_hash, BridgeRelay, NewTransfer, DEFAULT_SETTLEMENT_DELAY};
