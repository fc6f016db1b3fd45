//! Wallet core library.
//!
//! Keeps one sealed balance record per address. Writes are
//! create-or-overwrite (last write wins); reads for an unknown address
//! return a zero balance instead of failing.

pub mod balance;
pub mod error;

pub use balance::{BalanceLedger, BalanceView};
pub use error::WalletError;
