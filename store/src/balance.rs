//! Wallet balance storage trait.

use crate::StoreError;
use umbra_types::{WalletAddress, WalletBalance};

pub trait BalanceStore {
    fn get_balance(&self, address: &WalletAddress) -> Result<Option<WalletBalance>, StoreError>;

    /// Atomically replace the record for `address` with `write(existing)`.
    /// The record stays keyed by `address` whatever `write` returns.
    fn upsert_balance(
        &self,
        address: &WalletAddress,
        write: &mut dyn FnMut(Option<&WalletBalance>) -> WalletBalance,
    ) -> Result<WalletBalance, StoreError>;
}
