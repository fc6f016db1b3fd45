//! Sealed wallet balances.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use umbra_store::DaoStore;
use umbra_types::{Clock, EntityId, Sealed, Timestamp, WalletAddress, WalletBalance};

use crate::error::WalletError;

/// What a balance lookup returns: the stored record, or a zero balance for
/// an address that has never been written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BalanceView {
    Stored(WalletBalance),
    #[serde(rename_all = "camelCase")]
    Unfunded {
        address: WalletAddress,
        encrypted_balance: Sealed,
        last_updated: Timestamp,
    },
}

impl BalanceView {
    pub fn encrypted_balance(&self) -> &Sealed {
        match self {
            Self::Stored(b) => &b.encrypted_balance,
            Self::Unfunded {
                encrypted_balance, ..
            } => encrypted_balance,
        }
    }
}

pub struct BalanceLedger {
    store: Arc<dyn DaoStore>,
    clock: Arc<dyn Clock>,
}

impl BalanceLedger {
    pub fn new(store: Arc<dyn DaoStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn lookup(&self, address: &WalletAddress) -> Result<BalanceView, WalletError> {
        match self.store.get_balance(address)? {
            Some(balance) => Ok(BalanceView::Stored(balance)),
            None => {
                debug!(%address, "no stored balance, reporting zero");
                Ok(BalanceView::Unfunded {
                    address: address.clone(),
                    encrypted_balance: Sealed::zero(),
                    last_updated: self.clock.now(),
                })
            }
        }
    }

    /// Overwrite the balance for `address`, creating the record on first write.
    /// The record keeps its id across overwrites.
    pub fn upsert(
        &self,
        address: &WalletAddress,
        encrypted_balance: Sealed,
    ) -> Result<WalletBalance, WalletError> {
        if !address.is_valid() {
            return Err(WalletError::EmptyAddress);
        }
        if encrypted_balance.is_empty() {
            return Err(WalletError::EmptyBalance);
        }

        let now = self.clock.now();
        let mut created = false;
        let mut write = |existing: Option<&WalletBalance>| match existing {
            Some(current) => WalletBalance {
                encrypted_balance: encrypted_balance.clone(),
                last_updated: now,
                ..current.clone()
            },
            None => {
                created = true;
                WalletBalance {
                    id: EntityId::generate(),
                    address: address.clone(),
                    encrypted_balance: encrypted_balance.clone(),
                    last_updated: now,
                }
            }
        };
        let balance = self.store.upsert_balance(address, &mut write)?;

        if created {
            info!(%address, id = %balance.id, "wallet balance created");
        } else {
            debug!(%address, "wallet balance overwritten");
        }
        Ok(balance)
    }
}
