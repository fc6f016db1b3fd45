//! Cached per-address balances.

use serde::{Deserialize, Serialize};

use crate::{EntityId, Sealed, Timestamp, WalletAddress};

/// The balance record for one address. At most one exists per address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub id: EntityId,
    pub address: WalletAddress,
    pub encrypted_balance: Sealed,
    pub last_updated: Timestamp,
}
