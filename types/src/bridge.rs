//! Cross-chain bridge transaction records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ChainId, EntityId, ParseError, Sealed, Timestamp, WalletAddress};

/// Settlement state of a bridge transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

impl BridgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "failed" => Ok(Self::Failed),
            other => Err(ParseError::UnknownBridgeStatus(other.to_string())),
        }
    }
}

/// A simulated cross-chain transfer.
///
/// `tx_hash` is `None` exactly while `status` is [`BridgeStatus::Pending`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeTransaction {
    pub id: EntityId,
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub token: String,
    pub encrypted_amount: Sealed,
    pub sender: WalletAddress,
    pub recipient: WalletAddress,
    pub status: BridgeStatus,
    pub tx_hash: Option<String>,
    pub created_at: Timestamp,
}

impl BridgeTransaction {
    /// Whether `address` is the sender or the recipient.
    pub fn involves(&self, address: &WalletAddress) -> bool {
        &self.sender == address || &self.recipient == address
    }
}

/// Partial update of a bridge transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgePatch {
    pub status: Option<BridgeStatus>,
    pub tx_hash: Option<String>,
}

impl BridgePatch {
    /// The settlement transition: confirmed, with the given hash.
    pub fn confirmed(tx_hash: String) -> Self {
        Self {
            status: Some(BridgeStatus::Confirmed),
            tx_hash: Some(tx_hash),
        }
    }

    pub fn apply_to(self, tx: &mut BridgeTransaction) {
        if let Some(status) = self.status {
            tx.status = status;
        }
        if let Some(hash) = self.tx_hash {
            tx.tx_hash = Some(hash);
        }
    }
}
