//! Bridge transaction storage trait.

use crate::StoreError;
use umbra_types::{BridgePatch, BridgeTransaction, EntityId, WalletAddress};

pub trait BridgeStore {
    fn insert_bridge_transaction(
        &self,
        tx: BridgeTransaction,
    ) -> Result<BridgeTransaction, StoreError>;

    fn get_bridge_transaction(
        &self,
        id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError>;

    /// Transactions newest first, optionally only those where `involving`
    /// is the sender or the recipient.
    fn list_bridge_transactions(
        &self,
        involving: Option<&WalletAddress>,
    ) -> Result<Vec<BridgeTransaction>, StoreError>;

    fn update_bridge_transaction(
        &self,
        id: &EntityId,
        patch: BridgePatch,
    ) -> Result<Option<BridgeTransaction>, StoreError>;

    fn remove_bridge_transaction(
        &self,
        id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError>;
}
