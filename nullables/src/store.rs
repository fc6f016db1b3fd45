//! Nullable store: a backend whose every operation fails.

use umbra_store::{BalanceStore, BridgeStore, ProposalStore, StoreError, VoteStore};
use umbra_types::{
    BridgePatch, BridgeTransaction, EntityId, Proposal, ProposalPatch, Vote, WalletAddress,
    WalletBalance,
};

/// Every call returns [`StoreError::Backend`]. Used to drive internal-error paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Backend("null store is offline".into()))
}

impl ProposalStore for FailingStore {
    fn insert_proposal(&self, _proposal: Proposal) -> Result<Proposal, StoreError> {
        offline()
    }

    fn get_proposal(&self, _id: &EntityId) -> Result<Option<Proposal>, StoreError> {
        offline()
    }

    fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        offline()
    }

    fn update_proposal_with(
        &self,
        _id: &EntityId,
        _derive: &mut dyn FnMut(&Proposal) -> ProposalPatch,
    ) -> Result<Option<Proposal>, StoreError> {
        offline()
    }
}

impl VoteStore for FailingStore {
    fn insert_vote(&self, _vote: Vote) -> Result<Vote, StoreError> {
        offline()
    }

    fn votes_for_proposal(&self, _proposal_id: &EntityId) -> Result<Vec<Vote>, StoreError> {
        offline()
    }

    fn has_voted(&self, _proposal_id: &EntityId, _voter: &WalletAddress) -> Result<bool, StoreError> {
        offline()
    }
}

impl BridgeStore for FailingStore {
    fn insert_bridge_transaction(
        &self,
        _tx: BridgeTransaction,
    ) -> Result<BridgeTransaction, StoreError> {
        offline()
    }

    fn get_bridge_transaction(
        &self,
        _id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        offline()
    }

    fn list_bridge_transactions(
        &self,
        _involving: Option<&WalletAddress>,
    ) -> Result<Vec<BridgeTransaction>, StoreError> {
        offline()
    }

    fn update_bridge_transaction(
        &self,
        _id: &EntityId,
        _patch: BridgePatch,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        offline()
    }

    fn remove_bridge_transaction(
        &self,
        _id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        offline()
    }
}

impl BalanceStore for FailingStore {
    fn get_balance(&self, _address: &WalletAddress) -> Result<Option<WalletBalance>, StoreError> {
        offline()
    }

    fn upsert_balance(
        &self,
        _address: &WalletAddress,
        _write: &mut dyn FnMut(Option<&WalletBalance>) -> WalletBalance,
    ) -> Result<WalletBalance, StoreError> {
        offline()
    }
}
