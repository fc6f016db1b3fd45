//! In-memory store backing every entity kind.

use umbra_types::{
    BridgePatch, BridgeTransaction, EntityId, Proposal, ProposalPatch, Timestamp, Vote,
    WalletAddress, WalletBalance,
};

use crate::collection::{Collection, Entity, Order};
use crate::{BalanceStore, BridgeStore, ProposalStore, StoreError, VoteStore};

impl Entity for Proposal {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Entity for Vote {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }

    fn created_at(&self) -> Timestamp {
        self.timestamp
    }
}

impl Entity for BridgeTransaction {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Entity for WalletBalance {
    type Key = WalletAddress;

    fn key(&self) -> WalletAddress {
        self.address.clone()
    }

    fn created_at(&self) -> Timestamp {
        self.last_updated
    }
}

/// Process-lifetime storage. Construct one per service (or per test).
#[derive(Default)]
pub struct MemStore {
    proposals: Collection<Proposal>,
    votes: Collection<Vote>,
    bridge: Collection<BridgeTransaction>,
    balances: Collection<WalletBalance>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProposalStore for MemStore {
    fn insert_proposal(&self, proposal: Proposal) -> Result<Proposal, StoreError> {
        Ok(self.proposals.insert(proposal))
    }

    fn get_proposal(&self, id: &EntityId) -> Result<Option<Proposal>, StoreError> {
        Ok(self.proposals.get(id))
    }

    fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        Ok(self.proposals.list(|_| true, Order::NewestFirst))
    }

    fn update_proposal_with(
        &self,
        id: &EntityId,
        derive: &mut dyn FnMut(&Proposal) -> ProposalPatch,
    ) -> Result<Option<Proposal>, StoreError> {
        Ok(self.proposals.update_with(id, |p| derive(p).apply_to(p)))
    }
}

impl VoteStore for MemStore {
    fn insert_vote(&self, vote: Vote) -> Result<Vote, StoreError> {
        let (proposal_id, voter) = (vote.proposal_id.clone(), vote.voter.clone());
        self.votes
            .insert_unless(vote, |v| v.proposal_id == proposal_id && v.voter == voter)
            .map_err(|existing| {
                StoreError::Duplicate(format!("{}:{}", existing.proposal_id, existing.voter))
            })
    }

    fn votes_for_proposal(&self, proposal_id: &EntityId) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .votes
            .list(|v| &v.proposal_id == proposal_id, Order::OldestFirst))
    }

    fn has_voted(&self, proposal_id: &EntityId, voter: &WalletAddress) -> Result<bool, StoreError> {
        Ok(self
            .votes
            .any(|v| &v.proposal_id == proposal_id && &v.voter == voter))
    }
}

impl BridgeStore for MemStore {
    fn insert_bridge_transaction(
        &self,
        tx: BridgeTransaction,
    ) -> Result<BridgeTransaction, StoreError> {
        Ok(self.bridge.insert(tx))
    }

    fn get_bridge_transaction(
        &self,
        id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        Ok(self.bridge.get(id))
    }

    fn list_bridge_transactions(
        &self,
        involving: Option<&WalletAddress>,
    ) -> Result<Vec<BridgeTransaction>, StoreError> {
        Ok(self.bridge.list(
            |tx| involving.map_or(true, |a| tx.involves(a)),
            Order::NewestFirst,
        ))
    }

    fn update_bridge_transaction(
        &self,
        id: &EntityId,
        patch: BridgePatch,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        Ok(self.bridge.update_with(id, |tx| patch.apply_to(tx)))
    }

    fn remove_bridge_transaction(
        &self,
        id: &EntityId,
    ) -> Result<Option<BridgeTransaction>, StoreError> {
        Ok(self.bridge.remove(id))
    }
}

impl BalanceStore for MemStore {
    fn get_balance(&self, address: &WalletAddress) -> Result<Option<WalletBalance>, StoreError> {
        Ok(self.balances.get(address))
    }

    fn upsert_balance(
        &self,
        address: &WalletAddress,
        write: &mut dyn FnMut(Option<&WalletBalance>) -> WalletBalance,
    ) -> Result<WalletBalance, StoreError> {
        Ok(self.balances.upsert(address, |existing| {
            let mut balance = write(existing);
            balance.address = address.clone();
            balance
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_types::{BridgeStatus, ChainId, ProposalStatus, Sealed};

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn proposal(id: &str, at: i64) -> Proposal {
        Proposal {
            id: EntityId::from(id),
            title: format!("proposal {id}"),
            description: "D".into(),
            proposer: WalletAddress::from("0xabc"),
            status: ProposalStatus::Active,
            votes_for: Sealed::zero(),
            votes_against: Sealed::zero(),
            votes_abstain: Sealed::zero(),
            total_voters: 0,
            deadline: ts(1_000_000),
            created_at: ts(at),
        }
    }

    fn vote(id: &str, proposal_id: &str, voter: &str) -> Vote {
        Vote {
            id: EntityId::from(id),
            proposal_id: EntityId::from(proposal_id),
            voter: WalletAddress::from(voter),
            encrypted_choice: Sealed::new("encrypted_for_0"),
            timestamp: ts(0),
        }
    }

    fn transfer(id: &str, sender: &str, recipient: &str, at: i64) -> BridgeTransaction {
        BridgeTransaction {
            id: EntityId::from(id),
            from_chain: ChainId::Ethereum,
            to_chain: ChainId::ZamaDevnet,
            token: "USDC".into(),
            encrypted_amount: Sealed::new("100"),
            sender: WalletAddress::from(sender),
            recipient: WalletAddress::from(recipient),
            status: BridgeStatus::Pending,
            tx_hash: None,
            created_at: ts(at),
        }
    }

    #[test]
    fn proposals_list_newest_first() {
        let store = MemStore::new();
        store.insert_proposal(proposal("a", 10)).unwrap();
        store.insert_proposal(proposal("b", 30)).unwrap();
        store.insert_proposal(proposal("c", 20)).unwrap();
        let ids: Vec<String> = store
            .list_proposals()
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn missing_proposal_is_none_not_error() {
        let store = MemStore::new();
        assert!(store.get_proposal(&EntityId::from("nope")).unwrap().is_none());
        assert!(store
            .update_proposal(&EntityId::from("nope"), ProposalPatch::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let store = MemStore::new();
        store.insert_proposal(proposal("a", 0)).unwrap();
        let updated = store
            .update_proposal(
                &EntityId::from("a"),
                ProposalPatch {
                    total_voters: Some(4),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.total_voters, 4);
        assert_eq!(updated.status, ProposalStatus::Active);
        assert_eq!(updated.title, "proposal a");
        assert_eq!(store.get_proposal(&EntityId::from("a")).unwrap(), Some(updated));
    }

    #[test]
    fn second_vote_by_same_voter_is_duplicate() {
        let store = MemStore::new();
        store.insert_vote(vote("v1", "p", "0xabc")).unwrap();
        let err = store.insert_vote(vote("v2", "p", "0xabc")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Same voter on another proposal, another voter on the same one.
        store.insert_vote(vote("v3", "q", "0xabc")).unwrap();
        store.insert_vote(vote("v4", "p", "0xdef")).unwrap();

        assert_eq!(store.votes_for_proposal(&EntityId::from("p")).unwrap().len(), 2);
        assert!(store
            .has_voted(&EntityId::from("p"), &WalletAddress::from("0xabc"))
            .unwrap());
        assert!(!store
            .has_voted(&EntityId::from("q"), &WalletAddress::from("0xdef"))
            .unwrap());
    }

    #[test]
    fn bridge_listing_filters_by_either_side() {
        let store = MemStore::new();
        store.insert_bridge_transaction(transfer("t1", "0x1", "0x2", 10)).unwrap();
        store.insert_bridge_transaction(transfer("t2", "0x3", "0x1", 20)).unwrap();
        store.insert_bridge_transaction(transfer("t3", "0x4", "0x5", 30)).unwrap();

        let all = store.list_bridge_transactions(None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, EntityId::from("t3"));

        let mine = store
            .list_bridge_transactions(Some(&WalletAddress::from("0x1")))
            .unwrap();
        let ids: Vec<&str> = mine.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn bridge_update_and_remove() {
        let store = MemStore::new();
        store.insert_bridge_transaction(transfer("t1", "0x1", "0x2", 0)).unwrap();
        let confirmed = store
            .update_bridge_transaction(&EntityId::from("t1"), BridgePatch::confirmed("0xff".into()))
            .unwrap()
            .unwrap();
        assert_eq!(confirmed.status, BridgeStatus::Confirmed);

        assert!(store.remove_bridge_transaction(&EntityId::from("t1")).unwrap().is_some());
        assert!(store
            .update_bridge_transaction(&EntityId::from("t1"), BridgePatch::confirmed("0xff".into()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn balance_upsert_keeps_one_record_per_address() {
        let store = MemStore::new();
        let addr = WalletAddress::from("0xabc");
        let mut write = |existing: Option<&WalletBalance>| WalletBalance {
            id: existing.map(|b| b.id.clone()).unwrap_or_else(|| EntityId::from("b1")),
            address: addr.clone(),
            encrypted_balance: Sealed::new("5"),
            last_updated: ts(0),
        };
        store.upsert_balance(&addr, &mut write).unwrap();
        store.upsert_balance(&addr, &mut write).unwrap();
        let stored = store.get_balance(&addr).unwrap().unwrap();
        assert_eq!(stored.id, EntityId::from("b1"));
        assert!(store.get_balance(&WalletAddress::from("0xother")).unwrap().is_none());
    }
}
