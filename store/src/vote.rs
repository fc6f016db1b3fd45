//! Vote storage trait.

use crate::StoreError;
use umbra_types::{EntityId, Vote, WalletAddress};

pub trait VoteStore {
    /// Store a vote. Fails with [`StoreError::Duplicate`] if the voter already
    /// has a vote on the same proposal; the check and the insert are atomic.
    fn insert_vote(&self, vote: Vote) -> Result<Vote, StoreError>;

    /// All votes referencing a proposal id, oldest first.
    fn votes_for_proposal(&self, proposal_id: &EntityId) -> Result<Vec<Vote>, StoreError>;

    /// Whether `voter` already has a vote on `proposal_id`.
    fn has_voted(&self, proposal_id: &EntityId, voter: &WalletAddress) -> Result<bool, StoreError>;
}
