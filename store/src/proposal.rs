//! Proposal storage trait.

use crate::StoreError;
use umbra_types::{EntityId, Proposal, ProposalPatch};

pub trait ProposalStore {
    /// Store a new proposal.
    fn insert_proposal(&self, proposal: Proposal) -> Result<Proposal, StoreError>;

    /// Get a proposal by id; `Ok(None)` when absent.
    fn get_proposal(&self, id: &EntityId) -> Result<Option<Proposal>, StoreError>;

    /// All proposals, newest first.
    fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError>;

    /// Atomically derive a patch from the current proposal and apply it.
    /// Returns the updated proposal, or `Ok(None)` when absent.
    fn update_proposal_with(
        &self,
        id: &EntityId,
        derive: &mut dyn FnMut(&Proposal) -> ProposalPatch,
    ) -> Result<Option<Proposal>, StoreError>;

    /// Merge a partial update into an existing proposal.
    fn update_proposal(
        &self,
        id: &EntityId,
        patch: ProposalPatch,
    ) -> Result<Option<Proposal>, StoreError> {
        let mut patch = Some(patch);
        self.update_proposal_with(id, &mut |_| patch.take().unwrap_or_default())
    }
}
