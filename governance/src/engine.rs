//! Governance engine: proposal creation, ballot casting, and the tally rule.

use std::sync::Arc;

use tracing::{debug, info};
use umbra_store::{DaoStore, StoreError};
use umbra_types::{
    BallotChoice, Clock, EntityId, Proposal, ProposalPatch, Vote, WalletAddress,
};

use crate::cipher::TallyCipher;
use crate::error::GovernanceError;
use crate::proposal::NewProposal;

/// A validated vote request. `choice` is kept raw: unrecognised values are
/// still recorded and counted as a voter, but advance no counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub proposal_id: EntityId,
    pub voter: WalletAddress,
    pub choice: String,
}

impl Ballot {
    pub fn new(proposal_id: EntityId, voter: WalletAddress, choice: impl Into<String>) -> Self {
        Self {
            proposal_id,
            voter,
            choice: choice.into(),
        }
    }

    pub fn recognised_choice(&self) -> Option<BallotChoice> {
        BallotChoice::parse(&self.choice)
    }
}

/// The partial update one ballot applies to its proposal: one more voter,
/// and the matching counter advanced through the cipher.
pub fn tally_patch(
    cipher: &dyn TallyCipher,
    proposal: &Proposal,
    choice: Option<BallotChoice>,
) -> ProposalPatch {
    let patch = ProposalPatch {
        total_voters: Some(proposal.total_voters.saturating_add(1)),
        ..Default::default()
    };
    match choice {
        Some(choice) => {
            let next = cipher.increment(proposal.counter(choice));
            patch.with_counter(choice, next)
        }
        None => patch,
    }
}

pub struct GovernanceEngine {
    store: Arc<dyn DaoStore>,
    cipher: Arc<dyn TallyCipher>,
    clock: Arc<dyn Clock>,
}

impl GovernanceEngine {
    pub fn new(
        store: Arc<dyn DaoStore>,
        cipher: Arc<dyn TallyCipher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            cipher,
            clock,
        }
    }

    /// Create a proposal with a fresh id and creation time.
    ///
    /// No vote has been cast yet, so a seeded counter must equal the
    /// cipher's zero; nothing is stored if any does not.
    pub fn create_proposal(&self, input: NewProposal) -> Result<Proposal, GovernanceError> {
        let zero = self.cipher.zero();
        if let Some((field, value)) = input.seeded_counters().find(|(_, v)| **v != zero) {
            return Err(GovernanceError::InvalidCounter {
                field,
                value: value.to_string(),
            });
        }

        let proposal = input.into_proposal(EntityId::generate(), self.clock.now(), &zero);
        let stored = self.store.insert_proposal(proposal)?;
        info!(id = %stored.id, proposer = %stored.proposer, "proposal created");
        Ok(stored)
    }

    /// All proposals, newest first.
    pub fn proposals(&self) -> Result<Vec<Proposal>, GovernanceError> {
        Ok(self.store.list_proposals()?)
    }

    pub fn proposal(&self, id: &EntityId) -> Result<Option<Proposal>, GovernanceError> {
        Ok(self.store.get_proposal(id)?)
    }

    /// Votes on a proposal, oldest first. `None` when neither the proposal
    /// nor any vote references `proposal_id`.
    pub fn votes(&self, proposal_id: &EntityId) -> Result<Option<Vec<Vote>>, GovernanceError> {
        let votes = self.store.votes_for_proposal(proposal_id)?;
        if votes.is_empty() && self.store.get_proposal(proposal_id)?.is_none() {
            return Ok(None);
        }
        Ok(Some(votes))
    }

    /// Record a ballot, then tally it.
    ///
    /// The vote insert and the tally are two separate store operations. If
    /// the proposal does not exist the vote is still recorded and the tally
    /// is skipped.
    pub fn cast_vote(&self, ballot: Ballot) -> Result<Vote, GovernanceError> {
        if self.store.has_voted(&ballot.proposal_id, &ballot.voter)? {
            return Err(already_voted(&ballot));
        }

        let now = self.clock.now();
        let vote = Vote {
            id: EntityId::generate(),
            proposal_id: ballot.proposal_id.clone(),
            voter: ballot.voter.clone(),
            encrypted_choice: self.cipher.seal_choice(&ballot.choice, now),
            timestamp: now,
        };
        let vote = self.store.insert_vote(vote).map_err(|e| match e {
            StoreError::Duplicate(_) => already_voted(&ballot),
            other => GovernanceError::Store(other),
        })?;

        let choice = ballot.recognised_choice();
        let cipher = self.cipher.as_ref();
        let tallied = self.store.update_proposal_with(
            &ballot.proposal_id,
            &mut |p: &Proposal| tally_patch(cipher, p, choice),
        )?;

        match tallied {
            Some(p) => info!(
                proposal = %p.id,
                voter = %vote.voter,
                total_voters = p.total_voters,
                "vote recorded"
            ),
            None => debug!(
                proposal = %ballot.proposal_id,
                "vote recorded for unknown proposal, tally skipped"
            ),
        }
        if choice.is_none() {
            debug!(choice = %ballot.choice, "unrecognised choice counted as voter only");
        }
        Ok(vote)
    }
}

fn already_voted(ballot: &Ballot) -> GovernanceError {
    GovernanceError::AlreadyVoted {
        proposal_id: ballot.proposal_id.to_string(),
        voter: ballot.voter.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::MockCipher;
    use umbra_nullables::{FailingStore, NullClock};
    use umbra_store::{MemStore, ProposalStore, VoteStore};
    use umbra_types::{ProposalStatus, Sealed, Timestamp};

    fn engine() -> (Arc<MemStore>, GovernanceEngine) {
        let store = Arc::new(MemStore::new());
        let engine = GovernanceEngine::new(
            store.clone(),
            Arc::new(MockCipher),
            Arc::new(NullClock::at_millis(1_000)),
        );
        (store, engine)
    }

    fn new_proposal() -> NewProposal {
        NewProposal::new(
            "T",
            "D",
            WalletAddress::from("0xabc"),
            Timestamp::parse("2099-01-01T00:00:00Z").unwrap(),
        )
    }

    #[test]
    fn created_proposal_has_defaults() {
        let (_, engine) = engine();
        let p = engine.create_proposal(new_proposal()).unwrap();
        assert_eq!(p.status, ProposalStatus::Active);
        assert_eq!(p.votes_for.as_str(), "0");
        assert_eq!(p.total_voters, 0);
        assert_eq!(p.created_at.as_millis(), 1_000);
        assert_eq!(engine.proposal(&p.id).unwrap(), Some(p));
    }

    #[test]
    fn unreadable_seed_counter_stores_nothing() {
        let (store, engine) = engine();
        let mut input = new_proposal();
        input.votes_abstain = Some(Sealed::new("lots"));
        let err = engine.create_proposal(input).unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::InvalidCounter { field: "votesAbstain", .. }
        ));
        assert!(store.list_proposals().unwrap().is_empty());
    }

    #[test]
    fn non_zero_seed_is_rejected() {
        let (store, engine) = engine();
        let mut input = new_proposal();
        input.votes_for = Some(Sealed::new("5"));
        assert!(matches!(
            engine.create_proposal(input).unwrap_err(),
            GovernanceError::InvalidCounter { field: "votesFor", .. }
        ));
        assert!(store.list_proposals().unwrap().is_empty());

        let mut input = new_proposal();
        input.votes_for = Some(Sealed::zero());
        let p = engine.create_proposal(input).unwrap();
        assert_eq!(p.votes_for, Sealed::zero());
        assert_eq!(p.total_voters, 0);
    }

    #[test]
    fn vote_increments_matching_counter() {
        let (_, engine) = engine();
        let p = engine.create_proposal(new_proposal()).unwrap();

        let vote = engine
            .cast_vote(Ballot::new(p.id.clone(), WalletAddress::from("0xabc"), "for"))
            .unwrap();
        assert_eq!(vote.encrypted_choice.as_str(), "encrypted_for_1000");

        let after = engine.proposal(&p.id).unwrap().unwrap();
        assert_eq!(after.votes_for.as_str(), "1");
        assert_eq!(after.votes_against.as_str(), "0");
        assert_eq!(after.total_voters, 1);
    }

    #[test]
    fn choice_matching_ignores_case() {
        let (_, engine) = engine();
        let p = engine.create_proposal(new_proposal()).unwrap();
        engine
            .cast_vote(Ballot::new(p.id.clone(), WalletAddress::from("0x1"), "AGAINST"))
            .unwrap();
        let after = engine.proposal(&p.id).unwrap().unwrap();
        assert_eq!(after.votes_against.as_str(), "1");
    }

    #[test]
    fn second_vote_is_rejected_and_tally_unchanged() {
        let (_, engine) = engine();
        let p = engine.create_proposal(new_proposal()).unwrap();
        let voter = WalletAddress::from("0xabc");
        engine
            .cast_vote(Ballot::new(p.id.clone(), voter.clone(), "for"))
            .unwrap();

        let err = engine
            .cast_vote(Ballot::new(p.id.clone(), voter, "against"))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::AlreadyVoted { .. }));

        let after = engine.proposal(&p.id).unwrap().unwrap();
        assert_eq!(after.votes_for.as_str(), "1");
        assert_eq!(after.votes_against.as_str(), "0");
        assert_eq!(after.total_voters, 1);
        assert_eq!(engine.votes(&p.id).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn unrecognised_choice_counts_voter_only() {
        let (_, engine) = engine();
        let p = engine.create_proposal(new_proposal()).unwrap();
        let vote = engine
            .cast_vote(Ballot::new(p.id.clone(), WalletAddress::from("0x1"), "maybe"))
            .unwrap();
        assert_eq!(vote.encrypted_choice.as_str(), "encrypted_maybe_1000");

        let after = engine.proposal(&p.id).unwrap().unwrap();
        assert_eq!(after.total_voters, 1);
        assert_eq!(after.votes_for.as_str(), "0");
        assert_eq!(after.votes_against.as_str(), "0");
        assert_eq!(after.votes_abstain.as_str(), "0");
    }

    #[test]
    fn vote_on_missing_proposal_is_still_recorded() {
        let (store, engine) = engine();
        let ghost = EntityId::from("ghost");
        engine
            .cast_vote(Ballot::new(ghost.clone(), WalletAddress::from("0x1"), "for"))
            .unwrap();
        assert_eq!(store.votes_for_proposal(&ghost).unwrap().len(), 1);
        assert!(store.get_proposal(&ghost).unwrap().is_none());
        // The orphaned vote makes the id known to the votes listing.
        assert_eq!(engine.votes(&ghost).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn votes_for_unknown_id_is_none() {
        let (_, engine) = engine();
        assert!(engine.votes(&EntityId::from("nope")).unwrap().is_none());

        let p = engine.create_proposal(new_proposal()).unwrap();
        assert_eq!(engine.votes(&p.id).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn store_failures_surface_as_store_errors() {
        let engine = GovernanceEngine::new(
            Arc::new(FailingStore),
            Arc::new(MockCipher),
            Arc::new(NullClock::at_millis(0)),
        );
        assert!(matches!(
            engine.proposals().unwrap_err(),
            GovernanceError::Store(_)
        ));
        assert!(matches!(
            engine
                .cast_vote(Ballot::new(EntityId::from("p"), WalletAddress::from("0x1"), "for"))
                .unwrap_err(),
            GovernanceError::Store(_)
        ));
    }
}
