//! Proposal intake.

use umbra_types::{EntityId, Proposal, ProposalStatus, Sealed, Timestamp, WalletAddress};

/// A validated request to create a proposal. Omitted optional fields take
/// their defaults: status `active`, every counter zero. Seeded counters are
/// accepted only when they already equal zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub proposer: WalletAddress,
    pub deadline: Timestamp,
    pub status: Option<ProposalStatus>,
    pub votes_for: Option<Sealed>,
    pub votes_against: Option<Sealed>,
    pub votes_abstain: Option<Sealed>,
}

impl NewProposal {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        proposer: WalletAddress,
        deadline: Timestamp,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            proposer,
            deadline,
            status: None,
            votes_for: None,
            votes_against: None,
            votes_abstain: None,
        }
    }

    /// Seeded counters, labelled by wire field name.
    pub(crate) fn seeded_counters(&self) -> impl Iterator<Item = (&'static str, &Sealed)> {
        [
            ("votesFor", self.votes_for.as_ref()),
            ("votesAgainst", self.votes_against.as_ref()),
            ("votesAbstain", self.votes_abstain.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, v)| v.map(|v| (field, v)))
    }

    /// Materialise the stored proposal, filling omitted counters with
    /// `zero`. `total_voters` always starts at zero.
    pub fn into_proposal(self, id: EntityId, created_at: Timestamp, zero: &Sealed) -> Proposal {
        Proposal {
            id,
            title: self.title,
            description: self.description,
            proposer: self.proposer,
            status: self.status.unwrap_or_default(),
            votes_for: self.votes_for.unwrap_or_else(|| zero.clone()),
            votes_against: self.votes_against.unwrap_or_else(|| zero.clone()),
            votes_abstain: self.votes_abstain.unwrap_or_else(|| zero.clone()),
            total_voters: 0,
            deadline: self.deadline,
            created_at,
        }
    }
}
