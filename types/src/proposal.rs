//! Governance proposals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{BallotChoice, EntityId, ParseError, Sealed, Timestamp, WalletAddress};

/// Where a proposal stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Active,
    Passed,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "passed" => Ok(Self::Passed),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseError::UnknownProposalStatus(other.to_string())),
        }
    }
}

/// A governance proposal.
///
/// The three counters are sealed tokens: only the cipher backend can read
/// or advance them. `total_voters` is public.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub proposer: WalletAddress,
    pub status: ProposalStatus,
    pub votes_for: Sealed,
    pub votes_against: Sealed,
    pub votes_abstain: Sealed,
    pub total_voters: u64,
    pub deadline: Timestamp,
    pub created_at: Timestamp,
}

impl Proposal {
    /// The counter that tracks `choice`.
    pub fn counter(&self, choice: BallotChoice) -> &Sealed {
        match choice {
            BallotChoice::For => &self.votes_for,
            BallotChoice::Against => &self.votes_against,
            BallotChoice::Abstain => &self.votes_abstain,
        }
    }
}

/// Partial update of a proposal. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalPatch {
    pub votes_for: Option<Sealed>,
    pub votes_against: Option<Sealed>,
    pub votes_abstain: Option<Sealed>,
    pub total_voters: Option<u64>,
}

impl ProposalPatch {
    /// Set the counter that tracks `choice`.
    pub fn with_counter(mut self, choice: BallotChoice, value: Sealed) -> Self {
        match choice {
            BallotChoice::For => self.votes_for = Some(value),
            BallotChoice::Against => self.votes_against = Some(value),
            BallotChoice::Abstain => self.votes_abstain = Some(value),
        }
        self
    }

    pub fn apply_to(self, proposal: &mut Proposal) {
        if let Some(v) = self.votes_for {
            proposal.votes_for = v;
        }
        if let Some(v) = self.votes_against {
            proposal.votes_against = v;
        }
        if let Some(v) = self.votes_abstain {
            proposal.votes_abstain = v;
        }
        if let Some(n) = self.total_voters {
            proposal.total_voters = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Proposal {
        let now = Timestamp::from_millis(0).unwrap();
        Proposal {
            id: EntityId::from("p1"),
            title: "T".into(),
            description: "D".into(),
            proposer: WalletAddress::from("0xabc"),
            status: ProposalStatus::Active,
            votes_for: Sealed::zero(),
            votes_against: Sealed::zero(),
            votes_abstain: Sealed::zero(),
            total_voters: 0,
            deadline: now,
            created_at: now,
        }
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let mut p = sample();
        ProposalPatch {
            total_voters: Some(3),
            ..Default::default()
        }
        .with_counter(BallotChoice::Against, Sealed::new("2"))
        .apply_to(&mut p);

        assert_eq!(p.total_voters, 3);
        assert_eq!(p.votes_against.as_str(), "2");
        assert_eq!(p.votes_for.as_str(), "0");
        assert_eq!(p.status, ProposalStatus::Active);
        assert_eq!(p.title, "T");
    }

    #[test]
    fn serialises_camel_case_counters() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["votesFor"], "0");
        assert_eq!(json["totalVoters"], 0);
        assert_eq!(json["status"], "active");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn status_round_trips_through_str() {
        for s in ["active", "passed", "rejected"] {
            assert_eq!(s.parse::<ProposalStatus>().unwrap().as_str(), s);
        }
        assert!("closed".parse::<ProposalStatus>().is_err());
    }
}
