//! Ballots.

use serde::{Deserialize, Serialize};

use crate::{EntityId, Sealed, Timestamp, WalletAddress};

/// One voter's ballot on one proposal. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: EntityId,
    /// The proposal voted on. A reference only; the proposal may not exist.
    pub proposal_id: EntityId,
    pub voter: WalletAddress,
    /// Opaque token standing in for the encrypted choice.
    pub encrypted_choice: Sealed,
    pub timestamp: Timestamp,
}

/// A recognised ballot choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallotChoice {
    For,
    Against,
    Abstain,
}

impl BallotChoice {
    /// Case-insensitive match against `for`, `against`, `abstain`.
    /// Anything else is not a recognised choice.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "for" => Some(Self::For),
            "against" => Some(Self::Against),
            "abstain" => Some(Self::Abstain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
            Self::Abstain => "abstain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_parsing_ignores_case() {
        assert_eq!(BallotChoice::parse("FOR"), Some(BallotChoice::For));
        assert_eq!(BallotChoice::parse("Against"), Some(BallotChoice::Against));
        assert_eq!(BallotChoice::parse("abstain"), Some(BallotChoice::Abstain));
        assert_eq!(BallotChoice::parse("maybe"), None);
        assert_eq!(BallotChoice::parse(""), None);
    }
}
