//! DAO governance: proposal intake, sealed ballots and the vote tally rule.
//!
//! Counters on a proposal are [`umbra_types::Sealed`] tokens and are only
//! ever advanced through a [`TallyCipher`], so a real homomorphic backend can
//! replace [`MockCipher`] without touching the API contract.

pub mod cipher;
pub mod engine;
pub mod error;
pub mod proposal;

pub use cipher::{MockCipher, TallyCipher};
pub use engine::{tally_patch, Ballot, GovernanceEngine};
pub use error::GovernanceError;
pub use proposal::NewProposal;
