//! Fundamental types for the Umbra DAO service.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! identifiers, wallet addresses, timestamps, opaque sealed tokens, the chain
//! registry, and the four stored entity kinds.

pub mod address;
pub mod balance;
pub mod bridge;
pub mod chain;
pub mod error;
pub mod id;
pub mod proposal;
pub mod sealed;
pub mod time;
pub mod vote;

pub use address::WalletAddress;
pub use balance::WalletBalance;
pub use bridge::{BridgePatch, BridgeStatus, BridgeTransaction};
pub use chain::{ChainId, ChainInfo};
pub use error::ParseError;
pub use id::EntityId;
pub use proposal::{Proposal, ProposalPatch, ProposalStatus};
pub use sealed::Sealed;
pub use time::{Clock, SystemClock, Timestamp};
pub use vote::{BallotChoice, Vote};
