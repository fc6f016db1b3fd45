//! Storage traits for the Umbra DAO service.
//!
//! Every backend implements one trait per entity kind. The rest of the
//! workspace depends only on the traits (usually through [`DaoStore`]).
//! [`MemStore`] keeps everything in process memory; restarting the process
//! loses all data.

pub mod balance;
pub mod bridge;
pub mod collection;
pub mod error;
pub mod memory;
pub mod proposal;
pub mod vote;

pub use balance::BalanceStore;
pub use bridge::BridgeStore;
pub use collection::{Collection, Entity, Order};
pub use error::StoreError;
pub use memory::MemStore;
pub use proposal::ProposalStore;
pub use vote::VoteStore;

/// Everything the service needs from a backend, as one object-safe bound.
pub trait DaoStore: ProposalStore + VoteStore + BridgeStore + BalanceStore + Send + Sync {}

impl<T> DaoStore for T where T: ProposalStore + VoteStore + BridgeStore + BalanceStore + Send + Sync {}
