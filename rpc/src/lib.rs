//! REST API for the Umbra DAO service.
//!
//! Provides endpoints for:
//! - Governance proposals and sealed voting
//! - Simulated bridge transfers and their settlement status
//! - Sealed wallet balances
//! - The chain registry and a health probe
//!
//! Every mutating endpoint validates its body before anything is written.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod validation;

pub use error::{ApiError, RpcError};
pub use server::{router, RpcServer};
pub use state::ApiState;
pub use validation::FieldIssue;
