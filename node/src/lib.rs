//! Umbra DAO service node.
//!
//! The node owns the process-lifetime pieces of the service:
//! - Configuration (TOML file with per-field defaults)
//! - Structured logging
//! - The API server and its graceful shutdown
//! - Cancellation of outstanding bridge settlements on stop

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::{DaoNode, RunningNode};
pub use shutdown::ShutdownController;
