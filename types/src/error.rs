//! Parse errors for the string-encoded enums and timestamps.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown chain: {0}")]
    UnknownChain(String),

    #[error("unknown proposal status: {0}")]
    UnknownProposalStatus(String),

    #[error("unknown bridge status: {0}")]
    UnknownBridgeStatus(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
