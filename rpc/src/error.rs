//! API error types and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};
use umbra_bridge::BridgeError;
use umbra_governance::GovernanceError;
use umbra_wallet_core::WalletError;

use crate::validation::{self, FieldIssue};

/// A request failure, rendered as `{"error": ...}` with a matching status.
///
/// `Internal` carries the underlying cause for the log only; clients see
/// nothing but the generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}")]
    Validation {
        context: &'static str,
        details: Vec<FieldIssue>,
    },

    #[error("You have already voted on this proposal")]
    DuplicateVote,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Failed to {context}")]
    Internal { context: &'static str, cause: String },
}

impl ApiError {
    pub fn internal(context: &'static str, cause: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            context,
            cause: cause.to_string(),
        }
    }

    pub fn invalid(context: &'static str, path: &str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            context,
            details: vec![FieldIssue::new(path, message)],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::DuplicateVote => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a governance failure. `context` names the operation for 500s.
    pub fn from_governance(e: GovernanceError, context: &'static str) -> Self {
        match e {
            GovernanceError::AlreadyVoted { .. } => ApiError::DuplicateVote,
            GovernanceError::InvalidCounter { field, .. } => ApiError::invalid(
                validation::PROPOSAL,
                field,
                "Counters must start at zero",
            ),
            GovernanceError::Store(e) => ApiError::internal(context, e),
        }
    }

    pub fn from_bridge(e: BridgeError, context: &'static str) -> Self {
        match e {
            BridgeError::SameChain(_) => ApiError::invalid(
                validation::TRANSFER,
                "toChain",
                "Destination chain must differ from source chain",
            ),
            BridgeError::Store(e) => ApiError::internal(context, e),
        }
    }

    pub fn from_wallet(e: WalletError, context: &'static str) -> Self {
        match e {
            WalletError::EmptyAddress | WalletError::EmptyBalance => ApiError::Validation {
                context: validation::BALANCE,
                details: Vec::new(),
            },
            WalletError::Store(e) => ApiError::internal(context, e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation { context, details } => {
                warn!(issues = details.len(), "{}", context);
                if details.is_empty() {
                    json!({ "error": context })
                } else {
                    json!({ "error": context, "details": details })
                }
            }
            ApiError::DuplicateVote => {
                warn!("duplicate vote rejected");
                json!({ "error": self.to_string() })
            }
            ApiError::NotFound(_) => {
                debug!("{}", self);
                json!({ "error": self.to_string() })
            }
            ApiError::Internal { cause, .. } => {
                error!(error = %cause, "{}", self);
                json!({ "error": self.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Failures of the HTTP server itself.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
