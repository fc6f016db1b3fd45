use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("wallet {voter} has already voted on proposal {proposal_id}")]
    AlreadyVoted { proposal_id: String, voter: String },

    #[error("{field} must start at zero, got {value}")]
    InvalidCounter { field: &'static str, value: String },

    #[error("store error: {0}")]
    Store(#[from] umbra_store::StoreError),
}
