use thiserror::Error;
use umbra_types::ChainId;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("source and destination chain are both {0}")]
    SameChain(ChainId),

    #[error("store error: {0}")]
    Store(#[from] umbra_store::StoreError),
}
