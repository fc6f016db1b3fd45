use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet address is empty")]
    EmptyAddress,

    #[error("encrypted balance is empty")]
    EmptyBalance,

    #[error("store error: {0}")]
    Store(#[from] umbra_store::StoreError),
}
