//! Contracts errors.

use std::error::Error as StdError;

use thiserror::Error;
use tollgate::contracts::ContractVerificationError;

#[derive(Debug, Error)]
pub enum ContractStoreError {
    #[error("contract store is unavailable")]
    Unavailable(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum ContractsServiceError {
    #[error("contract signing is not configured")]
    Misconfigured,

    #[error(transparent)]
    Verification(#[from] ContractVerificationError),

    #[error("contract storage error")]
    Store(#[from] ContractStoreError),
}
