//! Offers errors.

use std::io;

use thiserror::Error;
use tollgate::offers::OfferValidationError;

#[derive(Debug, Error)]
pub enum OfferStoreError {
    #[error("failed to access offers file")]
    Io(#[from] io::Error),

    #[error("offers file is malformed")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum OffersServiceError {
    #[error("offer not found")]
    NotFound,

    #[error("offer code is required")]
    MissingCode,

    #[error("invalid offer")]
    Invalid(#[from] OfferValidationError),

    #[error("offer storage error")]
    Store(#[from] OfferStoreError),
}
