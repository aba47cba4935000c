//! Checkout errors.

use thiserror::Error;
use tollgate::pricing::PricingError;

use crate::{
    domain::{checkout::notes::NotesError, contracts::ContractsServiceError},
    gateway::GatewayError,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("invalid pricing request")]
    Pricing(#[from] PricingError),

    #[error("order amount is too large")]
    AmountOverflow,

    #[error("payment gateway error")]
    Gateway(#[from] GatewayError),

    #[error("payment signature is invalid")]
    InvalidSignature,

    #[error("payment does not belong to the order")]
    PaymentMismatch,

    #[error("payment has not completed: {0}")]
    PaymentIncomplete(String),

    #[error("order was not created by this service")]
    InvalidNotes(#[from] NotesError),

    #[error(transparent)]
    Contracts(#[from] ContractsServiceError),
}
