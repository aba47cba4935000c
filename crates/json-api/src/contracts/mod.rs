//! Thank-you Contracts

mod errors;
pub(crate) mod get;
