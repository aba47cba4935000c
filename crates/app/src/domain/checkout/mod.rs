//! Checkout
//!
//! Prices a request, applies any coupon and opens a gateway order; after
//! payment, verifies it and hands out a signed thank-you redirect.

pub mod data;
mod errors;
pub mod notes;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
