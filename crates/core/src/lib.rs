//! Tollgate
//!
//! Plan pricing, coupon offer resolution and signed, short-lived purchase
//! contracts for a small subscription and one-time plan catalog.

pub mod catalog;
pub mod contracts;
pub mod offers;
pub mod pricing;
