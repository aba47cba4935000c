//! Tollgate Domain Concerns

pub mod checkout;
pub mod contracts;
pub mod offers;
