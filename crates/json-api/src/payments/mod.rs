//! Payments

pub(crate) mod verify;
