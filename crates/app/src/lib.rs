//! Checkout, offer and contract services shared by the HTTP surfaces.

pub mod clock;
pub mod context;
pub mod domain;
pub mod gateway;
pub mod webhooks;

#[cfg(test)]
mod test;
