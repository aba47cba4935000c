//! Checkout Handlers

pub(crate) mod enterprise;
pub(crate) mod one_time;
pub(crate) mod starter_pro;
