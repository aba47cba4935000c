//! Admin access

pub(crate) mod middleware;
