//! Liveness endpoint for load balancers and deploy checks.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Name reported by the liveness endpoint.
const SERVICE_NAME: &str = "tollgate";

/// Liveness report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Service name, so a shared balancer can tell deployments apart
    pub service: String,

    /// Crate version of the running binary
    pub version: String,
}

/// Report that the checkout API process is up.
///
/// The payment gateway, offer file and webhook are not contacted.
#[endpoint(tags("health"), summary = "Checkout API liveness")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
