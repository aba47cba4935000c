//! Verify Payment Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tollgate_app::domain::checkout::data::PaymentVerification;

use crate::{
    checkout::{
        errors::into_status_error, requests::VerifyPaymentRequest,
        responses::PaymentVerifiedResponse,
    },
    extensions::*,
};

/// Verify Payment Handler
///
/// Confirms a completed gateway payment and returns the signed thank-you
/// redirect for it.
#[endpoint(
    tags("payments"),
    summary = "Verify Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid signature or payment"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Contract signing unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyPaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentVerifiedResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let verification =
        PaymentVerification::try_from(json.into_inner()).or_400("invalid payment verification")?;

    let verified = state
        .app
        .checkout
        .verify_payment(verification)
        .await
        .map_err(into_status_error)?;

    Ok(Json(verified.into()))
}
