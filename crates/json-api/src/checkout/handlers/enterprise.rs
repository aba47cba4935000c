//! Enterprise Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tollgate_app::domain::checkout::data::EnterpriseCheckout;

use crate::{
    checkout::{
        errors::into_status_error, requests::EnterpriseCheckoutRequest,
        responses::CheckoutResponse,
    },
    extensions::*,
    observability::record_checkout,
};

/// Enterprise Checkout Handler
///
/// Prices an enterprise package, applies any coupon and opens a gateway order.
#[endpoint(
    tags("checkout"),
    summary = "Enterprise Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<EnterpriseCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let checkout =
        EnterpriseCheckout::try_from(json.into_inner()).or_400("invalid enterprise checkout")?;

    let order = state.app.checkout.checkout_enterprise(checkout).await;

    record_checkout("enterprise", &order);

    let order = order.map_err(into_status_error)?;

    Ok(Json(order.into()))
}
