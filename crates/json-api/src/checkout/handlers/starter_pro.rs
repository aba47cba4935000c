//! Starter/Pro Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tollgate_app::domain::checkout::data::StarterProCheckout;

use crate::{
    checkout::{
        errors::into_status_error, requests::StarterProCheckoutRequest,
        responses::CheckoutResponse,
    },
    extensions::*,
    observability::record_checkout,
};

/// Starter/Pro Checkout Handler
#[endpoint(
    tags("checkout"),
    summary = "Starter/Pro Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<StarterProCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let checkout =
        StarterProCheckout::try_from(json.into_inner()).or_400("invalid starter/pro checkout")?;

    let order = state.app.checkout.checkout_starter_pro(checkout).await;

    record_checkout("starter_pro", &order);

    let order = order.map_err(into_status_error)?;

    Ok(Json(order.into()))
}
