//! List Offers Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
};

/// List Offers Handler
#[endpoint(
    tags("offers"),
    summary = "List Offers",
    security(("admin_secret" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offers in store order"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let offers = state
        .app
        .offers
        .list_offers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OffersResponse {
        offers: offers.into_iter().map(Into::into).collect(),
    }))
}
