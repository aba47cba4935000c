//! Create Offer Handler

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tollgate::offers::NewOffer;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        models::{CreateOfferRequest, OfferResponse},
    },
};

/// Create Offer Handler
///
/// Saving a code that already exists replaces that offer.
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    security(("admin_secret" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Offer saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let offer = NewOffer::try_from(json.into_inner()).or_400("invalid offer")?;

    let offer = state
        .app
        .offers
        .create_offer(offer)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/admin/offers/{}", urlencoding::encode(offer.code.as_str())),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(offer.into()))
}
