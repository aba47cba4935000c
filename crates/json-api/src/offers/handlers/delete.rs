//! Delete Offer Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, offers::errors::into_status_error};

/// Delete Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Delete Offer",
    security(("admin_secret" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Offer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .offers
        .delete_offer(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
