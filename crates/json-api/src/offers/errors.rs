//! Offer Errors

use salvo::http::StatusError;
use tracing::error;

use tollgate_app::domain::offers::OffersServiceError;

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found"),
        OffersServiceError::MissingCode => {
            StatusError::bad_request().brief("Offer code is required")
        }
        OffersServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        OffersServiceError::Store(source) => {
            error!("offer store failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
