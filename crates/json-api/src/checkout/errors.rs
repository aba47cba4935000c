//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use tollgate_app::domain::{checkout::CheckoutServiceError, contracts::ContractsServiceError};

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::Pricing(source) => StatusError::bad_request().brief(source.to_string()),
        CheckoutServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Order amount is out of range")
        }
        CheckoutServiceError::Gateway(source) => {
            error!("payment gateway request failed: {source}");

            StatusError::bad_gateway().brief("Payment gateway unavailable")
        }
        CheckoutServiceError::InvalidSignature => {
            StatusError::bad_request().brief("Invalid payment signature")
        }
        CheckoutServiceError::PaymentMismatch => {
            StatusError::bad_request().brief("Payment does not belong to this order")
        }
        CheckoutServiceError::PaymentIncomplete(status) => {
            StatusError::bad_request().brief(format!("Payment is {status}"))
        }
        CheckoutServiceError::InvalidNotes(source) => {
            error!("order notes are unusable: {source}");

            StatusError::bad_request().brief("Order was not created by this checkout")
        }
        CheckoutServiceError::Contracts(ContractsServiceError::Misconfigured) => {
            error!("contract signing secret is not configured");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Contracts(source) => {
            error!("failed to issue contract: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use tollgate::pricing::PricingError;
    use tollgate_app::gateway::GatewayError;

    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (
                CheckoutServiceError::Pricing(PricingError::InvalidPackage("75".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                CheckoutServiceError::Gateway(GatewayError::UnexpectedResponse(
                    "order creation failed with status 500".to_string(),
                )),
                StatusCode::BAD_GATEWAY,
            ),
            (CheckoutServiceError::InvalidSignature, StatusCode::BAD_REQUEST),
            (
                CheckoutServiceError::Contracts(ContractsServiceError::Misconfigured),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(into_status_error(error).code, status);
        }
    }
}
