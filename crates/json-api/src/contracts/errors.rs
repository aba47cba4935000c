//! Contract retrieval errors.
//!
//! Retrieval failures carry a structured body rather than a plain status so
//! the confirmation page can tell a stale link from a not-yet-stored one.

use salvo::{http::StatusCode, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use tollgate::contracts::{CONTRACT_VERSION, ContractVerificationError};
use tollgate_app::domain::contracts::ContractsServiceError;
use tracing::error;

/// Contract error detail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContractErrorDetail {
    /// Machine-readable reason
    pub code: String,

    pub message: String,
}

/// Contract error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContractErrorBody {
    pub version: String,
    pub error: ContractErrorDetail,
}

impl ContractErrorBody {
    fn new(code: &str, message: &str) -> Self {
        ContractErrorBody {
            version: CONTRACT_VERSION.to_string(),
            error: ContractErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

pub(crate) fn internal_error() -> (StatusCode, ContractErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ContractErrorBody::new("internal", "Contract could not be loaded"),
    )
}

pub(crate) fn into_contract_error(error: ContractsServiceError) -> (StatusCode, ContractErrorBody) {
    let reason = match error {
        ContractsServiceError::Verification(reason) => reason,
        ContractsServiceError::Misconfigured => {
            error!("contract signing secret is not configured");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ContractErrorBody::new("misconfigured", "Contract signing is not configured"),
            );
        }
        ContractsServiceError::Store(source) => {
            error!("failed to load contract: {source}");

            return internal_error();
        }
    };

    let (status, message) = match reason {
        ContractVerificationError::MissingParams => (
            StatusCode::BAD_REQUEST,
            "Missing or unsupported contract parameters",
        ),
        ContractVerificationError::InvalidTimestamp => {
            (StatusCode::BAD_REQUEST, "Contract timestamp is invalid")
        }
        ContractVerificationError::Expired => (StatusCode::UNAUTHORIZED, "Contract link has expired"),
        ContractVerificationError::BadSignature => {
            (StatusCode::UNAUTHORIZED, "Contract signature is invalid")
        }
        ContractVerificationError::NotFound => (StatusCode::NOT_FOUND, "Contract not found"),
    };

    (status, ContractErrorBody::new(reason.code(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failures_map_to_distinct_statuses() {
        let cases = [
            (ContractVerificationError::MissingParams, StatusCode::BAD_REQUEST, "missing_params"),
            (ContractVerificationError::InvalidTimestamp, StatusCode::BAD_REQUEST, "invalid_timestamp"),
            (ContractVerificationError::Expired, StatusCode::UNAUTHORIZED, "expired"),
            (ContractVerificationError::BadSignature, StatusCode::UNAUTHORIZED, "bad_signature"),
            (ContractVerificationError::NotFound, StatusCode::NOT_FOUND, "not_found"),
        ];

        for (reason, expected_status, expected_code) in cases {
            let (status, body) = into_contract_error(reason.into());

            assert_eq!(status, expected_status, "{expected_code}");
            assert_eq!(body.error.code, expected_code);
            assert_eq!(body.version, "v1");
        }
    }

    #[test]
    fn misconfiguration_is_a_500() {
        let (status, body) = into_contract_error(ContractsServiceError::Misconfigured);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "misconfigured");
    }
}
