//! Get Contract Handler

use salvo::{oapi::extract::QueryParam, prelude::*};
use tollgate_app::domain::contracts::ContractRedemption;

use crate::{
    contracts::errors::{ContractErrorBody, internal_error, into_contract_error},
    extensions::*,
    observability::record_contract_redemption,
};

/// Get Contract Handler
///
/// Redeems a signed thank-you link for the purchase summary it points at.
#[endpoint(
    tags("contracts"),
    summary = "Get Thank-You Contract",
    responses(
        (status_code = StatusCode::OK, description = "Contract"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid parameters", body = ContractErrorBody),
        (status_code = StatusCode::UNAUTHORIZED, description = "Expired or bad signature", body = ContractErrorBody),
        (status_code = StatusCode::NOT_FOUND, description = "Contract not found", body = ContractErrorBody),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Contract signing unavailable", body = ContractErrorBody),
    ),
)]
pub(crate) async fn handler(
    version: QueryParam<String, false>,
    order_id: QueryParam<String, false>,
    payment_id: QueryParam<String, false>,
    ts: QueryParam<String, false>,
    sig: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) {
    let Ok(state) = depot.state_or_500() else {
        let (status, body) = internal_error();

        res.status_code(status).render(Json(body));

        return;
    };

    let redemption = ContractRedemption {
        version: version.into_inner(),
        order_id: order_id.into_inner(),
        payment_id: payment_id.into_inner(),
        ts: ts.into_inner(),
        sig: sig.into_inner(),
    };

    match state.app.contracts.redeem(redemption).await {
        Ok(contract) => {
            record_contract_redemption("ok");

            res.render(Json(contract));
        }
        Err(error) => {
            let (status, body) = into_contract_error(error);

            record_contract_redemption(&body.error.code);

            res.status_code(status).render(Json(body));
        }
    }
}
