//! One-Time Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tollgate_app::domain::checkout::data::OneTimeCheckout;

use crate::{
    checkout::{
        errors::into_status_error, requests::OneTimeCheckoutRequest, responses::CheckoutResponse,
    },
    extensions::*,
    observability::record_checkout,
};

/// One-Time Checkout Handler
///
/// One-time plans are always taxed.
#[endpoint(
    tags("checkout"),
    summary = "One-Time Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<OneTimeCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let checkout =
        OneTimeCheckout::try_from(json.into_inner()).or_400("invalid one-time checkout")?;

    let order = state.app.checkout.checkout_one_time(checkout).await;

    record_checkout("one_time", &order);

    let order = order.map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use tollgate::pricing::PricingError;
    use tollgate_app::domain::checkout::{CheckoutServiceError, MockCheckoutService};

    use crate::test_helpers::checkout_service;

    use super::{super::tests::make_order, *};

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("checkout/one-time").post(handler))
    }

    #[tokio::test]
    async fn test_one_time_checkout_returns_order() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout_one_time()
            .once()
            .withf(|request| request.plan_id == "PLAN_60" && request.custom_base.is_none())
            .return_once(|_| Ok(make_order(47_200, 0, None)));

        let mut res = TestClient::post("http://example.com/checkout/one-time")
            .json(&json!({ "plan_id": "PLAN_60", "buyer": { "country": "India" } }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(body.amount, 4_720_000);
        assert_eq!(body.pricing.final_amount, 47_200);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_plan_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout_one_time()
            .once()
            .return_once(|_| {
                Err(CheckoutServiceError::Pricing(PricingError::UnknownPlan(
                    "PLAN_NOPE".to_string(),
                )))
            });

        let res = TestClient::post("http://example.com/checkout/one-time")
            .json(&json!({ "plan_id": "PLAN_NOPE", "buyer": { "country": "India" } }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_country_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout_one_time().never();

        let res = TestClient::post("http://example.com/checkout/one-time")
            .json(&json!({ "plan_id": "PLAN_60", "buyer": { "country": "" } }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
