//! Enable and Disable Offer Handlers

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferResponse},
};

async fn set_active(
    depot: &mut Depot,
    code: &str,
    active: bool,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let offer = state
        .app
        .offers
        .set_active(code, active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(offer.into()))
}

/// Enable Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Enable Offer",
    security(("admin_secret" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer enabled"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn enable(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    set_active(depot, &code.into_inner(), true).await
}

/// Disable Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Disable Offer",
    security(("admin_secret" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer disabled"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn disable(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    set_active(depot, &code.into_inner(), false).await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use tollgate_app::domain::offers::{MockOffersService, OffersServiceError};

    use crate::test_helpers::offers_service;

    use super::{super::tests::make_offer, *};

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(
            offers,
            Router::with_path("admin/offers/{code}")
                .push(Router::with_path("enable").post(enable))
                .push(Router::with_path("disable").post(disable)),
        )
    }

    #[tokio::test]
    async fn test_enable_offer() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_set_active()
            .once()
            .withf(|code, active| code == "save10" && *active)
            .return_once(|_, _| Ok(make_offer("SAVE10", true)));

        let mut res = TestClient::post("http://example.com/admin/offers/save10/enable")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OfferResponse = res.take_json().await?;

        assert!(body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_disable_offer() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_set_active()
            .once()
            .withf(|code, active| code == "SAVE10" && !*active)
            .return_once(|_, _| Ok(make_offer("SAVE10", false)));

        let mut res = TestClient::post("http://example.com/admin/offers/SAVE10/disable")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OfferResponse = res.take_json().await?;

        assert!(!body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_unknown_offer_returns_404() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_set_active()
            .once()
            .return_once(|_, _| Err(OffersServiceError::NotFound));

        let res = TestClient::post("http://example.com/admin/offers/NOPE/enable")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
