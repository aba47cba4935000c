//! App Router

use salvo::Router;

use crate::{admin, checkout, contracts, healthcheck, offers, payments, plans};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("plans").get(plans::handler))
        .push(
            Router::with_path("checkout")
                .push(Router::with_path("enterprise").post(checkout::enterprise::handler))
                .push(Router::with_path("starter-pro").post(checkout::starter_pro::handler))
                .push(Router::with_path("one-time").post(checkout::one_time::handler)),
        )
        .push(Router::with_path("payments/verify").post(payments::verify::handler))
        .push(Router::with_path("thank-you/contract").get(contracts::get::handler))
        .push(
            Router::with_path("admin/offers")
                .hoop(admin::middleware::handler)
                .get(offers::index::handler)
                .post(offers::create::handler)
                .push(
                    Router::with_path("{code}")
                        .delete(offers::delete::handler)
                        .push(Router::with_path("enable").post(offers::toggle::enable))
                        .push(Router::with_path("disable").post(offers::toggle::disable)),
                ),
        )
}
