//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use tollgate_app::{
    context::AppContext,
    domain::{
        checkout::MockCheckoutService, contracts::MockContractsService, offers::MockOffersService,
    },
};

use crate::{admin::middleware::ADMIN_SECRET_HEADER, state::State};

pub(crate) const TEST_ADMIN_SECRET: &str = "test-admin-secret";

fn strict_offers_mock() -> MockOffersService {
    let mut offers = MockOffersService::new();

    offers.expect_resolve().never();
    offers.expect_list_offers().never();
    offers.expect_create_offer().never();
    offers.expect_set_active().never();
    offers.expect_delete_offer().never();

    offers
}

fn strict_contracts_mock() -> MockContractsService {
    let mut contracts = MockContractsService::new();

    contracts.expect_issue().never();
    contracts.expect_redeem().never();

    contracts
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout_enterprise().never();
    checkout.expect_checkout_starter_pro().never();
    checkout.expect_checkout_one_time().never();
    checkout.expect_verify_payment().never();

    checkout
}

fn state_from(
    offers: MockOffersService,
    contracts: MockContractsService,
    checkout: MockCheckoutService,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            offers: Arc::new(offers),
            contracts: Arc::new(contracts),
            checkout: Arc::new(checkout),
        },
        TEST_ADMIN_SECRET,
    )
}

/// State whose services must never be called.
pub(crate) fn state() -> Arc<State> {
    state_from(
        strict_offers_mock(),
        strict_contracts_mock(),
        strict_checkout_mock(),
    )
}

pub(crate) fn offers_service(offers: MockOffersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(
                offers,
                strict_contracts_mock(),
                strict_checkout_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn contracts_service(contracts: MockContractsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(
                strict_offers_mock(),
                contracts,
                strict_checkout_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(
                strict_offers_mock(),
                strict_contracts_mock(),
                checkout,
            )))
            .push(route),
    )
}

/// Header pair authenticating an admin request.
pub(crate) fn admin_header() -> (&'static str, &'static str) {
    (ADMIN_SECRET_HEADER, TEST_ADMIN_SECRET)
}
