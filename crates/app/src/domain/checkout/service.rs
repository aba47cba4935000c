//! Checkout Service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tollgate::{
    catalog::{BillingCadence, CURRENCY},
    contracts::{ContractContext, ContractIds},
    offers::{self, DiscountResult},
    pricing::{self, PricingQuote},
};
use tracing::{Span, error, info};
use uuid::Uuid;

use crate::{
    domain::{
        checkout::{
            CheckoutServiceError,
            data::{
                AppliedOffer, Buyer, CheckoutOrder, EnterpriseCheckout, OneTimeCheckout,
                PaymentVerification, StarterProCheckout, VerifiedPayment,
            },
            notes::CheckoutNotes,
        },
        contracts::ContractsService,
        offers::{OfferLookup, OffersService},
    },
    gateway::{NewOrder, PaymentGateway},
    webhooks::{PAYMENT_VERIFIED, PaymentEvent, WebhookNotifier},
};

/// Minor units per currency unit.
const MINOR_UNITS: u64 = 100;

/// Priced checkout awaiting an offer and an order.
struct OrderDraft {
    context: ContractContext,
    plan_id: String,
    billing: Option<BillingCadence>,
    quote: PricingQuote,
    is_domestic: bool,
    coupon: Option<String>,
    buyer: Buyer,
}

#[derive(Clone)]
pub struct GatewayCheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    offers: Arc<dyn OffersService>,
    contracts: Arc<dyn ContractsService>,
    webhooks: Arc<dyn WebhookNotifier>,
}

impl GatewayCheckoutService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        offers: Arc<dyn OffersService>,
        contracts: Arc<dyn ContractsService>,
        webhooks: Arc<dyn WebhookNotifier>,
    ) -> Self {
        Self {
            gateway,
            offers,
            contracts,
            webhooks,
        }
    }

    async fn place_order(&self, draft: OrderDraft) -> Result<CheckoutOrder, CheckoutServiceError> {
        let offer = self
            .offers
            .resolve(OfferLookup {
                plan_id: draft.plan_id.clone(),
                code: draft.coupon,
                billing: draft.billing,
                country: Some(draft.buyer.country.clone()),
            })
            .await;

        let discount = offer.as_ref().map_or_else(
            || DiscountResult::none(draft.quote.total),
            |offer| offers::apply(draft.quote.total, offer),
        );

        let applied = offer.map(|offer| AppliedOffer {
            code: offer.code.to_string(),
            description: discount.description.clone(),
        });

        let amount = discount
            .final_amount
            .checked_mul(MINOR_UNITS)
            .ok_or(CheckoutServiceError::AmountOverflow)?;

        let notes = CheckoutNotes {
            context: draft.context,
            quote: draft.quote,
            discount: discount.discount,
            is_domestic: draft.is_domestic,
            coupon: applied.as_ref().map(|applied| applied.code.clone()),
            offer_label: applied.as_ref().map(|applied| applied.description.clone()),
            buyer: draft.buyer,
        };

        let receipt = format!("rcpt_{}", Uuid::now_v7().simple());

        let order = self
            .gateway
            .create_order(NewOrder {
                amount,
                currency: CURRENCY.to_string(),
                receipt: receipt.clone(),
                notes: notes.into_map(),
            })
            .await?;

        let span = Span::current();

        span.record("order_id", tracing::field::display(&order.id));

        info!(
            plan_id = %draft.plan_id,
            amount,
            discount = discount.discount,
            coupon_applied = applied.is_some(),
            "created checkout order"
        );

        Ok(CheckoutOrder {
            order_id: order.id,
            amount,
            currency: order.currency,
            key_id: self.gateway.key_id(),
            receipt,
            pricing: draft.quote,
            discount: discount.discount,
            final_amount: discount.final_amount,
            offer: applied,
        })
    }
}

impl fmt::Debug for GatewayCheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCheckoutService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for GatewayCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout_enterprise",
        skip(self, checkout),
        fields(
            package = %checkout.package,
            billing = %checkout.billing,
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn checkout_enterprise(
        &self,
        checkout: EnterpriseCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError> {
        let quote =
            pricing::price_enterprise(checkout.package, checkout.billing, &checkout.buyer.country)?;

        let billing = if checkout.package.is_consultation() {
            BillingCadence::OneTime
        } else {
            checkout.billing
        };

        self.place_order(OrderDraft {
            context: ContractContext::Enterprise {
                package: checkout.package.as_str().to_string(),
                billing,
            },
            plan_id: checkout.package.plan_id().to_string(),
            billing: Some(billing),
            quote,
            is_domestic: pricing::is_domestic(&checkout.buyer.country),
            coupon: checkout.coupon,
            buyer: checkout.buyer,
        })
        .await
    }

    #[tracing::instrument(
        name = "checkout.service.checkout_starter_pro",
        skip(self, checkout),
        fields(
            plan_id = %checkout.tier,
            billing = %checkout.billing,
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn checkout_starter_pro(
        &self,
        checkout: StarterProCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError> {
        let quote =
            pricing::price_starter_pro(checkout.tier, checkout.billing, &checkout.buyer.country)?;

        self.place_order(OrderDraft {
            context: ContractContext::StarterPro {
                plan: checkout.tier.plan_id().to_string(),
                billing: checkout.billing,
            },
            plan_id: checkout.tier.plan_id().to_string(),
            billing: Some(checkout.billing),
            quote,
            is_domestic: pricing::is_domestic(&checkout.buyer.country),
            coupon: checkout.coupon,
            buyer: checkout.buyer,
        })
        .await
    }

    #[tracing::instrument(
        name = "checkout.service.checkout_one_time",
        skip(self, checkout),
        fields(
            plan_id = %checkout.plan_id,
            custom_base = checkout.custom_base.is_some(),
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn checkout_one_time(
        &self,
        checkout: OneTimeCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError> {
        let quote = pricing::price_one_time(&checkout.plan_id, checkout.custom_base)?;

        // One-time plans are always taxed as domestic.
        self.place_order(OrderDraft {
            context: ContractContext::OneTime {
                plan: checkout.plan_id.clone(),
            },
            plan_id: checkout.plan_id,
            billing: Some(BillingCadence::OneTime),
            quote,
            is_domestic: true,
            coupon: checkout.coupon,
            buyer: checkout.buyer,
        })
        .await
    }

    #[tracing::instrument(
        name = "checkout.service.verify_payment",
        skip(self, verification),
        fields(order_id = %verification.order_id, payment_id = %verification.payment_id),
        err
    )]
    async fn verify_payment(
        &self,
        verification: PaymentVerification,
    ) -> Result<VerifiedPayment, CheckoutServiceError> {
        if !self.gateway.verify_callback(
            &verification.order_id,
            &verification.payment_id,
            &verification.signature,
        ) {
            return Err(CheckoutServiceError::InvalidSignature);
        }

        let order = self.gateway.fetch_order(&verification.order_id).await?;
        let payment = self.gateway.fetch_payment(&verification.payment_id).await?;

        if payment.order_id.as_deref() != Some(order.id.as_str()) {
            return Err(CheckoutServiceError::PaymentMismatch);
        }

        if !payment.is_successful() {
            return Err(CheckoutServiceError::PaymentIncomplete(payment.status));
        }

        let contract = CheckoutNotes::from_map(&order.notes)?.into_contract(
            ContractIds {
                order_id: order.id,
                payment_id: payment.id,
            },
            &order.currency,
        );

        let issued = self.contracts.issue(contract.clone()).await?;

        info!(kind = %contract.kind(), "verified payment");

        let event = PaymentEvent {
            event: PAYMENT_VERIFIED.to_string(),
            contract: contract.clone(),
            redirect_url: issued.redirect_url.clone(),
            email: payment.email,
            contact: payment.contact,
        };

        if let Err(err) = self.webhooks.notify(event).await {
            error!(error = %err, "failed to deliver payment webhook");
        }

        Ok(VerifiedPayment {
            redirect_url: issued.redirect_url,
            contract,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn checkout_enterprise(
        &self,
        checkout: EnterpriseCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError>;

    async fn checkout_starter_pro(
        &self,
        checkout: StarterProCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError>;

    async fn checkout_one_time(
        &self,
        checkout: OneTimeCheckout,
    ) -> Result<CheckoutOrder, CheckoutServiceError>;

    /// Verify a completed payment and issue its thank-you redirect.
    async fn verify_payment(
        &self,
        verification: PaymentVerification,
    ) -> Result<VerifiedPayment, CheckoutServiceError>;
}
