//! Checkout Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use tollgate_app::domain::checkout::data::{AppliedOffer, CheckoutOrder, VerifiedPayment};

/// Pricing breakdown in whole currency units
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricingResponse {
    pub base: u64,
    pub tax: u64,
    pub total: u64,
    pub discount: u64,

    /// Amount payable
    #[serde(rename = "final")]
    pub final_amount: u64,
}

/// Coupon outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    pub code: String,
    pub description: String,
}

impl From<AppliedOffer> for OfferResponse {
    fn from(offer: AppliedOffer) -> Self {
        OfferResponse {
            code: offer.code,
            description: offer.description,
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// Gateway order identifier
    pub order_id: String,

    /// Amount charged in minor units
    pub amount: u64,

    pub currency: String,

    /// Public gateway key for the client checkout widget
    pub key_id: String,

    pub receipt: String,

    pub pricing: PricingResponse,

    pub offer_applied: bool,

    pub offer: Option<OfferResponse>,
}

impl From<CheckoutOrder> for CheckoutResponse {
    fn from(order: CheckoutOrder) -> Self {
        CheckoutResponse {
            order_id: order.order_id,
            amount: order.amount,
            currency: order.currency,
            key_id: order.key_id,
            receipt: order.receipt,
            pricing: PricingResponse {
                base: order.pricing.base,
                tax: order.pricing.tax,
                total: order.pricing.total,
                discount: order.discount,
                final_amount: order.final_amount,
            },
            offer_applied: order.offer.is_some(),
            offer: order.offer.map(Into::into),
        }
    }
}

/// Payment Verified Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentVerifiedResponse {
    /// Signed thank-you page URL
    pub redirect_url: String,

    /// Contract kind
    pub kind: String,

    pub order_id: String,
    pub payment_id: String,
}

impl From<VerifiedPayment> for PaymentVerifiedResponse {
    fn from(payment: VerifiedPayment) -> Self {
        let ids = payment.contract.ids();

        PaymentVerifiedResponse {
            kind: payment.contract.kind().to_string(),
            order_id: ids.order_id.clone(),
            payment_id: ids.payment_id.clone(),
            redirect_url: payment.redirect_url,
        }
    }
}
