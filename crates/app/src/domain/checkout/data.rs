//! Checkout requests and results.

use tollgate::{
    catalog::{BillingCadence, EnterprisePackage, StarterProTier},
    contracts::ThankYouContract,
    pricing::PricingQuote,
};

/// Buyer details carried on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buyer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseCheckout {
    pub package: EnterprisePackage,
    pub billing: BillingCadence,
    pub coupon: Option<String>,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterProCheckout {
    pub tier: StarterProTier,
    pub billing: BillingCadence,
    pub coupon: Option<String>,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCheckout {
    pub plan_id: String,

    /// Positive override of the table price.
    pub custom_base: Option<u64>,

    pub coupon: Option<String>,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOffer {
    pub code: String,
    pub description: String,
}

/// Gateway order opened for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOrder {
    pub order_id: String,

    /// Amount charged, in minor units.
    pub amount: u64,

    pub currency: String,
    pub key_id: String,
    pub receipt: String,
    pub pricing: PricingQuote,
    pub discount: u64,
    pub final_amount: u64,
    pub offer: Option<AppliedOffer>,
}

/// Gateway checkout callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    pub redirect_url: String,
    pub contract: ThankYouContract,
}
