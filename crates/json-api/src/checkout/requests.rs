//! Checkout Requests
//!
//! Typed request bodies, one per checkout segment, parsed into the
//! checkout service's inputs before anything is priced.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tollgate::{
    catalog::{BillingCadence, EnterprisePackage, StarterProTier},
    pricing::PricingError,
};
use tollgate_app::domain::checkout::data::{
    Buyer, EnterpriseCheckout, OneTimeCheckout, PaymentVerification, StarterProCheckout,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CheckoutRequestError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("country is required")]
    MissingCountry,

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Buyer contact details
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct BuyerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,

    /// Buyer country; tax applies only to the domestic country
    pub country: String,
}

impl TryFrom<BuyerRequest> for Buyer {
    type Error = CheckoutRequestError;

    fn try_from(request: BuyerRequest) -> Result<Self, Self::Error> {
        let country = request.country.trim();

        if country.is_empty() {
            return Err(CheckoutRequestError::MissingCountry);
        }

        Ok(Buyer {
            name: filled(request.name),
            email: filled(request.email),
            contact: filled(request.contact),
            country: country.to_string(),
        })
    }
}

/// Enterprise Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnterpriseCheckoutRequest {
    /// `60`, `90`, `120` or `consultation`
    pub package: String,

    /// `monthly` or `yearly`; ignored for consultations
    #[serde(default = "monthly")]
    pub billing: String,

    pub coupon: Option<String>,

    pub buyer: BuyerRequest,
}

impl TryFrom<EnterpriseCheckoutRequest> for EnterpriseCheckout {
    type Error = CheckoutRequestError;

    fn try_from(request: EnterpriseCheckoutRequest) -> Result<Self, Self::Error> {
        Ok(EnterpriseCheckout {
            package: request.package.parse::<EnterprisePackage>()?,
            billing: BillingCadence::requested(&request.billing),
            coupon: request.coupon,
            buyer: request.buyer.try_into()?,
        })
    }
}

/// Starter/Pro Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StarterProCheckoutRequest {
    /// `STARTER` or `PRO`
    pub plan: String,

    /// `monthly` or `yearly`
    #[serde(default = "monthly")]
    pub billing: String,

    pub coupon: Option<String>,

    pub buyer: BuyerRequest,
}

impl TryFrom<StarterProCheckoutRequest> for StarterProCheckout {
    type Error = CheckoutRequestError;

    fn try_from(request: StarterProCheckoutRequest) -> Result<Self, Self::Error> {
        Ok(StarterProCheckout {
            tier: request.plan.parse::<StarterProTier>()?,
            billing: BillingCadence::requested(&request.billing),
            coupon: request.coupon,
            buyer: request.buyer.try_into()?,
        })
    }
}

/// One-Time Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OneTimeCheckoutRequest {
    /// One-time plan identifier, e.g. `PLAN_60`
    pub plan_id: String,

    /// Positive override of the table price
    pub custom_base: Option<u64>,

    pub coupon: Option<String>,

    pub buyer: BuyerRequest,
}

impl TryFrom<OneTimeCheckoutRequest> for OneTimeCheckout {
    type Error = CheckoutRequestError;

    fn try_from(request: OneTimeCheckoutRequest) -> Result<Self, Self::Error> {
        let plan_id = request.plan_id.trim();

        if plan_id.is_empty() {
            return Err(CheckoutRequestError::MissingField("plan_id"));
        }

        Ok(OneTimeCheckout {
            plan_id: plan_id.to_string(),
            custom_base: request.custom_base,
            coupon: request.coupon,
            buyer: request.buyer.try_into()?,
        })
    }
}

/// Payment Verification Request
///
/// Accepts the gateway's callback field names as aliases.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_order_id")]
    pub order_id: String,

    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,

    #[serde(alias = "razorpay_signature")]
    pub signature: String,
}

impl TryFrom<VerifyPaymentRequest> for PaymentVerification {
    type Error = CheckoutRequestError;

    fn try_from(request: VerifyPaymentRequest) -> Result<Self, Self::Error> {
        let required = |value: String, field: &'static str| {
            let value = value.trim().to_string();

            if value.is_empty() {
                Err(CheckoutRequestError::MissingField(field))
            } else {
                Ok(value)
            }
        };

        Ok(PaymentVerification {
            order_id: required(request.order_id, "order_id")?,
            payment_id: required(request.payment_id, "payment_id")?,
            signature: required(request.signature, "signature")?,
        })
    }
}

fn monthly() -> String {
    BillingCadence::Monthly.to_string()
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
