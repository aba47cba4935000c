//! Thank-you contracts
//!
//! An immutable summary of a verified purchase, redeemable through a signed,
//! time-boxed capability URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{catalog::BillingCadence, pricing::PricingQuote};

mod signing;

pub use signing::{
    ContractVerificationError, RedemptionParams, SIGNATURE_VERSION, SigningError, SigningKey,
    VerifiedRedemption, canonical_input, parse_timestamp, sign, signatures_match, verify_params,
};

/// Current contract format version.
pub const CONTRACT_VERSION: &str = "v1";

/// Checkout segment a contract was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    /// Enterprise package.
    Enterprise,

    /// Starter/Pro subscription.
    StarterPro,

    /// Generic one-time plan.
    OneTime,
}

impl ContractKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::StarterPro => "starter_pro",
            Self::OneTime => "one_time",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segment-specific contract fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractContext {
    /// Enterprise package and cadence.
    Enterprise {
        /// Package identifier.
        package: String,

        /// Billing cadence.
        billing: BillingCadence,
    },

    /// Starter/Pro plan and cadence.
    StarterPro {
        /// Plan identifier.
        plan: String,

        /// Billing cadence.
        billing: BillingCadence,
    },

    /// One-time plan.
    OneTime {
        /// Plan identifier.
        plan: String,
    },
}

impl ContractContext {
    /// Kind matching this context.
    #[must_use]
    pub const fn kind(&self) -> ContractKind {
        match self {
            Self::Enterprise { .. } => ContractKind::Enterprise,
            Self::StarterPro { .. } => ContractKind::StarterPro,
            Self::OneTime { .. } => ContractKind::OneTime,
        }
    }
}

/// Pricing snapshot taken when the payment was verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    /// Pre-tax amount.
    pub base: u64,

    /// Tax charged.
    pub tax: u64,

    /// Discount granted.
    pub discount: u64,

    /// Amount paid.
    #[serde(rename = "final")]
    pub final_amount: u64,

    /// ISO currency code.
    pub currency: String,

    /// Whether domestic tax applied.
    pub is_domestic: bool,
}

impl PricingSnapshot {
    /// Snapshot a quote and the discount applied to it.
    #[must_use]
    pub fn new(quote: PricingQuote, discount: u64, currency: &str, is_domestic: bool) -> Self {
        Self {
            base: quote.base,
            tax: quote.tax,
            discount,
            final_amount: quote.total.saturating_sub(discount),
            currency: currency.to_string(),
            is_domestic,
        }
    }
}

/// Gateway identifiers of the purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractIds {
    /// Gateway order id.
    pub order_id: String,

    /// Gateway payment id.
    pub payment_id: String,
}

/// Display-only fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDisplay {
    /// Coupon code that was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,

    /// Human-readable offer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_label: Option<String>,
}

/// Thank-you contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThankYouContract {
    version: String,
    kind: ContractKind,
    context: ContractContext,
    pricing: PricingSnapshot,
    ids: ContractIds,
    display: ContractDisplay,
}

impl ThankYouContract {
    /// Build a contract; the kind always follows the context.
    #[must_use]
    pub fn new(
        context: ContractContext,
        pricing: PricingSnapshot,
        ids: ContractIds,
        display: ContractDisplay,
    ) -> Self {
        Self {
            version: CONTRACT_VERSION.to_string(),
            kind: context.kind(),
            context,
            pricing,
            ids,
            display,
        }
    }

    /// Format version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Checkout segment.
    #[must_use]
    pub const fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Segment-specific fields.
    #[must_use]
    pub const fn context(&self) -> &ContractContext {
        &self.context
    }

    /// Pricing snapshot.
    #[must_use]
    pub const fn pricing(&self) -> &PricingSnapshot {
        &self.pricing
    }

    /// Gateway identifiers.
    #[must_use]
    pub const fn ids(&self) -> &ContractIds {
        &self.ids
    }

    /// Display fields.
    #[must_use]
    pub const fn display(&self) -> &ContractDisplay {
        &self.display
    }
}
