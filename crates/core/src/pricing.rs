//! Pricing Calculator
//!
//! Derives base, tax and total amounts per plan segment and billing cadence.
//! Amounts are whole currency units; every rounding step rounds half away from
//! zero, and tax is always computed from the base.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, BillingCadence, EnterprisePackage, StarterProTier};

/// Country whose buyers pay domestic tax.
pub const DOMESTIC_COUNTRY: &str = "India";

/// Domestic tax rate, in percent.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Months charged by a yearly cadence.
pub const MONTHS_PER_YEAR: i64 = 12;

/// Discount granted on yearly cadences, in percent.
pub const YEARLY_DISCOUNT_PERCENT: i64 = 20;

/// Errors raised while pricing a plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Enterprise package is not one of `60`, `90`, `120`, `consultation`.
    #[error("invalid package: {0}")]
    InvalidPackage(String),

    /// Plan identifier is not priced by this calculator.
    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    /// Billing cadence could not be parsed.
    #[error("invalid billing cadence: {0}")]
    InvalidCadence(String),

    /// An intermediate amount did not fit in the amount type.
    #[error("amount overflowed")]
    Overflow,
}

/// Priced amounts for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingQuote {
    /// Pre-tax amount.
    pub base: u64,

    /// Tax charged on `base`.
    pub tax: u64,

    /// `base + tax`.
    pub total: u64,
}

impl PricingQuote {
    fn from_base(base: u64, taxed: bool) -> Result<Self, PricingError> {
        let tax = if taxed { tax_on(base)? } else { 0 };
        let total = base.checked_add(tax).ok_or(PricingError::Overflow)?;

        Ok(Self { base, tax, total })
    }
}

/// Whether `country` is the domestic country (case-insensitive).
#[must_use]
pub fn is_domestic(country: &str) -> bool {
    country.trim().eq_ignore_ascii_case(DOMESTIC_COUNTRY)
}

/// Price a one-time plan.
///
/// A positive `custom_base` replaces the table price. One-time plans are
/// always taxed.
///
/// # Errors
///
/// - [`PricingError::UnknownPlan`]: no override was given and the plan has no table price.
/// - [`PricingError::Overflow`]: the taxed total does not fit.
pub fn price_one_time(plan_id: &str, custom_base: Option<u64>) -> Result<PricingQuote, PricingError> {
    let base = match custom_base.filter(|base| *base > 0) {
        Some(base) => base,
        None => catalog::one_time_base(plan_id)
            .ok_or_else(|| PricingError::UnknownPlan(plan_id.to_string()))?,
    };

    PricingQuote::from_base(base, true)
}

/// Price an enterprise package.
///
/// Consultations are always a one-time fee. Other packages charge
/// `12 × monthly × 0.8` on a yearly cadence and the monthly base otherwise.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the yearly base or taxed total does not fit.
pub fn price_enterprise(
    package: EnterprisePackage,
    cadence: BillingCadence,
    country: &str,
) -> Result<PricingQuote, PricingError> {
    let monthly = package.monthly_base();

    let base = if package.is_consultation() {
        monthly
    } else {
        cadence_base(monthly, cadence)?
    };

    PricingQuote::from_base(base, is_domestic(country))
}

/// Price a starter/pro subscription.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the yearly base or taxed total does not fit.
pub fn price_starter_pro(
    tier: StarterProTier,
    cadence: BillingCadence,
    country: &str,
) -> Result<PricingQuote, PricingError> {
    let base = cadence_base(tier.monthly_base(), cadence)?;

    PricingQuote::from_base(base, is_domestic(country))
}

/// Base amount charged for a cadence given the monthly base.
fn cadence_base(monthly: u64, cadence: BillingCadence) -> Result<u64, PricingError> {
    match cadence {
        BillingCadence::Yearly => {
            let keep = Decimal::new(100 - YEARLY_DISCOUNT_PERCENT, 2);

            let yearly = Decimal::from(monthly)
                .checked_mul(Decimal::from(MONTHS_PER_YEAR))
                .and_then(|amount| amount.checked_mul(keep))
                .ok_or(PricingError::Overflow)?;

            round_half_up(yearly)
        }
        BillingCadence::Monthly | BillingCadence::OneTime => Ok(monthly),
    }
}

/// Domestic tax on a base amount.
fn tax_on(base: u64) -> Result<u64, PricingError> {
    let tax = Decimal::from(base)
        .checked_mul(Decimal::new(TAX_RATE_PERCENT, 2))
        .ok_or(PricingError::Overflow)?;

    round_half_up(tax)
}

fn round_half_up(amount: Decimal) -> Result<u64, PricingError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}
