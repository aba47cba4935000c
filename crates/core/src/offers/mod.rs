//! Offers
//!
//! Coupon offer records, their legacy-shape migration, resolution against a
//! plan and the discount they grant.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod discount;
mod migration;
mod resolution;

pub use discount::{DiscountResult, apply};
pub use migration::{MigrationError, OfferRecord};
pub use resolution::{NoMatch, OfferQuery, ResolutionPolicy, resolve};

/// Normalized (trimmed, upper-cased) coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OfferCode(String);

impl OfferCode {
    /// Normalize a raw code. Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_uppercase()))
    }

    /// The normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an offer's `amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// `amount` percent of the total.
    Percent,

    /// `amount` currency units off the total.
    Fixed,
}

impl FromStr for DiscountType {
    type Err = MigrationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PERCENT" => Ok(Self::Percent),
            "FIXED" => Ok(Self::Fixed),
            _ => Err(MigrationError::UnknownDiscountType(value.to_string())),
        }
    }
}

/// Offer applicability lists. An empty list is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicability {
    /// Eligible plan identifiers.
    #[serde(default)]
    pub plans: Vec<String>,

    /// Eligible billing cadences.
    #[serde(default)]
    pub billing_types: Vec<String>,

    /// Eligible buyer countries.
    #[serde(default)]
    pub countries: Vec<String>,
}

/// Offer validity window. Absent bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    /// Earliest instant the offer is valid.
    #[serde(default)]
    pub start: Option<Timestamp>,

    /// Latest instant the offer is valid.
    #[serde(default)]
    pub end: Option<Timestamp>,
}

impl Validity {
    /// Whether `now` falls within the window, bounds inclusive.
    #[must_use]
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start.is_none_or(|start| now >= start) && self.end.is_none_or(|end| now <= end)
    }
}

/// Canonical offer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OfferRecord")]
pub struct Offer {
    /// Unique normalized code.
    pub code: OfferCode,

    /// Amount interpretation.
    #[serde(rename = "type")]
    pub discount_type: DiscountType,

    /// Percent or fixed amount.
    pub amount: f64,

    /// Whether the offer may resolve.
    pub active: bool,

    /// Applicability lists.
    pub applies_to: Applicability,

    /// Maximum redemptions, if limited.
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far.
    pub used: u32,

    /// Validity window.
    pub validity: Validity,
}

impl Offer {
    /// Create a new offer, enforcing write-time invariants.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferValidationError`] when the code is blank, the
    /// amount is not a positive finite number or no plans are listed.
    pub fn new(new: NewOffer) -> Result<Self, OfferValidationError> {
        let code = OfferCode::parse(&new.code).ok_or(OfferValidationError::MissingCode)?;

        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(OfferValidationError::NonPositiveAmount);
        }

        // Plan ids are matched exactly against catalog ids.
        let plans: Vec<String> = new
            .applies_to
            .plans
            .iter()
            .map(|plan| plan.trim().to_uppercase())
            .filter(|plan| !plan.is_empty())
            .collect();

        if plans.is_empty() {
            return Err(OfferValidationError::NoPlans);
        }

        if let (Some(start), Some(end)) = (new.validity.start, new.validity.end)
            && start > end
        {
            return Err(OfferValidationError::InvertedValidity);
        }

        Ok(Self {
            code,
            discount_type: new.discount_type,
            amount: new.amount,
            active: new.active,
            applies_to: Applicability {
                plans,
                ..new.applies_to
            },
            usage_limit: new.usage_limit.filter(|limit| *limit > 0),
            used: 0,
            validity: new.validity,
        })
    }

    /// Whether the recorded usage has reached the usage limit.
    #[must_use]
    pub fn usage_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used >= limit)
    }
}

/// Data required to create an offer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    /// Raw coupon code.
    pub code: String,

    /// Amount interpretation.
    pub discount_type: DiscountType,

    /// Percent or fixed amount.
    pub amount: f64,

    /// Initial active flag.
    pub active: bool,

    /// Applicability lists.
    pub applies_to: Applicability,

    /// Maximum redemptions, if limited.
    pub usage_limit: Option<u32>,

    /// Validity window.
    pub validity: Validity,
}

/// Write-time offer validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferValidationError {
    /// Code is empty after trimming.
    #[error("offer code is required")]
    MissingCode,

    /// Amount is zero, negative or not finite.
    #[error("offer amount must be positive")]
    NonPositiveAmount,

    /// No plan identifiers were given.
    #[error("offer must apply to at least one plan")]
    NoPlans,

    /// Validity start is after its end.
    #[error("offer validity starts after it ends")]
    InvertedValidity,
}
