//! Offer Discounts

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};

use crate::catalog::CURRENCY_SYMBOL;

use super::{DiscountType, Offer};

/// Discount granted by an offer on a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Amount taken off, within `[0, total]`.
    pub discount: u64,

    /// `total - discount`.
    #[serde(rename = "final")]
    pub final_amount: u64,

    /// Human-readable description.
    pub description: String,
}

impl DiscountResult {
    /// Result for a total with no offer applied.
    #[must_use]
    pub fn none(total: u64) -> Self {
        Self {
            discount: 0,
            final_amount: total,
            description: String::new(),
        }
    }
}

/// Apply an offer to a total.
///
/// Percent offers take `round(total × amount / 100)`, fixed offers take
/// `round(amount)`; either is clamped to `[0, total]`.
#[must_use]
pub fn apply(total: u64, offer: &Offer) -> DiscountResult {
    let raw = match offer.discount_type {
        DiscountType::Percent => Decimal::from_f64_retain(offer.amount).and_then(|percent| {
            Decimal::from(total)
                .checked_mul(percent)
                .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
        }),
        DiscountType::Fixed => Decimal::from_f64_retain(offer.amount),
    };

    let discount = match raw {
        Some(raw) => clamp(raw, total),
        // Only amounts beyond the decimal range get here.
        None if offer.amount > 0.0 => total,
        None => 0,
    };

    DiscountResult {
        discount,
        final_amount: total - discount,
        description: describe(offer),
    }
}

fn clamp(raw: Decimal, total: u64) -> u64 {
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if rounded.is_sign_negative() {
        return 0;
    }

    rounded.to_u64().map_or(total, |discount| discount.min(total))
}

fn describe(offer: &Offer) -> String {
    match offer.discount_type {
        DiscountType::Percent => format!("{}% off via {}", offer.amount, offer.code),
        DiscountType::Fixed => format!("{CURRENCY_SYMBOL}{} off via {}", offer.amount, offer.code),
    }
}
