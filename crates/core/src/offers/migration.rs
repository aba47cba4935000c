//! Offer record migration.
//!
//! Stored offers may carry older shapes: an `enabled` flag instead of
//! `active`, flat `plans`/`billingTypes`/`countries` arrays instead of
//! `appliesTo`, and `startAt`/`endAt` instead of `validity`. Every stored
//! record is upgraded here, once, into the canonical [`Offer`].

use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

use super::{Applicability, DiscountType, Offer, OfferCode, Validity};

/// Errors raised while upgrading a stored record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrationError {
    /// Record has a blank code.
    #[error("offer record has no code")]
    MissingCode,

    /// Record type is not `PERCENT` or `FIXED`.
    #[error("unknown discount type: {0}")]
    UnknownDiscountType(String),

    /// Record amount is not a finite number.
    #[error("offer amount is not a finite number")]
    InvalidAmount,
}

/// Stored offer record in any known shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    /// Raw code.
    pub code: String,

    /// Raw discount type.
    #[serde(rename = "type")]
    pub discount_type: String,

    /// Percent or fixed amount.
    pub amount: f64,

    /// Current active flag.
    #[serde(default)]
    pub active: Option<bool>,

    /// Legacy active flag.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Current structured applicability.
    #[serde(default)]
    pub applies_to: Option<Applicability>,

    /// Legacy flat plan list.
    #[serde(default)]
    pub plans: Option<Vec<String>>,

    /// Legacy flat billing-type list.
    #[serde(default)]
    pub billing_types: Option<Vec<String>>,

    /// Legacy flat country list.
    #[serde(default)]
    pub countries: Option<Vec<String>>,

    /// Maximum redemptions.
    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Redemptions so far.
    #[serde(default)]
    pub used: Option<u32>,

    /// Current validity window.
    #[serde(default)]
    pub validity: Option<Validity>,

    /// Legacy validity start.
    #[serde(default)]
    pub start_at: Option<Timestamp>,

    /// Legacy validity end.
    #[serde(default)]
    pub end_at: Option<Timestamp>,
}

impl TryFrom<OfferRecord> for Offer {
    type Error = MigrationError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        let code = OfferCode::parse(&record.code).ok_or(MigrationError::MissingCode)?;
        let discount_type = record.discount_type.parse::<DiscountType>()?;

        if !record.amount.is_finite() {
            return Err(MigrationError::InvalidAmount);
        }

        let active = record.active.or(record.enabled).unwrap_or(true);

        let applies_to = record.applies_to.unwrap_or_else(|| Applicability {
            plans: record.plans.unwrap_or_default(),
            billing_types: record.billing_types.unwrap_or_default(),
            countries: record.countries.unwrap_or_default(),
        });

        let validity = record.validity.unwrap_or(Validity {
            start: record.start_at,
            end: record.end_at,
        });

        Ok(Self {
            code,
            discount_type,
            amount: record.amount,
            active,
            applies_to,
            usage_limit: record.usage_limit,
            used: record.used.unwrap_or(0),
            validity,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn offer_from(value: serde_json::Value) -> Result<Offer, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn canonical_record_round_trips() -> TestResult {
        let value = json!({
            "code": "SAVE10",
            "type": "FIXED",
            "amount": 1000.0,
            "active": false,
            "appliesTo": { "plans": ["ENT_90"], "billingTypes": ["yearly"], "countries": ["India"] },
            "usageLimit": 10,
            "used": 3,
            "validity": { "start": "2026-01-01T00:00:00Z", "end": null }
        });

        let offer = offer_from(value.clone())?;

        assert!(!offer.active);
        assert_eq!(offer.applies_to.billing_types, vec!["yearly".to_string()]);
        assert_eq!(offer.used, 3);
        assert_eq!(serde_json::to_value(&offer)?, value);

        Ok(())
    }

    #[test]
    fn legacy_enabled_flag_is_used_when_active_is_absent() -> TestResult {
        let offer = offer_from(json!({
            "code": "old", "type": "percent", "amount": 5, "enabled": false
        }))?;

        assert!(!offer.active);
        assert_eq!(offer.code.as_str(), "OLD");
        assert_eq!(offer.discount_type, DiscountType::Percent);

        Ok(())
    }

    #[test]
    fn active_flag_wins_over_legacy_enabled() -> TestResult {
        let offer = offer_from(json!({
            "code": "X", "type": "FIXED", "amount": 5, "active": true, "enabled": false
        }))?;

        assert!(offer.active);

        Ok(())
    }

    #[test]
    fn missing_flags_default_to_active() -> TestResult {
        let offer = offer_from(json!({ "code": "X", "type": "FIXED", "amount": 5 }))?;

        assert!(offer.active);
        assert_eq!(offer.used, 0);
        assert_eq!(offer.applies_to, Applicability::default());
        assert_eq!(offer.validity, Validity::default());

        Ok(())
    }

    #[test]
    fn legacy_flat_lists_become_applicability() -> TestResult {
        let offer = offer_from(json!({
            "code": "X",
            "type": "FIXED",
            "amount": 5,
            "plans": ["PLAN_60"],
            "countries": ["India"]
        }))?;

        assert_eq!(offer.applies_to.plans, vec!["PLAN_60".to_string()]);
        assert!(offer.applies_to.billing_types.is_empty());
        assert_eq!(offer.applies_to.countries, vec!["India".to_string()]);

        Ok(())
    }

    #[test]
    fn legacy_start_and_end_become_validity() -> TestResult {
        let offer = offer_from(json!({
            "code": "X",
            "type": "FIXED",
            "amount": 5,
            "startAt": "2026-01-01T00:00:00Z",
            "endAt": "2026-02-01T00:00:00Z"
        }))?;

        assert_eq!(offer.validity.start, Some("2026-01-01T00:00:00Z".parse()?));
        assert_eq!(offer.validity.end, Some("2026-02-01T00:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn blank_code_is_rejected() {
        let record = OfferRecord {
            code: "  ".to_string(),
            discount_type: "FIXED".to_string(),
            amount: 5.0,
            ..OfferRecord::default()
        };

        assert_eq!(Offer::try_from(record), Err(MigrationError::MissingCode));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let record = OfferRecord {
            code: "X".to_string(),
            discount_type: "BOGO".to_string(),
            amount: 5.0,
            ..OfferRecord::default()
        };

        assert_eq!(
            Offer::try_from(record),
            Err(MigrationError::UnknownDiscountType("BOGO".to_string()))
        );
    }
}
