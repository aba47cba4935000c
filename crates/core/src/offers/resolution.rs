//! Offer Resolution
//!
//! Matches a coupon code against the offer set. A mismatch is an expected
//! outcome and is reported as [`NoMatch`], never as a fault.

use jiff::Timestamp;
use thiserror::Error;

use crate::catalog::BillingCadence;

use super::{Offer, OfferCode};

/// Reason a code did not resolve to an offer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NoMatch {
    /// No code was supplied.
    #[error("no coupon code supplied")]
    MissingCode,

    /// The offer set is empty.
    #[error("no offers configured")]
    NoOffers,

    /// No offer carries the code.
    #[error("unknown coupon code")]
    UnknownCode,

    /// The offer is disabled.
    #[error("offer is not active")]
    Inactive,

    /// The offer is outside its validity window.
    #[error("offer is outside its validity window")]
    OutsideValidity,

    /// The offer is restricted to other plans.
    #[error("offer does not apply to this plan")]
    PlanNotEligible,

    /// The offer is restricted to other billing cadences.
    #[error("offer does not apply to this billing cadence")]
    BillingNotEligible,

    /// The offer is restricted to other countries.
    #[error("offer does not apply to this country")]
    CountryNotEligible,
}

/// Which stored applicability lists are enforced.
///
/// Plan lists are always enforced. Billing-type and country lists are
/// informational unless switched on here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Enforce `appliesTo.billingTypes`.
    pub enforce_billing: bool,

    /// Enforce `appliesTo.countries`.
    pub enforce_country: bool,
}

/// What a buyer is trying to redeem a code against.
#[derive(Debug, Clone, Copy)]
pub struct OfferQuery<'a> {
    /// Catalog plan identifier.
    pub plan_id: &'a str,

    /// Raw coupon code.
    pub code: Option<&'a str>,

    /// Requested billing cadence.
    pub billing: Option<BillingCadence>,

    /// Buyer country.
    pub country: Option<&'a str>,
}

/// Resolve a coupon code to an offer.
///
/// Checks run in order and the first failure wins: code present, offers
/// present, code match (trimmed, case-insensitive), active flag, validity
/// window, plan applicability, then any applicability lists enabled by
/// `policy`.
///
/// # Errors
///
/// Returns the [`NoMatch`] reason when no offer applies.
pub fn resolve<'a>(
    offers: &'a [Offer],
    query: &OfferQuery<'_>,
    policy: ResolutionPolicy,
    now: Timestamp,
) -> Result<&'a Offer, NoMatch> {
    let code = query
        .code
        .and_then(OfferCode::parse)
        .ok_or(NoMatch::MissingCode)?;

    if offers.is_empty() {
        return Err(NoMatch::NoOffers);
    }

    let offer = offers
        .iter()
        .find(|offer| offer.code == code)
        .ok_or(NoMatch::UnknownCode)?;

    if !offer.active {
        return Err(NoMatch::Inactive);
    }

    if !offer.validity.contains(now) {
        return Err(NoMatch::OutsideValidity);
    }

    let plans = &offer.applies_to.plans;

    if !plans.is_empty() && !plans.iter().any(|plan| plan == query.plan_id) {
        return Err(NoMatch::PlanNotEligible);
    }

    if policy.enforce_billing && !billing_eligible(offer, query.billing) {
        return Err(NoMatch::BillingNotEligible);
    }

    if policy.enforce_country && !country_eligible(offer, query.country) {
        return Err(NoMatch::CountryNotEligible);
    }

    Ok(offer)
}

fn billing_eligible(offer: &Offer, billing: Option<BillingCadence>) -> bool {
    let allowed = &offer.applies_to.billing_types;

    if allowed.is_empty() {
        return true;
    }

    billing.is_some_and(|billing| {
        allowed
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(billing.as_str()))
    })
}

fn country_eligible(offer: &Offer, country: Option<&str>) -> bool {
    let allowed = &offer.applies_to.countries;

    if allowed.is_empty() {
        return true;
    }

    country.is_some_and(|country| {
        allowed
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(country.trim()))
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::offers::{Applicability, DiscountType, Validity};

    use super::*;

    fn offer(code: &str, plans: &[&str]) -> Offer {
        Offer {
            code: OfferCode(code.to_string()),
            discount_type: DiscountType::Fixed,
            amount: 1_000.0,
            active: true,
            applies_to: Applicability {
                plans: plans.iter().map(ToString::to_string).collect(),
                billing_types: vec!["yearly".to_string()],
                countries: vec!["India".to_string()],
            },
            usage_limit: None,
            used: 0,
            validity: Validity::default(),
        }
    }

    fn query<'a>(plan_id: &'a str, code: Option<&'a str>) -> OfferQuery<'a> {
        OfferQuery {
            plan_id,
            code,
            billing: Some(BillingCadence::Monthly),
            country: Some("Germany"),
        }
    }

    fn now() -> Timestamp {
        Timestamp::UNIX_EPOCH
    }

    #[test]
    fn matches_trimmed_code_case_insensitively() -> TestResult {
        let offers = [offer("OTHER", &[]), offer("SAVE10", &["ENT_90"])];

        let matched = resolve(
            &offers,
            &query("ENT_90", Some("  save10 ")),
            ResolutionPolicy::default(),
            now(),
        )?;

        assert_eq!(matched.code.as_str(), "SAVE10");

        Ok(())
    }

    #[test]
    fn missing_or_blank_code_never_matches() {
        let offers = [offer("SAVE10", &[])];

        for code in [None, Some(""), Some("   ")] {
            assert_eq!(
                resolve(&offers, &query("ENT_90", code), ResolutionPolicy::default(), now()),
                Err(NoMatch::MissingCode),
                "code {code:?}"
            );
        }
    }

    #[test]
    fn empty_offer_set_never_matches() {
        assert_eq!(
            resolve(&[], &query("ENT_90", Some("SAVE10")), ResolutionPolicy::default(), now()),
            Err(NoMatch::NoOffers)
        );
    }

    #[test]
    fn unknown_code_never_matches() {
        let offers = [offer("SAVE10", &[])];

        assert_eq!(
            resolve(&offers, &query("ENT_90", Some("SAVE20")), ResolutionPolicy::default(), now()),
            Err(NoMatch::UnknownCode)
        );
    }

    #[test]
    fn inactive_offer_never_matches() {
        let mut inactive = offer("SAVE10", &[]);
        inactive.active = false;

        assert_eq!(
            resolve(
                &[inactive],
                &query("ENT_90", Some("SAVE10")),
                ResolutionPolicy::default(),
                now()
            ),
            Err(NoMatch::Inactive)
        );
    }

    #[test]
    fn offer_outside_window_never_matches() -> TestResult {
        let mut future = offer("SAVE10", &[]);
        future.validity = Validity {
            start: Some("2030-01-01T00:00:00Z".parse()?),
            end: None,
        };

        let mut expired = offer("OLD", &[]);
        expired.validity = Validity {
            start: None,
            end: Some("1969-12-31T00:00:00Z".parse()?),
        };

        let offers = [future, expired];

        for code in ["SAVE10", "OLD"] {
            assert_eq!(
                resolve(&offers, &query("ENT_90", Some(code)), ResolutionPolicy::default(), now()),
                Err(NoMatch::OutsideValidity),
                "code {code}"
            );
        }

        Ok(())
    }

    #[test]
    fn disjoint_plan_set_never_matches() {
        let offers = [offer("SAVE10", &["ENT_60", "ENT_120"])];

        assert_eq!(
            resolve(&offers, &query("ENT_90", Some("SAVE10")), ResolutionPolicy::default(), now()),
            Err(NoMatch::PlanNotEligible)
        );
    }

    #[test]
    fn empty_plan_list_applies_to_every_plan() -> TestResult {
        let offers = [offer("ALL", &[])];

        resolve(&offers, &query("STARTER", Some("all")), ResolutionPolicy::default(), now())?;

        Ok(())
    }

    #[test]
    fn billing_and_country_lists_are_informational_by_default() -> TestResult {
        let offers = [offer("SAVE10", &["ENT_90"])];

        // Query is monthly from Germany; offer lists yearly/India only.
        resolve(&offers, &query("ENT_90", Some("SAVE10")), ResolutionPolicy::default(), now())?;

        Ok(())
    }

    #[test]
    fn billing_list_is_enforced_when_enabled() {
        let offers = [offer("SAVE10", &["ENT_90"])];

        let policy = ResolutionPolicy {
            enforce_billing: true,
            enforce_country: false,
        };

        assert_eq!(
            resolve(&offers, &query("ENT_90", Some("SAVE10")), policy, now()),
            Err(NoMatch::BillingNotEligible)
        );
    }

    #[test]
    fn country_list_is_enforced_when_enabled() -> TestResult {
        let offers = [offer("SAVE10", &["ENT_90"])];

        let policy = ResolutionPolicy {
            enforce_billing: false,
            enforce_country: true,
        };

        assert_eq!(
            resolve(&offers, &query("ENT_90", Some("SAVE10")), policy, now()),
            Err(NoMatch::CountryNotEligible)
        );

        let domestic = OfferQuery {
            country: Some("india"),
            ..query("ENT_90", Some("SAVE10"))
        };

        resolve(&offers, &domestic, policy, now())?;

        Ok(())
    }
}
