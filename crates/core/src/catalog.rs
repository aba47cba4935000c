//! Plan Catalog
//!
//! Static plan configuration: identifiers, tiers, billing cadences and the
//! reference price tables used by the pricing calculator.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// ISO code of the single supported currency.
pub const CURRENCY: &str = "INR";

/// Display symbol of the single supported currency.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Plan kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Recurring plan billed per cadence.
    Subscription,

    /// Single up-front payment.
    OneTime,
}

/// Billing period classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCadence {
    /// Charged every month.
    Monthly,

    /// Charged once a year at the multi-month discount.
    Yearly,

    /// Charged once.
    OneTime,
}

impl BillingCadence {
    /// Wire name of the cadence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::OneTime => "one_time",
        }
    }

    /// Cadence a buyer asked for. Only `yearly` earns the multi-month
    /// discount, so anything unrecognised is charged as `monthly`.
    #[must_use]
    pub fn requested(value: &str) -> Self {
        value.parse().unwrap_or(Self::Monthly)
    }
}

impl fmt::Display for BillingCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCadence {
    type Err = PricingError;

    /// Parses a cadence; `subscription` is accepted as an alias of `monthly`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" | "subscription" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "one_time" => Ok(Self::OneTime),
            _ => Err(PricingError::InvalidCadence(value.to_string())),
        }
    }
}

/// Catalog plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Unique plan identifier.
    pub id: &'static str,

    /// Tier label.
    pub tier: &'static str,

    /// Plan kind.
    pub kind: PlanKind,

    /// Cadences this plan may be bought with.
    pub cadences: &'static [BillingCadence],

    /// Whether the plan is a consultation.
    pub consultation: bool,
}

const RECURRING: &[BillingCadence] = &[BillingCadence::Monthly, BillingCadence::Yearly];
const SINGLE: &[BillingCadence] = &[BillingCadence::OneTime];

static PLANS: [Plan; 9] = [
    Plan {
        id: "PLAN_60",
        tier: "60",
        kind: PlanKind::OneTime,
        cadences: SINGLE,
        consultation: false,
    },
    Plan {
        id: "PLAN_90",
        tier: "90",
        kind: PlanKind::OneTime,
        cadences: SINGLE,
        consultation: false,
    },
    Plan {
        id: "PLAN_120",
        tier: "120",
        kind: PlanKind::OneTime,
        cadences: SINGLE,
        consultation: false,
    },
    Plan {
        id: "ENT_60",
        tier: "60",
        kind: PlanKind::Subscription,
        cadences: RECURRING,
        consultation: false,
    },
    Plan {
        id: "ENT_90",
        tier: "90",
        kind: PlanKind::Subscription,
        cadences: RECURRING,
        consultation: false,
    },
    Plan {
        id: "ENT_120",
        tier: "120",
        kind: PlanKind::Subscription,
        cadences: RECURRING,
        consultation: false,
    },
    Plan {
        id: "ENT_CONSULTATION",
        tier: "consultation",
        kind: PlanKind::OneTime,
        cadences: SINGLE,
        consultation: true,
    },
    Plan {
        id: "STARTER",
        tier: "starter",
        kind: PlanKind::Subscription,
        cadences: RECURRING,
        consultation: false,
    },
    Plan {
        id: "PRO",
        tier: "pro",
        kind: PlanKind::Subscription,
        cadences: RECURRING,
        consultation: false,
    },
];

/// All catalog plans.
#[must_use]
pub fn plans() -> &'static [Plan] {
    &PLANS
}

/// Look up a plan by identifier.
#[must_use]
pub fn plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == id)
}

/// Base price of a one-time plan.
#[must_use]
pub fn one_time_base(plan_id: &str) -> Option<u64> {
    match plan_id {
        "PLAN_60" => Some(40_000),
        "PLAN_90" => Some(55_000),
        "PLAN_120" => Some(70_000),
        _ => None,
    }
}

/// Enterprise package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnterprisePackage {
    /// 60 package.
    P60,

    /// 90 package.
    P90,

    /// 120 package.
    P120,

    /// One-off consultation.
    Consultation,
}

impl EnterprisePackage {
    /// Package identifier as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P60 => "60",
            Self::P90 => "90",
            Self::P120 => "120",
            Self::Consultation => "consultation",
        }
    }

    /// Catalog plan id used for offer applicability.
    #[must_use]
    pub const fn plan_id(self) -> &'static str {
        match self {
            Self::P60 => "ENT_60",
            Self::P90 => "ENT_90",
            Self::P120 => "ENT_120",
            Self::Consultation => "ENT_CONSULTATION",
        }
    }

    /// Monthly (or, for consultations, one-off) base price.
    #[must_use]
    pub const fn monthly_base(self) -> u64 {
        match self {
            Self::P60 => 35_000,
            Self::P90 => 50_000,
            Self::P120 => 65_000,
            Self::Consultation => 5_000,
        }
    }

    /// Consultations are always billed once.
    #[must_use]
    pub const fn is_consultation(self) -> bool {
        matches!(self, Self::Consultation)
    }
}

impl fmt::Display for EnterprisePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnterprisePackage {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "60" => Ok(Self::P60),
            "90" => Ok(Self::P90),
            "120" => Ok(Self::P120),
            "consultation" => Ok(Self::Consultation),
            _ => Err(PricingError::InvalidPackage(value.to_string())),
        }
    }
}

/// Starter/Pro subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarterProTier {
    /// Starter tier.
    Starter,

    /// Pro tier.
    Pro,
}

impl StarterProTier {
    /// Catalog plan id.
    #[must_use]
    pub const fn plan_id(self) -> &'static str {
        match self {
            Self::Starter => "STARTER",
            Self::Pro => "PRO",
        }
    }

    /// Monthly base price.
    #[must_use]
    pub const fn monthly_base(self) -> u64 {
        match self {
            Self::Starter => 15_000,
            Self::Pro => 25_000,
        }
    }
}

impl fmt::Display for StarterProTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plan_id())
    }
}

impl FromStr for StarterProTier {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "STARTER" => Ok(Self::Starter),
            "PRO" => Ok(Self::Pro),
            _ => Err(PricingError::UnknownPlan(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        for (index, plan) in PLANS.iter().enumerate() {
            let duplicates = PLANS
                .iter()
                .skip(index + 1)
                .filter(|other| other.id == plan.id)
                .count();

            assert_eq!(duplicates, 0, "duplicate plan id {}", plan.id);
        }
    }

    #[test]
    fn every_package_and_tier_has_a_catalog_plan() {
        let packages = [
            EnterprisePackage::P60,
            EnterprisePackage::P90,
            EnterprisePackage::P120,
            EnterprisePackage::Consultation,
        ];

        for package in packages {
            assert!(plan(package.plan_id()).is_some(), "missing {package}");
        }

        for tier in [StarterProTier::Starter, StarterProTier::Pro] {
            assert!(plan(tier.plan_id()).is_some(), "missing {tier}");
        }
    }

    #[test]
    fn consultation_plan_is_flagged() {
        let consultation = plan("ENT_CONSULTATION").map(|plan| plan.consultation);

        assert_eq!(consultation, Some(true));
        assert_eq!(plan("ENT_90").map(|plan| plan.consultation), Some(false));
    }

    #[test]
    fn cadence_parsing_accepts_subscription_alias() -> TestResult {
        assert_eq!(" Monthly ".parse::<BillingCadence>()?, BillingCadence::Monthly);
        assert_eq!("subscription".parse::<BillingCadence>()?, BillingCadence::Monthly);
        assert_eq!("YEARLY".parse::<BillingCadence>()?, BillingCadence::Yearly);
        assert_eq!("one_time".parse::<BillingCadence>()?, BillingCadence::OneTime);

        assert!(matches!(
            "weekly".parse::<BillingCadence>(),
            Err(PricingError::InvalidCadence(_))
        ));

        Ok(())
    }

    #[test]
    fn requested_cadence_falls_back_to_monthly() {
        assert_eq!(BillingCadence::requested(" Yearly"), BillingCadence::Yearly);
        assert_eq!(BillingCadence::requested("one_time"), BillingCadence::OneTime);
        assert_eq!(BillingCadence::requested("quarterly"), BillingCadence::Monthly);
        assert_eq!(BillingCadence::requested(""), BillingCadence::Monthly);
    }

    #[test]
    fn unknown_package_is_invalid() {
        assert!(matches!(
            "75".parse::<EnterprisePackage>(),
            Err(PricingError::InvalidPackage(value)) if value == "75"
        ));
    }

    #[test]
    fn tier_parsing_is_case_insensitive() -> TestResult {
        assert_eq!("starter".parse::<StarterProTier>()?, StarterProTier::Starter);
        assert_eq!("PRO".parse::<StarterProTier>()?, StarterProTier::Pro);

        assert!("ENTERPRISE".parse::<StarterProTier>().is_err());

        Ok(())
    }

    #[test]
    fn one_time_table_only_covers_one_time_plans() {
        for plan in plans() {
            let priced = one_time_base(plan.id).is_some();
            let one_time_plan = plan.kind == PlanKind::OneTime && !plan.consultation;

            assert_eq!(priced, one_time_plan, "unexpected pricing for {}", plan.id);
        }
    }
}
