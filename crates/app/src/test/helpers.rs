//! Test Helpers

use tollgate::{
    catalog::BillingCadence,
    contracts::{ContractContext, ContractDisplay, ContractIds, PricingSnapshot, ThankYouContract},
    offers::{Applicability, DiscountType, Offer, OfferCode, Validity},
    pricing::PricingQuote,
};

/// Active fixed-amount offer applying to every plan.
pub(crate) fn offer(code: &str, amount: f64) -> Offer {
    Offer {
        code: OfferCode::parse(code).unwrap_or_else(|| panic!("invalid test code {code:?}")),
        discount_type: DiscountType::Fixed,
        amount,
        active: true,
        applies_to: Applicability::default(),
        usage_limit: None,
        used: 0,
        validity: Validity::default(),
    }
}

/// Active fixed-amount offer restricted to `plans`.
pub(crate) fn offer_for(code: &str, amount: f64, plans: &[&str]) -> Offer {
    Offer {
        applies_to: Applicability {
            plans: plans.iter().map(ToString::to_string).collect(),
            ..Applicability::default()
        },
        ..offer(code, amount)
    }
}

pub(crate) fn contract(order_id: &str, payment_id: &str) -> ThankYouContract {
    ThankYouContract::new(
        ContractContext::Enterprise {
            package: "90".to_string(),
            billing: BillingCadence::Yearly,
        },
        PricingSnapshot::new(
            PricingQuote {
                base: 480_000,
                tax: 86_400,
                total: 566_400,
            },
            1_000,
            "INR",
            true,
        ),
        ContractIds {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
        },
        ContractDisplay::default(),
    )
}
