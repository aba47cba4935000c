//! Order notes.
//!
//! Checkout stores its full pricing snapshot on the gateway order so payment
//! verification can rebuild the purchase without any local state.

use std::str::FromStr;

use thiserror::Error;
use tollgate::{
    contracts::{ContractContext, ContractDisplay, ContractIds, PricingSnapshot, ThankYouContract},
    pricing::PricingQuote,
};

use crate::{domain::checkout::data::Buyer, gateway::OrderNotes};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotesError {
    #[error("order note {0} is missing")]
    Missing(&'static str),

    #[error("order note {0} is invalid")]
    Invalid(&'static str),
}

/// Checkout snapshot written to, and read back from, order notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutNotes {
    pub context: ContractContext,
    pub quote: PricingQuote,
    pub discount: u64,
    pub is_domestic: bool,
    pub coupon: Option<String>,
    pub offer_label: Option<String>,
    pub buyer: Buyer,
}

impl CheckoutNotes {
    /// Amount payable after the discount.
    #[must_use]
    pub fn final_amount(&self) -> u64 {
        self.quote.total.saturating_sub(self.discount)
    }

    #[must_use]
    pub fn into_map(self) -> OrderNotes {
        let mut notes = OrderNotes::new();
        let final_amount = self.final_amount();

        notes.insert("segment".to_string(), self.context.kind().to_string());

        match self.context {
            ContractContext::Enterprise { package, billing } => {
                notes.insert("package".to_string(), package);
                notes.insert("billing".to_string(), billing.to_string());
            }
            ContractContext::StarterPro { plan, billing } => {
                notes.insert("plan".to_string(), plan);
                notes.insert("billing".to_string(), billing.to_string());
            }
            ContractContext::OneTime { plan } => {
                notes.insert("plan".to_string(), plan);
            }
        }

        notes.insert("base".to_string(), self.quote.base.to_string());
        notes.insert("tax".to_string(), self.quote.tax.to_string());
        notes.insert("discount".to_string(), self.discount.to_string());
        notes.insert("final".to_string(), final_amount.to_string());
        notes.insert("domestic".to_string(), self.is_domestic.to_string());
        notes.insert("country".to_string(), self.buyer.country);

        let optional = [
            ("coupon", self.coupon),
            ("offer_label", self.offer_label),
            ("name", self.buyer.name),
            ("email", self.buyer.email),
            ("contact", self.buyer.contact),
        ];

        for (key, value) in optional {
            if let Some(value) = value {
                notes.insert(key.to_string(), value);
            }
        }

        notes
    }

    /// Read a snapshot back from order notes.
    ///
    /// # Errors
    ///
    /// Returns an error when a required note is missing or malformed, or the
    /// amounts are inconsistent.
    pub fn from_map(notes: &OrderNotes) -> Result<Self, NotesError> {
        let context = match required(notes, "segment")? {
            "enterprise" => ContractContext::Enterprise {
                package: required(notes, "package")?.to_string(),
                billing: parsed(notes, "billing")?,
            },
            "starter_pro" => ContractContext::StarterPro {
                plan: required(notes, "plan")?.to_string(),
                billing: parsed(notes, "billing")?,
            },
            "one_time" => ContractContext::OneTime {
                plan: required(notes, "plan")?.to_string(),
            },
            _ => return Err(NotesError::Invalid("segment")),
        };

        let base: u64 = parsed(notes, "base")?;
        let tax: u64 = parsed(notes, "tax")?;
        let discount: u64 = parsed(notes, "discount")?;
        let final_amount: u64 = parsed(notes, "final")?;

        let total = base.checked_add(tax).ok_or(NotesError::Invalid("tax"))?;

        if discount > total || total - discount != final_amount {
            return Err(NotesError::Invalid("final"));
        }

        let optional = |key: &str| notes.get(key).filter(|value| !value.is_empty()).cloned();

        Ok(Self {
            context,
            quote: PricingQuote { base, tax, total },
            discount,
            is_domestic: parsed(notes, "domestic")?,
            coupon: optional("coupon"),
            offer_label: optional("offer_label"),
            buyer: Buyer {
                name: optional("name"),
                email: optional("email"),
                contact: optional("contact"),
                country: optional("country").unwrap_or_default(),
            },
        })
    }

    #[must_use]
    pub fn into_contract(self, ids: ContractIds, currency: &str) -> ThankYouContract {
        let pricing = PricingSnapshot::new(self.quote, self.discount, currency, self.is_domestic);

        ThankYouContract::new(
            self.context,
            pricing,
            ids,
            ContractDisplay {
                coupon_code: self.coupon,
                offer_label: self.offer_label,
            },
        )
    }
}

fn required<'a>(notes: &'a OrderNotes, key: &'static str) -> Result<&'a str, NotesError> {
    notes
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(NotesError::Missing(key))
}

fn parsed<T: FromStr>(notes: &OrderNotes, key: &'static str) -> Result<T, NotesError> {
    required(notes, key)?
        .parse()
        .map_err(|_invalid| NotesError::Invalid(key))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tollgate::{catalog::BillingCadence, contracts::ContractKind};

    use super::*;

    fn enterprise_notes() -> CheckoutNotes {
        CheckoutNotes {
            context: ContractContext::Enterprise {
                package: "90".to_string(),
                billing: BillingCadence::Yearly,
            },
            quote: PricingQuote {
                base: 480_000,
                tax: 86_400,
                total: 566_400,
            },
            discount: 1_000,
            is_domestic: true,
            coupon: Some("SAVE10".to_string()),
            offer_label: Some("₹1000 off via SAVE10".to_string()),
            buyer: Buyer {
                name: Some("Asha".to_string()),
                email: Some("asha@example.com".to_string()),
                contact: None,
                country: "India".to_string(),
            },
        }
    }

    #[test]
    fn notes_capture_the_full_snapshot() -> TestResult {
        let notes = enterprise_notes().into_map();

        assert_eq!(notes.get("segment").map(String::as_str), Some("enterprise"));
        assert_eq!(notes.get("billing").map(String::as_str), Some("yearly"));
        assert_eq!(notes.get("final").map(String::as_str), Some("565400"));
        assert!(!notes.contains_key("contact"));
        assert!(notes.len() <= 15, "gateway accepts at most 15 notes");

        assert_eq!(CheckoutNotes::from_map(&notes)?, enterprise_notes());

        Ok(())
    }

    #[test]
    fn notes_become_a_contract() -> TestResult {
        let contract = CheckoutNotes::from_map(&enterprise_notes().into_map())?.into_contract(
            ContractIds {
                order_id: "order_1".to_string(),
                payment_id: "pay_1".to_string(),
            },
            "INR",
        );

        assert_eq!(contract.kind(), ContractKind::Enterprise);
        assert_eq!(contract.pricing().final_amount, 565_400);
        assert_eq!(contract.display().coupon_code.as_deref(), Some("SAVE10"));

        Ok(())
    }

    #[test]
    fn one_time_notes_omit_billing() -> TestResult {
        let notes = CheckoutNotes {
            context: ContractContext::OneTime {
                plan: "PLAN_60".to_string(),
            },
            quote: PricingQuote {
                base: 40_000,
                tax: 7_200,
                total: 47_200,
            },
            discount: 0,
            coupon: None,
            offer_label: None,
            ..enterprise_notes()
        };

        let map = notes.clone().into_map();

        assert!(!map.contains_key("billing"));
        assert_eq!(CheckoutNotes::from_map(&map)?, notes);

        Ok(())
    }

    #[test]
    fn foreign_or_tampered_notes_are_rejected() {
        let mut notes = enterprise_notes().into_map();

        notes.insert("final".to_string(), "1".to_string());

        assert_eq!(CheckoutNotes::from_map(&notes), Err(NotesError::Invalid("final")));

        notes.remove("segment");

        assert_eq!(CheckoutNotes::from_map(&notes), Err(NotesError::Missing("segment")));
        assert_eq!(
            CheckoutNotes::from_map(&OrderNotes::new()),
            Err(NotesError::Missing("segment"))
        );
    }
}
