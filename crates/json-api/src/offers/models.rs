//! Offer request and response models.

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tollgate::offers::{Applicability, DiscountType, NewOffer, Offer, Validity};

#[derive(Debug, Error)]
pub(crate) enum OfferRequestError {
    #[error("invalid validity {0}: {1}")]
    InvalidTimestamp(&'static str, #[source] jiff::Error),
}

/// Discount kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum DiscountKind {
    /// Percent of the total
    Percent,

    /// Fixed currency amount
    Fixed,
}

impl From<DiscountKind> for DiscountType {
    fn from(kind: DiscountKind) -> Self {
        match kind {
            DiscountKind::Percent => DiscountType::Percent,
            DiscountKind::Fixed => DiscountType::Fixed,
        }
    }
}

impl From<DiscountType> for DiscountKind {
    fn from(kind: DiscountType) -> Self {
        match kind {
            DiscountType::Percent => DiscountKind::Percent,
            DiscountType::Fixed => DiscountKind::Fixed,
        }
    }
}

/// Offer applicability; empty lists are unrestricted
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicabilityModel {
    #[serde(default)]
    pub plans: Vec<String>,

    #[serde(default)]
    pub billing_types: Vec<String>,

    #[serde(default)]
    pub countries: Vec<String>,
}

impl From<ApplicabilityModel> for Applicability {
    fn from(model: ApplicabilityModel) -> Self {
        Applicability {
            plans: model.plans,
            billing_types: model.billing_types,
            countries: model.countries,
        }
    }
}

impl From<Applicability> for ApplicabilityModel {
    fn from(applicability: Applicability) -> Self {
        ApplicabilityModel {
            plans: applicability.plans,
            billing_types: applicability.billing_types,
            countries: applicability.countries,
        }
    }
}

/// Validity window as RFC 3339 instants; absent bounds are open
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidityModel {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TryFrom<ValidityModel> for Validity {
    type Error = OfferRequestError;

    fn try_from(model: ValidityModel) -> Result<Self, Self::Error> {
        let parse = |value: Option<String>, bound: &'static str| {
            value
                .filter(|value| !value.trim().is_empty())
                .map(|value| value.trim().parse::<Timestamp>())
                .transpose()
                .map_err(|source| OfferRequestError::InvalidTimestamp(bound, source))
        };

        Ok(Validity {
            start: parse(model.start, "start")?,
            end: parse(model.end, "end")?,
        })
    }
}

impl From<Validity> for ValidityModel {
    fn from(validity: Validity) -> Self {
        ValidityModel {
            start: validity.start.map(|start| start.to_string()),
            end: validity.end.map(|end| end.to_string()),
        }
    }
}

/// Create Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOfferRequest {
    /// Coupon code; stored upper-cased
    pub code: String,

    #[serde(rename = "type")]
    pub discount_type: DiscountKind,

    /// Percent or fixed amount, must be positive
    pub amount: f64,

    #[serde(default = "active_by_default")]
    pub active: bool,

    #[serde(default)]
    pub applies_to: ApplicabilityModel,

    pub usage_limit: Option<u32>,

    #[serde(default)]
    pub validity: ValidityModel,
}

impl TryFrom<CreateOfferRequest> for NewOffer {
    type Error = OfferRequestError;

    fn try_from(request: CreateOfferRequest) -> Result<Self, Self::Error> {
        Ok(NewOffer {
            code: request.code,
            discount_type: request.discount_type.into(),
            amount: request.amount,
            active: request.active,
            applies_to: request.applies_to.into(),
            usage_limit: request.usage_limit,
            validity: request.validity.try_into()?,
        })
    }
}

/// Offer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferResponse {
    pub code: String,

    #[serde(rename = "type")]
    pub discount_type: DiscountKind,

    pub amount: f64,
    pub active: bool,
    pub applies_to: ApplicabilityModel,
    pub usage_limit: Option<u32>,

    /// Recorded redemptions
    pub used: u32,

    pub validity: ValidityModel,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        OfferResponse {
            code: offer.code.to_string(),
            discount_type: offer.discount_type.into(),
            amount: offer.amount,
            active: offer.active,
            applies_to: offer.applies_to.into(),
            usage_limit: offer.usage_limit,
            used: offer.used,
            validity: offer.validity.into(),
        }
    }
}

/// Offers Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

fn active_by_default() -> bool {
    true
}
