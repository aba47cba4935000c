//! Offers Service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tollgate::{
    catalog::BillingCadence,
    offers::{self, NewOffer, Offer, OfferCode, OfferQuery, ResolutionPolicy},
};
use tracing::{debug, error, info, warn};

use crate::{
    clock::Clock,
    domain::offers::{OffersServiceError, repository::OfferStore},
};

/// Coupon code redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferLookup {
    pub plan_id: String,
    pub code: Option<String>,
    pub billing: Option<BillingCadence>,
    pub country: Option<String>,
}

#[derive(Clone)]
pub struct StoreOffersService {
    store: Arc<dyn OfferStore>,
    policy: ResolutionPolicy,
    clock: Arc<dyn Clock>,
}

impl StoreOffersService {
    #[must_use]
    pub fn new(store: Arc<dyn OfferStore>, policy: ResolutionPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            policy,
            clock,
        }
    }
}

impl fmt::Debug for StoreOffersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOffersService")
            .field("policy", &self.policy)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

fn parse_code(code: &str) -> Result<OfferCode, OffersServiceError> {
    OfferCode::parse(code).ok_or(OffersServiceError::MissingCode)
}

#[async_trait]
impl OffersService for StoreOffersService {
    #[tracing::instrument(
        name = "offers.service.resolve",
        skip(self, lookup),
        fields(plan_id = %lookup.plan_id, has_code = lookup.code.is_some())
    )]
    async fn resolve(&self, lookup: OfferLookup) -> Option<Offer> {
        if lookup.code.as_deref().and_then(OfferCode::parse).is_none() {
            return None;
        }

        let offers = match self.store.list_offers().await {
            Ok(offers) => offers,
            Err(err) => {
                error!(error = %err, "failed to load offers; coupon not applied");
                return None;
            }
        };

        let query = OfferQuery {
            plan_id: &lookup.plan_id,
            code: lookup.code.as_deref(),
            billing: lookup.billing,
            country: lookup.country.as_deref(),
        };

        match offers::resolve(&offers, &query, self.policy, self.clock.now()) {
            Ok(offer) => {
                if offer.usage_exhausted() {
                    warn!(
                        code = %offer.code,
                        used = offer.used,
                        usage_limit = ?offer.usage_limit,
                        "offer usage limit reached"
                    );
                }

                Some(offer.clone())
            }
            Err(reason) => {
                debug!(reason = %reason, "coupon not applied");
                None
            }
        }
    }

    #[tracing::instrument(name = "offers.service.list_offers", skip(self), err)]
    async fn list_offers(&self) -> Result<Vec<Offer>, OffersServiceError> {
        Ok(self.store.list_offers().await?)
    }

    #[tracing::instrument(
        name = "offers.service.create_offer",
        skip(self, offer),
        fields(code = %offer.code.trim()),
        err
    )]
    async fn create_offer(&self, offer: NewOffer) -> Result<Offer, OffersServiceError> {
        let offer = Offer::new(offer)?;

        self.store.upsert_offer(offer.clone()).await?;

        info!(code = %offer.code, "saved offer");

        Ok(offer)
    }

    #[tracing::instrument(name = "offers.service.set_active", skip(self), err)]
    async fn set_active(&self, code: &str, active: bool) -> Result<Offer, OffersServiceError> {
        let code = parse_code(code)?;

        let offer = self
            .store
            .set_active(&code, active)
            .await?
            .ok_or(OffersServiceError::NotFound)?;

        info!(code = %offer.code, active, "updated offer");

        Ok(offer)
    }

    #[tracing::instrument(name = "offers.service.delete_offer", skip(self), err)]
    async fn delete_offer(&self, code: &str) -> Result<(), OffersServiceError> {
        let code = parse_code(code)?;

        if !self.store.delete_offer(&code).await? {
            return Err(OffersServiceError::NotFound);
        }

        info!(code = %code, "deleted offer");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Resolve a coupon code. A mismatch, or an unreadable store, is `None`.
    async fn resolve(&self, lookup: OfferLookup) -> Option<Offer>;

    async fn list_offers(&self) -> Result<Vec<Offer>, OffersServiceError>;

    /// Validates and saves an offer, replacing any offer with the same code.
    async fn create_offer(&self, offer: NewOffer) -> Result<Offer, OffersServiceError>;

    async fn set_active(&self, code: &str, active: bool) -> Result<Offer, OffersServiceError>;

    async fn delete_offer(&self, code: &str) -> Result<(), OffersServiceError>;
}
