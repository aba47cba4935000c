//! Offer record stores.

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tollgate::offers::{Offer, OfferCode};

use crate::domain::offers::OfferStoreError;

#[automock]
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// All offers in canonical shape.
    async fn list_offers(&self) -> Result<Vec<Offer>, OfferStoreError>;

    /// Insert an offer, replacing any offer with the same code.
    async fn upsert_offer(&self, offer: Offer) -> Result<(), OfferStoreError>;

    /// Set the active flag. Returns the updated offer, or `None` when the code is unknown.
    async fn set_active(
        &self,
        code: &OfferCode,
        active: bool,
    ) -> Result<Option<Offer>, OfferStoreError>;

    /// Delete an offer. Returns whether it existed.
    async fn delete_offer(&self, code: &OfferCode) -> Result<bool, OfferStoreError>;
}

/// Replace or append `offer` by code.
pub(crate) fn upsert(offers: &mut Vec<Offer>, offer: Offer) {
    match offers.iter_mut().find(|existing| existing.code == offer.code) {
        Some(existing) => *existing = offer,
        None => offers.push(offer),
    }
}

/// Set the active flag of the offer with `code`.
pub(crate) fn set_active(offers: &mut [Offer], code: &OfferCode, active: bool) -> Option<Offer> {
    let offer = offers.iter_mut().find(|offer| &offer.code == code)?;

    offer.active = active;

    Some(offer.clone())
}

/// Remove the offer with `code`.
pub(crate) fn delete(offers: &mut Vec<Offer>, code: &OfferCode) -> bool {
    let before = offers.len();

    offers.retain(|offer| &offer.code != code);

    offers.len() != before
}

/// Process-local offer store.
#[derive(Debug, Default)]
pub struct InMemoryOfferStore {
    offers: RwLock<Vec<Offer>>,
}

impl InMemoryOfferStore {
    #[must_use]
    pub fn new(offers: Vec<Offer>) -> Self {
        Self {
            offers: RwLock::new(offers),
        }
    }
}

#[async_trait]
impl OfferStore for InMemoryOfferStore {
    async fn list_offers(&self) -> Result<Vec<Offer>, OfferStoreError> {
        Ok(self.offers.read().await.clone())
    }

    async fn upsert_offer(&self, offer: Offer) -> Result<(), OfferStoreError> {
        upsert(&mut *self.offers.write().await, offer);

        Ok(())
    }

    async fn set_active(
        &self,
        code: &OfferCode,
        active: bool,
    ) -> Result<Option<Offer>, OfferStoreError> {
        Ok(set_active(&mut self.offers.write().await, code, active))
    }

    async fn delete_offer(&self, code: &OfferCode) -> Result<bool, OfferStoreError> {
        Ok(delete(&mut *self.offers.write().await, code))
    }
}
