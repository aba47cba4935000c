//! App Context

use std::{path::PathBuf, sync::Arc, time::Duration};

use thiserror::Error;
use tollgate::{contracts::SigningKey, offers::ResolutionPolicy};
use tracing::error;

use crate::{
    clock::{Clock, SystemClock},
    domain::{
        checkout::{CheckoutService, GatewayCheckoutService},
        contracts::{ContractSettings, ContractsService, InMemoryContractStore, SignedContractsService},
        offers::{JsonFileOfferStore, OfferStoreError, OffersService, StoreOffersService},
    },
    gateway::{GatewayConfig, RazorpayGateway},
    webhooks::{HttpWebhookNotifier, WebhookError},
};

/// Everything needed to wire the services together.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub gateway: GatewayConfig,

    /// Secret for thank-you contract signatures.
    pub contract_secret: Option<String>,

    pub contracts: ContractSettings,

    /// JSON document holding the offers.
    pub offers_path: PathBuf,

    pub offer_policy: ResolutionPolicy,

    pub webhook_url: Option<String>,

    pub webhook_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open offer store")]
    Offers(#[source] OfferStoreError),

    #[error("failed to build webhook client")]
    Webhook(#[source] WebhookError),
}

#[derive(Clone)]
pub struct AppContext {
    pub offers: Arc<dyn OffersService>,
    pub contracts: Arc<dyn ContractsService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// A missing contract secret is not fatal: payments can still be taken,
    /// but contract issue and redemption fail closed.
    ///
    /// # Errors
    ///
    /// Returns an error when the offer store cannot be opened or the
    /// webhook client cannot be built.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let store = JsonFileOfferStore::open(&settings.offers_path)
            .await
            .map_err(AppInitError::Offers)?;

        let offers: Arc<dyn OffersService> = Arc::new(StoreOffersService::new(
            Arc::new(store),
            settings.offer_policy,
            clock.clone(),
        ));

        let key = SigningKey::from_optional(settings.contract_secret)
            .inspect_err(|err| error!(error = %err, "contract signing disabled"))
            .ok();

        let contracts: Arc<dyn ContractsService> = Arc::new(SignedContractsService::new(
            Arc::new(InMemoryContractStore::new(settings.contracts.ttl, clock.clone())),
            key,
            settings.contracts,
            clock,
        ));

        let webhooks = HttpWebhookNotifier::new(settings.webhook_url, settings.webhook_timeout)
            .map_err(AppInitError::Webhook)?;

        let checkout = Arc::new(GatewayCheckoutService::new(
            Arc::new(RazorpayGateway::new(settings.gateway)),
            offers.clone(),
            contracts.clone(),
            Arc::new(webhooks),
        ));

        Ok(Self {
            offers,
            contracts,
            checkout,
        })
    }
}
