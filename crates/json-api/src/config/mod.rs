//! Server configuration module

use std::time::Duration;

use clap::Parser;
use jiff::SignedDuration;
use tollgate::offers::ResolutionPolicy;
use tollgate_app::{context::AppSettings, domain::contracts::ContractSettings, gateway as app_gateway};
use zeroize::Zeroizing;

use crate::config::{
    admin::AdminConfig,
    contracts::ContractsConfig,
    gateway::GatewayConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    offers::OffersConfig,
    server::ServerRuntimeConfig,
    webhook::WebhookConfig,
};

pub(crate) mod admin;
pub(crate) mod contracts;
pub(crate) mod gateway;
pub(crate) mod observability;
pub(crate) mod offers;
pub(crate) mod server;
pub(crate) mod webhook;

/// Tollgate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tollgate-json", about = "Tollgate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Thank-you contract settings.
    #[command(flatten)]
    pub contracts: ContractsConfig,

    /// Payment gateway credentials.
    #[command(flatten)]
    pub gateway: GatewayConfig,

    /// Offer store settings.
    #[command(flatten)]
    pub offers: OffersConfig,

    /// Payment webhook settings.
    #[command(flatten)]
    pub webhook: WebhookConfig,

    /// Admin endpoint settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            gateway: app_gateway::GatewayConfig {
                base_url: self.gateway.gateway_base_url.clone(),
                key_id: self.gateway.gateway_key_id.clone(),
                key_secret: Zeroizing::new(self.gateway.gateway_key_secret.clone()),
            },
            contract_secret: self.contracts.contract_signing_secret.clone(),
            contracts: ContractSettings {
                ttl: SignedDuration::from_secs(i64::from(self.contracts.contract_ttl_seconds)),
                max_age: SignedDuration::from_secs(i64::from(
                    self.contracts.contract_max_age_seconds,
                )),
                thank_you_path: self.contracts.thank_you_path.clone(),
            },
            offers_path: self.offers.offers_file.clone(),
            offer_policy: ResolutionPolicy {
                enforce_billing: self.offers.offers_enforce_billing,
                enforce_country: self.offers.offers_enforce_country,
            },
            webhook_url: self.webhook.webhook_url.clone(),
            webhook_timeout: Duration::from_secs(self.webhook.webhook_timeout_seconds),
        }
    }
}
