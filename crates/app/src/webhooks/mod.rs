//! Webhooks
//!
//! Best-effort notification of verified payments to a workflow endpoint.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tollgate::contracts::ThankYouContract;
use tracing::debug;

/// Event name of a verified payment.
pub const PAYMENT_VERIFIED: &str = "payment.verified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
    pub event: String,
    pub contract: ThankYouContract,
    pub redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook endpoint responded with status {0}")]
    Rejected(u16),
}

#[automock]
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    async fn notify(&self, event: PaymentEvent) -> Result<(), WebhookError>;
}

/// Posts events as JSON. Without a URL every notification is a no-op.
#[derive(Debug, Clone)]
pub struct HttpWebhookNotifier {
    url: Option<String>,
    http: Client,
}

impl HttpWebhookNotifier {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.filter(|url| !url.trim().is_empty()),
            http,
        })
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    #[tracing::instrument(name = "webhooks.notify", skip(self, event), fields(event = %event.event), err)]
    async fn notify(&self, event: PaymentEvent) -> Result<(), WebhookError> {
        let Some(url) = &self.url else {
            debug!("no webhook configured");
            return Ok(());
        };

        let response = self.http.post(url).json(&event).send().await?;

        if !response.status().is_success() {
            return Err(WebhookError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }
}
