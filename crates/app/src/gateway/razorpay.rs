//! Razorpay REST client.

use std::fmt;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::gateway::{GatewayError, GatewayOrder, GatewayPayment, NewOrder, PaymentGateway};

type HmacSha256 = Hmac<Sha256>;

/// Gateway credentials and endpoint.
#[derive(Clone)]
pub struct GatewayConfig {
    /// API base URL, e.g. `"https://api.razorpay.com"`.
    pub base_url: String,

    pub key_id: String,

    pub key_secret: Zeroizing<String>,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

/// Hex HMAC-SHA-256 of `order_id|payment_id` under the gateway secret.
#[must_use]
pub fn callback_signature(secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;

    mac.update(format!("{order_id}|{payment_id}").as_bytes());

    Some(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    config: GatewayConfig,
    http: Client,
}

impl RazorpayGateway {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn read<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, GatewayError> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "{action} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> String {
        self.config.key_id.clone()
    }

    #[tracing::instrument(
        name = "gateway.create_order",
        skip(self, order),
        fields(amount = order.amount, receipt = %order.receipt),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<GatewayOrder, GatewayError> {
        let response = self
            .http
            .post(self.url("orders"))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .json(&order)
            .send()
            .await?;

        Self::read(response, "order creation").await
    }

    #[tracing::instrument(name = "gateway.fetch_order", skip(self), err)]
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, GatewayError> {
        let response = self
            .http
            .get(self.url(&format!("orders/{}", urlencoding::encode(order_id))))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .send()
            .await?;

        Self::read(response, "order lookup").await
    }

    #[tracing::instrument(name = "gateway.fetch_payment", skip(self), err)]
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let response = self
            .http
            .get(self.url(&format!("payments/{}", urlencoding::encode(payment_id))))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .send()
            .await?;

        Self::read(response, "payment lookup").await
    }

    fn verify_callback(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        callback_signature(&self.config.key_secret, order_id, payment_id)
            .is_some_and(|expected| expected == signature)
    }
}
