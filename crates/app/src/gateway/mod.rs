//! Payment Gateway
//!
//! Order creation, order and payment lookup, and verification of the
//! gateway's own checkout callback signature.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

mod razorpay;

pub use razorpay::{GatewayConfig, RazorpayGateway, callback_signature};

/// Gateway order notes.
pub type OrderNotes = BTreeMap<String, String>;

/// Order to create, amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "notes")]
    pub notes: OrderNotes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayPayment {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub amount: u64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl GatewayPayment {
    /// Whether the payment went through.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        matches!(self.status.as_str(), "authorized" | "captured")
    }
}

/// Notes arrive as an object, or as an empty array when none were set.
fn notes<'de, D>(deserializer: D) -> Result<OrderNotes, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let Value::Object(map) = value else {
        return Ok(OrderNotes::new());
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id handed to the checkout widget.
    fn key_id(&self) -> String;

    async fn create_order(&self, order: NewOrder) -> Result<GatewayOrder, GatewayError>;

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, GatewayError>;

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;

    /// Verify the checkout callback signature for an order and payment.
    fn verify_callback(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
