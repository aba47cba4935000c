//! Webhook Config

use clap::Args;

/// Payment webhook settings.
#[derive(Debug, Args)]
pub struct WebhookConfig {
    /// Endpoint notified of verified payments. Delivery is off when unset.
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Webhook request timeout in seconds.
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub webhook_timeout_seconds: u64,
}
