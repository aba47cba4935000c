//! Gateway Config

use clap::Args;

/// Payment gateway credentials.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Gateway API base URL
    #[arg(
        long,
        env = "GATEWAY_BASE_URL",
        default_value = "https://api.razorpay.com"
    )]
    pub gateway_base_url: String,

    /// Gateway key id
    #[arg(long, env = "GATEWAY_KEY_ID")]
    pub gateway_key_id: String,

    /// Gateway key secret
    #[arg(long, env = "GATEWAY_KEY_SECRET", hide_env_values = true)]
    pub gateway_key_secret: String,
}
