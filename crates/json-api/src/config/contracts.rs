//! Contracts Config

use clap::Args;

/// Thank-you contract settings.
#[derive(Debug, Args)]
pub struct ContractsConfig {
    /// Secret signing thank-you redirects. Without it contract endpoints fail closed.
    #[arg(long, env = "CONTRACT_SIGNING_SECRET", hide_env_values = true)]
    pub contract_signing_secret: Option<String>,

    /// Lifetime of a stored contract in seconds.
    #[arg(long, env = "CONTRACT_TTL_SECONDS", default_value_t = 1_800_u32)]
    pub contract_ttl_seconds: u32,

    /// Freshness window of a signed redirect in seconds.
    #[arg(long, env = "CONTRACT_MAX_AGE_SECONDS", default_value_t = 900_u32)]
    pub contract_max_age_seconds: u32,

    /// Path of the confirmation page redirects point at.
    #[arg(long, env = "THANK_YOU_PATH", default_value = "/thank-you")]
    pub thank_you_path: String,
}
