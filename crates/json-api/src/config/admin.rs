//! Admin Config

use clap::Args;

/// Admin endpoint settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Shared secret expected in the `x-admin-secret` header
    #[arg(long, env = "ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: String,
}
