//! Offers Config

use std::path::PathBuf;

use clap::Args;

/// Offer store settings.
#[derive(Debug, Args)]
pub struct OffersConfig {
    /// JSON file holding offer records
    #[arg(long, env = "OFFERS_FILE", default_value = "data/offers.json")]
    pub offers_file: PathBuf,

    /// Enforce offer country lists during resolution.
    #[arg(long, env = "OFFERS_ENFORCE_COUNTRY", default_value_t = false)]
    pub offers_enforce_country: bool,

    /// Enforce offer billing-type lists during resolution.
    #[arg(long, env = "OFFERS_ENFORCE_BILLING", default_value_t = false)]
    pub offers_enforce_billing: bool,
}
