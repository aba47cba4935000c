//! Contracts Service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::SignedDuration;
use mockall::automock;
use tollgate::contracts::{
    ContractVerificationError, RedemptionParams, SigningKey, ThankYouContract, sign, verify_params,
};
use tracing::{info, warn};

use crate::{
    clock::Clock,
    domain::contracts::{ContractKey, ContractStore, ContractsServiceError},
};

/// Contract lifetimes and redirect target.
#[derive(Debug, Clone)]
pub struct ContractSettings {
    /// Lifetime of a stored contract.
    pub ttl: SignedDuration,

    /// Freshness window of a signed redirect.
    pub max_age: SignedDuration,

    /// Path of the confirmation page.
    pub thank_you_path: String,
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            ttl: SignedDuration::from_mins(30),
            max_age: SignedDuration::from_mins(15),
            thank_you_path: "/thank-you".to_string(),
        }
    }
}

/// Redirect issued for a stored contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedContract {
    pub redirect_url: String,
    pub ts: i64,
    pub sig: String,
}

/// Redemption query as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRedemption {
    pub version: Option<String>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub ts: Option<String>,
    pub sig: Option<String>,
}

#[derive(Clone)]
pub struct SignedContractsService {
    store: Arc<dyn ContractStore>,
    key: Option<SigningKey>,
    settings: ContractSettings,
    clock: Arc<dyn Clock>,
}

impl SignedContractsService {
    /// A service without a signing key refuses every issue and redemption.
    #[must_use]
    pub fn new(
        store: Arc<dyn ContractStore>,
        key: Option<SigningKey>,
        settings: ContractSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            key,
            settings,
            clock,
        }
    }

    fn key(&self) -> Result<&SigningKey, ContractsServiceError> {
        self.key.as_ref().ok_or(ContractsServiceError::Misconfigured)
    }

    fn redirect_url(&self, key: &ContractKey, ts: i64, sig: &str) -> String {
        format!(
            "{}?order_id={}&payment_id={}&ts={ts}&sig={sig}",
            self.settings.thank_you_path,
            urlencoding::encode(&key.order_id),
            urlencoding::encode(&key.payment_id),
        )
    }
}

impl fmt::Debug for SignedContractsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedContractsService")
            .field("key", &self.key)
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContractsService for SignedContractsService {
    #[tracing::instrument(
        name = "contracts.service.issue",
        skip(self, contract),
        fields(order_id = %contract.ids().order_id, payment_id = %contract.ids().payment_id),
        err
    )]
    async fn issue(
        &self,
        contract: ThankYouContract,
    ) -> Result<IssuedContract, ContractsServiceError> {
        let signing_key = self.key()?;

        let key = ContractKey::new(&contract.ids().order_id, &contract.ids().payment_id);
        let kind = contract.kind();

        self.store.store(key.clone(), contract).await?;

        let ts = self.clock.now().as_millisecond();
        let sig = sign(signing_key, &key.order_id, &key.payment_id, &ts.to_string());

        info!(kind = ?kind, "issued contract");

        Ok(IssuedContract {
            redirect_url: self.redirect_url(&key, ts, &sig),
            ts,
            sig,
        })
    }

    #[tracing::instrument(
        name = "contracts.service.redeem",
        skip(self, redemption),
        fields(order_id = ?redemption.order_id, payment_id = ?redemption.payment_id),
        err
    )]
    async fn redeem(
        &self,
        redemption: ContractRedemption,
    ) -> Result<ThankYouContract, ContractsServiceError> {
        let signing_key = self.key()?;

        let params = RedemptionParams {
            version: redemption.version.as_deref(),
            order_id: redemption.order_id.as_deref(),
            payment_id: redemption.payment_id.as_deref(),
            ts: redemption.ts.as_deref(),
            sig: redemption.sig.as_deref(),
        };

        let verified = verify_params(signing_key, params, self.clock.now(), self.settings.max_age)
            .inspect_err(|reason| warn!(reason = reason.code(), "contract redemption refused"))?;

        let key = ContractKey::new(verified.order_id, verified.payment_id);

        // A valid signature for an absent contract is a benign race.
        let contract = self
            .store
            .fetch(&key)
            .await?
            .ok_or(ContractVerificationError::NotFound)?;

        Ok(contract)
    }
}

#[automock]
#[async_trait]
pub trait ContractsService: Send + Sync {
    /// Store a contract and sign a redirect to it.
    async fn issue(&self, contract: ThankYouContract)
    -> Result<IssuedContract, ContractsServiceError>;

    /// Verify a signed redirect and release its contract.
    async fn redeem(
        &self,
        redemption: ContractRedemption,
    ) -> Result<ThankYouContract, ContractsServiceError>;
}
