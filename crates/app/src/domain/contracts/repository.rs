//! Ephemeral contract stores.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tollgate::contracts::ThankYouContract;
use tracing::debug;

use crate::{clock::Clock, domain::contracts::ContractStoreError};

/// Composite `order_id|payment_id` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractKey {
    pub order_id: String,
    pub payment_id: String,
}

impl ContractKey {
    #[must_use]
    pub fn new(order_id: impl Into<String>, payment_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
        }
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.order_id, self.payment_id)
    }
}

#[automock]
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// Insert or overwrite the contract under `key`.
    async fn store(
        &self,
        key: ContractKey,
        contract: ThankYouContract,
    ) -> Result<(), ContractStoreError>;

    /// Fetch a live contract.
    async fn fetch(&self, key: &ContractKey)
    -> Result<Option<ThankYouContract>, ContractStoreError>;
}

#[derive(Debug)]
struct StoredContract {
    contract: ThankYouContract,
    stored_at: Timestamp,
}

/// Process-local contract store.
///
/// Entries older than the TTL are purged before every insert and lookup.
/// An entry can outlive its TTL while the store is idle.
#[derive(Debug)]
pub struct InMemoryContractStore {
    entries: Mutex<FxHashMap<ContractKey, StoredContract>>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl InMemoryContractStore {
    #[must_use]
    pub fn new(ttl: SignedDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
            ttl,
            clock,
        }
    }

    fn sweep(&self, entries: &mut FxHashMap<ContractKey, StoredContract>, now: Timestamp) {
        let before = entries.len();

        entries.retain(|_, entry| now.duration_since(entry.stored_at) <= self.ttl);

        let purged = before - entries.len();

        if purged > 0 {
            debug!(purged, "purged expired contracts");
        }
    }
}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn store(
        &self,
        key: ContractKey,
        contract: ThankYouContract,
    ) -> Result<(), ContractStoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        self.sweep(&mut entries, now);

        entries.insert(
            key,
            StoredContract {
                contract,
                stored_at: now,
            },
        );

        Ok(())
    }

    async fn fetch(
        &self,
        key: &ContractKey,
    ) -> Result<Option<ThankYouContract>, ContractStoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        self.sweep(&mut entries, now);

        Ok(entries.get(key).map(|entry| entry.contract.clone()))
    }
}
