//! JSON file offer store.
//!
//! The file holds a JSON array of offer records. Records are migrated to the
//! canonical shape once, when the file is opened; every write persists the
//! whole canonical set through a temporary file and an atomic rename.
//! Records that cannot be read are kept verbatim and written back after the
//! canonical ones.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tollgate::offers::{Offer, OfferCode};
use tracing::{info, warn};

use crate::domain::offers::{
    OfferStoreError,
    repository::{OfferStore, delete, set_active, upsert},
};

#[derive(Debug)]
pub struct JsonFileOfferStore {
    path: PathBuf,
    offers: RwLock<Vec<Offer>>,
    unreadable: Vec<Value>,
}

impl JsonFileOfferStore {
    /// Open the store, loading and migrating every record in the file.
    ///
    /// A missing file is an empty store. Records that cannot be migrated are
    /// hidden from reads with a warning but preserved on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a JSON array.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, OfferStoreError> {
        let path = path.as_ref().to_path_buf();

        let (offers, unreadable) = match fs::read(&path).await {
            Ok(bytes) => migrate(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => (Vec::new(), Vec::new()),
            Err(error) => return Err(error.into()),
        };

        info!(
            path = %path.display(),
            offer_count = offers.len(),
            unreadable_count = unreadable.len(),
            "loaded offers"
        );

        Ok(Self {
            path,
            offers: RwLock::new(offers),
            unreadable,
        })
    }

    async fn persist(&self, offers: &[Offer]) -> Result<(), OfferStoreError> {
        let mut records = offers
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        records.extend(self.unreadable.iter().cloned());

        let json = serde_json::to_vec_pretty(&records)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

/// Split records into migrated offers and the raw records that failed.
fn migrate(records: Vec<Value>) -> (Vec<Offer>, Vec<Value>) {
    let mut offers = Vec::with_capacity(records.len());
    let mut unreadable = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Offer>(record.clone()) {
            Ok(offer) => offers.push(offer),
            Err(error) => {
                warn!(index, error = %error, "keeping unreadable offer record as-is");
                unreadable.push(record);
            }
        }
    }

    (offers, unreadable)
}

#[async_trait]
impl OfferStore for JsonFileOfferStore {
    async fn list_offers(&self) -> Result<Vec<Offer>, OfferStoreError> {
        Ok(self.offers.read().await.clone())
    }

    async fn upsert_offer(&self, offer: Offer) -> Result<(), OfferStoreError> {
        let mut offers = self.offers.write().await;
        let mut next = offers.clone();

        upsert(&mut next, offer);

        self.persist(&next).await?;

        *offers = next;

        Ok(())
    }

    async fn set_active(
        &self,
        code: &OfferCode,
        active: bool,
    ) -> Result<Option<Offer>, OfferStoreError> {
        let mut offers = self.offers.write().await;
        let mut next = offers.clone();

        let Some(updated) = set_active(&mut next, code, active) else {
            return Ok(None);
        };

        self.persist(&next).await?;

        *offers = next;

        Ok(Some(updated))
    }

    async fn delete_offer(&self, code: &OfferCode) -> Result<bool, OfferStoreError> {
        let mut offers = self.offers.write().await;
        let mut next = offers.clone();

        if !delete(&mut next, code) {
            return Ok(false);
        }

        self.persist(&next).await?;

        *offers = next;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::test::helpers::offer_for;

    use super::*;

    #[tokio::test]
    async fn missing_file_opens_empty() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileOfferStore::open(dir.path().join("offers.json")).await?;

        assert!(store.list_offers().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn legacy_records_are_migrated_on_open() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("offers.json");

        std::fs::write(
            &path,
            serde_json::to_vec(&json!([
                {
                    "code": "legacy",
                    "type": "PERCENT",
                    "amount": 10,
                    "enabled": false,
                    "plans": ["ENT_90"],
                    "startAt": "2026-01-01T00:00:00Z"
                },
                { "code": "", "type": "FIXED", "amount": 5 },
                { "code": "BROKEN", "type": "BOGO", "amount": 5 }
            ]))?,
        )?;

        let store = JsonFileOfferStore::open(&path).await?;
        let offers = store.list_offers().await?;

        assert_eq!(offers.len(), 1, "unreadable records should be hidden");

        let legacy = offers.first().ok_or("Expected migrated offer")?;

        assert_eq!(legacy.code.as_str(), "LEGACY");
        assert!(!legacy.active);
        assert_eq!(legacy.applies_to.plans, vec!["ENT_90".to_string()]);
        assert_eq!(legacy.validity.start, Some("2026-01-01T00:00:00Z".parse()?));

        Ok(())
    }

    #[tokio::test]
    async fn non_array_file_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("offers.json");

        std::fs::write(&path, br#"{"code": "SAVE10"}"#)?;

        let result = JsonFileOfferStore::open(&path).await;

        assert!(
            matches!(result, Err(OfferStoreError::Malformed(_))),
            "expected Malformed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn writes_persist_canonical_records() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("offers.json");

        let store = JsonFileOfferStore::open(&path).await?;

        store
            .upsert_offer(offer_for("SAVE10", 1_000.0, &["ENT_90"]))
            .await?;
        store
            .upsert_offer(offer_for("SAVE20", 2_000.0, &["ENT_90"]))
            .await?;

        let code = OfferCode::parse("save20").ok_or("Expected code")?;

        let disabled = OfferCode::parse("save10").ok_or("Expected code")?;

        assert!(store.set_active(&disabled, false).await?.is_some());
        assert!(store.delete_offer(&code).await?);

        let reopened = JsonFileOfferStore::open(&path).await?;
        let offers = reopened.list_offers().await?;

        assert_eq!(offers.len(), 1);

        let saved = offers.first().ok_or("Expected saved offer")?;

        assert_eq!(saved.code.as_str(), "SAVE10");
        assert!(!saved.active);

        let raw: Value = serde_json::from_slice(&std::fs::read(&path)?)?;

        assert_eq!(raw[0]["appliesTo"]["plans"], json!(["ENT_90"]));
        assert_eq!(raw[0]["active"], json!(false));
        assert!(!path.with_extension("json.tmp").exists());

        Ok(())
    }

    #[tokio::test]
    async fn writes_keep_unreadable_records_on_disk() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("offers.json");

        let bogo = json!({ "code": "BOGO2", "type": "BOGO", "amount": 5 });

        std::fs::write(&path, serde_json::to_vec(&json!([bogo.clone()]))?)?;

        let store = JsonFileOfferStore::open(&path).await?;

        assert!(store.list_offers().await?.is_empty());

        store
            .upsert_offer(offer_for("NEW", 500.0, &["PLAN_60"]))
            .await?;

        let raw: Value = serde_json::from_slice(&std::fs::read(&path)?)?;

        assert_eq!(raw[0]["code"], json!("NEW"));
        assert_eq!(raw[1], bogo);

        let reopened = JsonFileOfferStore::open(&path).await?;
        let offers = reopened.list_offers().await?;

        assert_eq!(offers.len(), 1);
        assert_eq!(offers.first().map(|offer| offer.code.as_str()), Some("NEW"));

        Ok(())
    }
}
