//! In-memory bill store.
//!
//! Bills are loaded once at startup from a JSON array and served read-only.

use std::path::{Path, PathBuf};

use nepfin_core::aggregation::Bill;
use nepfin_shared::AppError;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading bills.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The bills file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The bills file is not a valid JSON array of bills.
    #[error("failed to parse bills: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::DataSource(err.to_string())
    }
}

/// Read-only collection of bills.
#[derive(Debug, Clone, Default)]
pub struct BillStore {
    bills: Vec<Bill>,
}

impl BillStore {
    /// Creates a store from bills already in memory.
    #[must_use]
    pub fn from_bills(bills: Vec<Bill>) -> Self {
        Self { bills }
    }

    /// Parses a store from a JSON array.
    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(Self::from_bills(serde_json::from_slice(bytes)?))
    }

    /// Loads a store from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_json(&bytes)?;
        info!(path = %path.display(), count = store.len(), "Loaded bills");
        Ok(store)
    }

    /// All bills in insertion order.
    #[must_use]
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Number of bills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bills.len()
    }

    /// Returns true if the store holds no bills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BILLS: &str = r#"[
        {
            "id": "0191d1f6-1b2c-7a3e-8f00-000000000001",
            "bill_date": "2024-03-05",
            "vendor": "Nepal Telecom",
            "category": "Office Admin",
            "amount_npr": "3000",
            "transaction_type": "debit",
            "account_type": "expense"
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let store = BillStore::from_json(BILLS.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.bills()[0].category_name(), "Office Admin");
    }

    #[test]
    fn test_invalid_json() {
        let err = BillStore::from_json(b"{").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
        assert_eq!(AppError::from(err).status_code(), 500);
    }

    #[tokio::test]
    async fn test_load_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/bills.sample.json");
        let store = BillStore::load(path).await.unwrap();
        assert_eq!(store.len(), 6);
        assert_eq!(store.bills()[3].vendor.as_deref(), Some("Nepal Telecom"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = BillStore::load("/nonexistent/bills.json").await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
