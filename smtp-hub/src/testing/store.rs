//! In-memory config store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{HubError, Result};
use crate::models::SmtpConfig;
use crate::store::ConfigStore;

/// Config store backed by a shared `Vec`
///
/// Clones share the same records. A closed store answers every call with
/// `HubError::NoConnection`, like a closed pool.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<SmtpConfig>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `records`, in order
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = SmtpConfig>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records.into_iter().collect())),
            closed: Arc::default(),
        }
    }

    /// Snapshot of every stored record
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn records(&self) -> Vec<SmtpConfig> {
        self.records.lock().unwrap().clone()
    }

    /// Make every later call fail with `HubError::NoConnection`
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(HubError::NoConnection);
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn insert(&self, config: &SmtpConfig) -> Result<()> {
        self.ensure_open()?;
        self.records.lock().unwrap().push(config.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SmtpConfig>> {
        self.ensure_open()?;
        Ok(self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let store = MemoryStore::new();
        let first = SmtpConfig::new("one.example.com", 25, "a@example.com", "pw");
        let second = SmtpConfig::new("two.example.com", 587, "b@example.com", "pw");

        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let clone = store.clone();

        clone
            .insert(&SmtpConfig::new("smtp.example.com", 587, "a@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_store_has_no_connection() {
        let store = MemoryStore::with_records([SmtpConfig::new("h", 25, "e", "p")]);
        store.close();

        assert!(matches!(store.list().await, Err(HubError::NoConnection)));
        assert!(matches!(
            store.insert(&SmtpConfig::new("h", 25, "e", "p")).await,
            Err(HubError::NoConnection)
        ));
    }
}
