//! Config repository
//!
//! [`ConfigStore`] reads and writes [`SmtpConfig`] records. [`Connection`]
//! implements it by routing each call to whichever backend it holds.

use async_trait::async_trait;
use tracing::debug;

use crate::database::Connection;
use crate::error::Result;
use crate::models::SmtpConfig;

/// Storage for SMTP credential records
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Persist one record
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged if the write fails.
    async fn insert(&self, config: &SmtpConfig) -> Result<()>;

    /// Every stored record, oldest first
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged if the read fails.
    async fn list(&self) -> Result<Vec<SmtpConfig>>;
}

#[async_trait]
impl ConfigStore for Connection {
    async fn insert(&self, config: &SmtpConfig) -> Result<()> {
        debug!(backend = %self.kind(), host = %config.host, "inserting smtp config");
        match self {
            Self::Relational(pool) => pool.insert(config).await,
            Self::Document(store) => store.insert(config).await,
        }
    }

    async fn list(&self) -> Result<Vec<SmtpConfig>> {
        let configs = match self {
            Self::Relational(pool) => pool.list().await?,
            Self::Document(store) => store.list().await?,
        };
        debug!(backend = %self.kind(), count = configs.len(), "loaded smtp configs");
        Ok(configs)
    }
}
