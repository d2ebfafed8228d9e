//! MongoDB connector

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::{bson::doc, Client, Collection, Database};
use tracing::debug;

use crate::config::DatabaseSettings;
use crate::error::{HubError, Result};
use crate::models::{SmtpConfig, SMTP_CONFIG_COLLECTION};

/// Handle to the MongoDB database holding the `smtpConfig` collection
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: Client,
    database: Database,
    read_timeout: Duration,
    // shared by every clone, like the client itself
    closed: Arc<AtomicBool>,
}

impl DocumentStore {
    /// Build a client from `settings.mongodb_uri`
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first insert or read.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Mongo` if the URI cannot be parsed or resolved.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let client = Client::with_uri_str(&settings.mongodb_uri).await?;
        debug!(database = %settings.mongodb_database, "mongodb client ready");
        Ok(Self::new(client, &settings.mongodb_database, settings.read_timeout()))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn new(client: Client, database: &str, read_timeout: Duration) -> Self {
        let database = client.database(database);
        Self {
            client,
            database,
            read_timeout,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether [`close`](Self::close) has been called on this handle or a clone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Underlying database handle
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Bound applied to [`list`](Self::list)
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    fn collection(&self) -> Collection<SmtpConfig> {
        self.database.collection(SMTP_CONFIG_COLLECTION)
    }

    /// Insert one document
    ///
    /// # Errors
    ///
    /// Returns `HubError::NoConnection` once closed, or `HubError::Mongo` on
    /// serialization or network failure.
    pub async fn insert(&self, config: &SmtpConfig) -> Result<()> {
        self.ensure_open()?;
        self.collection().insert_one(config).await?;
        Ok(())
    }

    /// Read every document in insertion order
    ///
    /// # Errors
    ///
    /// Returns `HubError::NoConnection` once closed, `HubError::ReadTimeout`
    /// if the query and cursor drain take longer than the read timeout, or
    /// `HubError::Mongo` on driver failure.
    pub async fn list(&self) -> Result<Vec<SmtpConfig>> {
        self.ensure_open()?;

        let read = async {
            let cursor = self
                .collection()
                .find(doc! {})
                .sort(doc! { "_id": 1 })
                .await?;
            let configs: Vec<SmtpConfig> = cursor.try_collect().await?;
            Ok::<_, HubError>(configs)
        };

        with_read_timeout(self.read_timeout, read).await
    }

    /// Shut the client down for this handle and every clone
    pub async fn close(self) {
        self.closed.store(true, Ordering::Release);
        self.client.shutdown().await;
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(HubError::NoConnection);
        }
        Ok(())
    }
}

/// Run a read, failing with `HubError::ReadTimeout` once `limit` elapses
pub(crate) async fn with_read_timeout<T, F>(limit: Duration, read: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, read)
        .await
        .map_err(|_| HubError::ReadTimeout(limit))?
}
