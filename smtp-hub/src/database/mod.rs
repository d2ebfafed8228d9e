//! Backend connectors and the connection dispatcher
//!
//! [`Connection::open`] reads the backend selector from [`DatabaseSettings`]
//! and invokes exactly one connector:
//!
//! | selector   | connector                     | handle                       |
//! |------------|-------------------------------|------------------------------|
//! | `postgres` | [`RelationalPool::postgres`]  | [`Connection::Relational`]   |
//! | `mysql`    | [`RelationalPool::mysql`]     | [`Connection::Relational`]   |
//! | `sqlite`   | [`RelationalPool::sqlite`]    | [`Connection::Relational`]   |
//! | `mongodb`  | [`DocumentStore::connect`]    | [`Connection::Document`]     |
//!
//! Connector failures propagate unchanged; there is no retry and no fallback
//! to another backend.
//!
//! ```rust,no_run
//! use smtp_hub::config::DatabaseSettings;
//! use smtp_hub::database::{BackendKind, Connection};
//!
//! # async fn example() -> smtp_hub::Result<()> {
//! let connection = Connection::open(&DatabaseSettings::for_backend(BackendKind::Sqlite)).await?;
//! assert!(connection.relational().is_some());
//! connection.close().await;
//! # Ok(())
//! # }
//! ```

mod document;
mod kind;
mod relational;

pub use document::DocumentStore;
pub use kind::BackendKind;
pub use relational::RelationalPool;

use tracing::debug;

use crate::config::DatabaseSettings;
use crate::error::Result;

/// An open connection to exactly one backend
///
/// This is the handle pair of the dispatcher: exactly one of
/// [`relational`](Self::relational) and [`document`](Self::document) is
/// populated.
#[derive(Debug, Clone)]
pub enum Connection {
    /// Postgres, MySQL or SQLite pool
    Relational(RelationalPool),
    /// MongoDB database
    Document(DocumentStore),
}

impl Connection {
    /// Open a connection to the backend named by `settings.kind`
    ///
    /// # Errors
    ///
    /// - `HubError::ConfigurationMissing` if the selector is unset or empty
    /// - `HubError::UnsupportedBackend` if the selector is not a known tag
    /// - the connector's own error if opening the backend fails
    pub async fn open(settings: &DatabaseSettings) -> Result<Self> {
        let kind = settings.backend()?;
        debug!(backend = %kind, "opening database connection");

        let connection = match kind {
            BackendKind::Postgres => Self::Relational(RelationalPool::postgres(settings).await?),
            BackendKind::Mysql => Self::Relational(RelationalPool::mysql(settings).await?),
            BackendKind::Sqlite => Self::Relational(RelationalPool::sqlite(settings).await?),
            BackendKind::Mongodb => Self::Document(DocumentStore::connect(settings).await?),
        };

        Ok(connection)
    }

    /// Backend this connection talks to
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Relational(pool) => pool.kind(),
            Self::Document(_) => BackendKind::Mongodb,
        }
    }

    /// Relational slot of the pair
    #[must_use]
    pub const fn relational(&self) -> Option<&RelationalPool> {
        match self {
            Self::Relational(pool) => Some(pool),
            Self::Document(_) => None,
        }
    }

    /// Document slot of the pair
    #[must_use]
    pub const fn document(&self) -> Option<&DocumentStore> {
        match self {
            Self::Relational(_) => None,
            Self::Document(store) => Some(store),
        }
    }

    /// Release the connection
    pub async fn close(self) {
        debug!(backend = %self.kind(), "closing database connection");
        match self {
            Self::Relational(pool) => pool.close().await,
            Self::Document(store) => store.close().await,
        }
    }
}
