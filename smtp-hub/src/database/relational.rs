//! Relational connectors (Postgres, MySQL, SQLite) built on `sqlx`

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    mysql::MySqlPoolOptions,
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    MySqlPool, PgPool, SqlitePool,
};
use tracing::debug;

use super::BackendKind;
use crate::config::DatabaseSettings;
use crate::error::{HubError, Result};
use crate::models::SmtpConfig;

// Postgres folds unquoted identifiers to lower case
const POSTGRES_SCHEMA: &str = r#"CREATE TABLE IF NOT EXISTS "smtpConfig" (
    id BIGSERIAL PRIMARY KEY,
    host TEXT NOT NULL,
    port INTEGER NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)"#;

const MYSQL_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS smtpConfig (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    host VARCHAR(255) NOT NULL,
    port INT NOT NULL,
    email VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL
)";

const SQLITE_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS smtpConfig (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    host TEXT NOT NULL,
    port INTEGER NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)";

const POSTGRES_INSERT: &str =
    r#"INSERT INTO "smtpConfig" (host, port, email, password) VALUES ($1, $2, $3, $4)"#;

const POSTGRES_SELECT_ALL: &str =
    r#"SELECT host, port, email, password FROM "smtpConfig" ORDER BY id"#;

const INSERT: &str = "INSERT INTO smtpConfig (host, port, email, password) VALUES (?, ?, ?, ?)";

const SELECT_ALL: &str = "SELECT host, port, email, password FROM smtpConfig ORDER BY id";

/// Pool for one of the SQL backends
#[derive(Debug, Clone)]
pub enum RelationalPool {
    /// `PostgreSQL` pool
    Postgres(PgPool),
    /// `MySQL` pool
    MySql(MySqlPool),
    /// `SQLite` pool
    Sqlite(SqlitePool),
}

impl RelationalPool {
    /// Open a Postgres pool from `settings.postgres_url` and create the table
    ///
    /// # Errors
    ///
    /// Returns `HubError::Database` if the server cannot be reached or the
    /// table cannot be created.
    pub async fn postgres(settings: &DatabaseSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout())
            .connect(&settings.postgres_url)
            .await?;

        let pool = Self::Postgres(pool);
        pool.ensure_schema().await?;
        Ok(pool)
    }

    /// Open a MySQL pool from `settings.mysql_url` and create the table
    ///
    /// # Errors
    ///
    /// Returns `HubError::Database` if the server cannot be reached or the
    /// table cannot be created.
    pub async fn mysql(settings: &DatabaseSettings) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout())
            .connect(&settings.mysql_url)
            .await?;

        let pool = Self::MySql(pool);
        pool.ensure_schema().await?;
        Ok(pool)
    }

    /// Open a SQLite pool from `settings.sqlite_url` and create the table
    ///
    /// The database file is created if missing. In-memory databases live on a
    /// single connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Database` if the URL is invalid or the file cannot
    /// be opened.
    pub async fn sqlite(settings: &DatabaseSettings) -> Result<Self> {
        let url = settings.sqlite_url.as_str();
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(settings.acquire_timeout());
        pool_options = if is_in_memory(url) {
            pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(settings.max_connections)
        };

        let pool = Self::Sqlite(pool_options.connect_with(options).await?);
        pool.ensure_schema().await?;
        Ok(pool)
    }

    /// Backend this pool talks to
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Postgres(_) => BackendKind::Postgres,
            Self::MySql(_) => BackendKind::Mysql,
            Self::Sqlite(_) => BackendKind::Sqlite,
        }
    }

    /// Whether [`close`](Self::close) has been called on this pool or a clone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Postgres(pool) => pool.is_closed(),
            Self::MySql(pool) => pool.is_closed(),
            Self::Sqlite(pool) => pool.is_closed(),
        }
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::MySql(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }

    async fn ensure_schema(&self) -> Result<()> {
        debug!(backend = %self.kind(), "ensuring smtpConfig table");
        match self {
            Self::Postgres(pool) => {
                sqlx::query(POSTGRES_SCHEMA).execute(pool).await?;
            }
            Self::MySql(pool) => {
                sqlx::query(MYSQL_SCHEMA).execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Insert one record
    ///
    /// # Errors
    ///
    /// Returns `HubError::NoConnection` if the pool was closed, or
    /// `HubError::Database` if the insert fails.
    pub async fn insert(&self, config: &SmtpConfig) -> Result<()> {
        self.ensure_open()?;
        let port = i32::from(config.port);

        match self {
            Self::Postgres(pool) => {
                sqlx::query(POSTGRES_INSERT)
                    .bind(&config.host)
                    .bind(port)
                    .bind(&config.email)
                    .bind(&config.password)
                    .execute(pool)
                    .await?;
            }
            Self::MySql(pool) => {
                sqlx::query(INSERT)
                    .bind(&config.host)
                    .bind(port)
                    .bind(&config.email)
                    .bind(&config.password)
                    .execute(pool)
                    .await?;
            }
            Self::Sqlite(pool) => {
                sqlx::query(INSERT)
                    .bind(&config.host)
                    .bind(port)
                    .bind(&config.email)
                    .bind(&config.password)
                    .execute(pool)
                    .await?;
            }
        }

        Ok(())
    }

    /// Read every record in insertion order
    ///
    /// # Errors
    ///
    /// Returns `HubError::NoConnection` if the pool was closed, or
    /// `HubError::Database` if the query or row decoding fails.
    pub async fn list(&self) -> Result<Vec<SmtpConfig>> {
        self.ensure_open()?;

        let configs: Vec<SmtpConfig> = match self {
            Self::Postgres(pool) => sqlx::query_as(POSTGRES_SELECT_ALL).fetch_all(pool).await?,
            Self::MySql(pool) => sqlx::query_as(SELECT_ALL).fetch_all(pool).await?,
            Self::Sqlite(pool) => sqlx::query_as(SELECT_ALL).fetch_all(pool).await?,
        };

        Ok(configs)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(HubError::NoConnection);
        }
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_settings() -> DatabaseSettings {
        DatabaseSettings {
            sqlite_url: "sqlite::memory:".to_string(),
            ..DatabaseSettings::for_backend(BackendKind::Sqlite)
        }
    }

    #[test]
    fn test_postgres_statements_keep_table_case() {
        for statement in [POSTGRES_SCHEMA, POSTGRES_INSERT, POSTGRES_SELECT_ALL] {
            assert!(statement.contains(r#""smtpConfig""#), "{statement}");
        }
        for statement in [MYSQL_SCHEMA, SQLITE_SCHEMA, INSERT, SELECT_ALL] {
            assert!(statement.contains("smtpConfig"), "{statement}");
            assert!(!statement.contains('"'), "{statement}");
        }
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file.db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://smtp-hub.db"));
    }

    #[tokio::test]
    async fn test_sqlite_insert_then_list() {
        let pool = RelationalPool::sqlite(&memory_settings()).await.unwrap();
        assert_eq!(pool.kind(), BackendKind::Sqlite);

        let first = SmtpConfig::new("smtp.example.com", 587, "a@example.com", "pw");
        let second = SmtpConfig::new("mail.example.org", 465, "b@example.org", "secret");
        pool.insert(&first).await.unwrap();
        pool.insert(&second).await.unwrap();

        let configs = pool.list().await.unwrap();
        assert_eq!(configs, vec![first, second]);
    }

    #[tokio::test]
    async fn test_sqlite_empty_table() {
        let pool = RelationalPool::sqlite(&memory_settings()).await.unwrap();
        assert!(pool.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = RelationalPool::sqlite(&memory_settings()).await.unwrap();
        pool.ensure_schema().await.unwrap();
        pool.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_pool_reports_no_connection() {
        let pool = RelationalPool::sqlite(&memory_settings()).await.unwrap();
        pool.close().await;

        assert!(pool.is_closed());
        assert!(matches!(pool.list().await, Err(HubError::NoConnection)));
        assert!(matches!(
            pool.insert(&SmtpConfig::new("h", 25, "e", "p")).await,
            Err(HubError::NoConnection)
        ));
    }

    #[tokio::test]
    async fn test_sqlite_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.db");
        let settings = DatabaseSettings {
            sqlite_url: format!("sqlite://{}", path.display()),
            ..memory_settings()
        };

        let pool = RelationalPool::sqlite(&settings).await.unwrap();
        pool.insert(&SmtpConfig::new("smtp.example.com", 25, "a@example.com", "pw"))
            .await
            .unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
