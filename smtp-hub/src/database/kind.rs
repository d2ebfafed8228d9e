//! Backend-kind selector

use std::fmt;
use std::str::FromStr;

use crate::error::{HubError, Result};

/// Database backends a [`Connection`](super::Connection) can be opened against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `PostgreSQL` through `sqlx`
    Postgres,
    /// `MySQL` through `sqlx`
    Mysql,
    /// `SQLite` through `sqlx`
    Sqlite,
    /// `MongoDB` through the official driver
    Mongodb,
}

impl BackendKind {
    /// Every supported backend, in selector order
    pub const ALL: [Self; 4] = [Self::Postgres, Self::Mysql, Self::Sqlite, Self::Mongodb];

    /// Selector tag for this backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mongodb => "mongodb",
        }
    }

    /// Whether the backend stores records in a SQL table
    #[must_use]
    pub const fn is_relational(self) -> bool {
        !matches!(self, Self::Mongodb)
    }

    /// Resolve an optional selector value
    ///
    /// # Errors
    ///
    /// Returns `HubError::ConfigurationMissing` for an absent, empty or
    /// whitespace-only selector, and `HubError::UnsupportedBackend` for any
    /// other value that is not a known tag.
    pub fn from_selector(selector: Option<&str>) -> Result<Self> {
        match selector {
            Some(value) if !value.trim().is_empty() => value.parse(),
            _ => Err(HubError::ConfigurationMissing),
        }
    }
}

impl FromStr for BackendKind {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            "mongodb" => Ok(Self::Mongodb),
            "" => Err(HubError::ConfigurationMissing),
            other => Err(HubError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
