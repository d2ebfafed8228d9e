//! Stored SMTP credential record

use std::fmt;

use serde::{Deserialize, Serialize};

/// Table and collection name holding [`SmtpConfig`] records
pub const SMTP_CONFIG_COLLECTION: &str = "smtpConfig";

/// SMTP credentials persisted in the selected backend
///
/// Fields are not validated here; an empty host or a zero port surfaces as a
/// transport failure when the record is used to send.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port
    #[sqlx(try_from = "i32")]
    pub port: u16,

    /// Address used both to authenticate and as the envelope sender
    pub email: String,

    /// Password for PLAIN authentication
    pub password: String,
}

impl SmtpConfig {
    /// Create a record from caller-supplied values
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}
