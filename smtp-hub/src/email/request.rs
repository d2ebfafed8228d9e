//! A single outbound send: server, credential, envelope and raw message

use std::fmt;

use lettre::{address::Envelope, Address};

use crate::error::{HubError, Result};
use crate::models::SmtpConfig;

/// Format the server address as `host:port`
///
/// ```rust
/// use smtp_hub::email::build_smtp_address;
///
/// assert_eq!(build_smtp_address("smtp.example.com", 587), "smtp.example.com:587");
/// ```
#[must_use]
pub fn build_smtp_address(host: &str, port: u16) -> String {
    format!("{host}:{port}")
}

/// Credential for SMTP `AUTH PLAIN`
#[derive(Clone, PartialEq, Eq)]
pub struct PlainCredentials {
    username: String,
    password: String,
}

impl PlainCredentials {
    /// Bind a username (the account email) to its password
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Account the credential authenticates
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Secret half of the credential
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for PlainCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainCredentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Everything a [`MailTransport`](super::MailTransport) needs for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port
    pub port: u16,

    /// PLAIN authentication credential
    pub credentials: PlainCredentials,

    /// Envelope sender
    pub from: String,

    /// Envelope recipients
    pub to: Vec<String>,

    /// Complete RFC 5322 message, headers included
    pub message: Vec<u8>,
}

impl SendRequest {
    /// Build a request with caller-supplied credentials
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        credentials: PlainCredentials,
        from: impl Into<String>,
        to: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials,
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Build a request from a stored record; the record's email is both the
    /// credential username and the envelope sender
    #[must_use]
    pub fn from_config(
        config: &SmtpConfig,
        to: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(
            config.host.clone(),
            config.port,
            PlainCredentials::new(config.email.clone(), config.password.clone()),
            config.email.clone(),
            to,
            message,
        )
    }

    /// Server address as `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        build_smtp_address(&self.host, self.port)
    }

    /// SMTP envelope for this request
    ///
    /// # Errors
    ///
    /// Returns `HubError::InvalidAddress` for an unparsable sender or
    /// recipient and `HubError::Envelope` when there are no recipients.
    pub fn envelope(&self) -> Result<Envelope> {
        let from = parse_address(&self.from)?;
        let to = self
            .to
            .iter()
            .map(|addr| parse_address(addr))
            .collect::<Result<Vec<_>>>()?;

        Ok(Envelope::new(Some(from), to)?)
    }
}

fn parse_address(addr: &str) -> Result<Address> {
    addr.trim()
        .parse()
        .map_err(|_| HubError::invalid_address(addr))
}
