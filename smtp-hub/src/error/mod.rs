//! Error types and error handling

use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = HubError> = std::result::Result<T, E>;

/// Every failure the hub can report
///
/// Driver and transport errors are carried verbatim in their variant so the
/// caller sees the underlying message unchanged.
#[derive(Debug, Error)]
pub enum HubError {
    /// The backend selector (`DATABASE_TYPE`) is unset or empty
    #[error("database type not specified")]
    ConfigurationMissing,

    /// The backend selector names no supported backend
    #[error("unsupported database type: {0}")]
    UnsupportedBackend(String),

    /// Dispatch produced no usable connection
    #[error("no database connection")]
    NoConnection,

    /// No SMTP credentials are stored in the selected backend
    #[error("no SMTP configuration stored")]
    NoSmtpConfig,

    /// Relational driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document store driver error
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Document store read exceeded its time bound
    #[error("document read timed out after {0:?}")]
    ReadTimeout(Duration),

    /// SMTP negotiation, authentication or delivery failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Credentials would cross the network unencrypted
    #[error("refusing to send credentials without TLS to {0}")]
    InsecureAuth(String),

    /// Mailbox address could not be parsed
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Envelope could not be built (for example, no recipients)
    #[error("invalid envelope: {0}")]
    Envelope(#[from] lettre::error::Error),

    /// Settings could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl HubError {
    /// Create an invalid address error from the offending input
    #[must_use]
    pub fn invalid_address<T: Into<String>>(address: T) -> Self {
        Self::InvalidAddress(address.into())
    }
}

impl From<figment::Error> for HubError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        assert_eq!(
            HubError::ConfigurationMissing.to_string(),
            "database type not specified"
        );
        assert_eq!(
            HubError::UnsupportedBackend("oracle".into()).to_string(),
            "unsupported database type: oracle"
        );
        assert_eq!(
            HubError::InsecureAuth("smtp.example.com".into()).to_string(),
            "refusing to send credentials without TLS to smtp.example.com"
        );
        assert_eq!(
            HubError::invalid_address("not-an-address").to_string(),
            "invalid email address: not-an-address"
        );
    }

    #[test]
    fn test_read_timeout_reports_duration() {
        let err = HubError::ReadTimeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "document read timed out after 10s");
    }

    #[test]
    fn test_figment_errors_are_boxed() {
        let err: HubError = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, HubError::Config(_)));
    }
}
