//! Mail transport trait abstraction
//!
//! This module defines the `MailTransport` trait that every way of delivering
//! a [`SendRequest`] implements.

use async_trait::async_trait;

use super::SendRequest;
use crate::error::Result;

/// Trait for delivering one message
///
/// An implementation makes exactly one attempt per call: no retry, no
/// batching and no connection reuse across calls.
///
/// # Examples
///
/// ```rust,no_run
/// use smtp_hub::config::SmtpSettings;
/// use smtp_hub::email::{MailTransport, PlainCredentials, SendRequest, SmtpTransport};
///
/// # async fn example() -> smtp_hub::Result<()> {
/// let transport = SmtpTransport::new(SmtpSettings::default());
///
/// let request = SendRequest::new(
///     "smtp.example.com",
///     587,
///     PlainCredentials::new("a@example.com", "pw"),
///     "a@example.com",
///     ["b@example.com"],
///     "Subject: Hello\r\n\r\nHello, World!",
/// );
///
/// transport.send(request).await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send the request's message to its recipients
    ///
    /// # Errors
    ///
    /// Returns `HubError` if an address is invalid or the server rejects the
    /// connection, authentication or message.
    async fn send(&self, request: SendRequest) -> Result<()>;
}
