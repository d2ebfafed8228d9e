//! Outbound mail
//!
//! A [`SendRequest`] carries the server, a [`PlainCredentials`] value, the
//! envelope and the raw message bytes. A [`MailTransport`] delivers it in a
//! single attempt; [`SmtpTransport`] is the `lettre`-backed implementation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use smtp_hub::config::SmtpSettings;
//! use smtp_hub::email::{MailTransport, SendRequest, SmtpTransport};
//! use smtp_hub::models::SmtpConfig;
//!
//! # async fn example() -> smtp_hub::Result<()> {
//! let config = SmtpConfig::new("smtp.example.com", 587, "a@example.com", "pw");
//! let request = SendRequest::from_config(
//!     &config,
//!     ["b@example.com"],
//!     "Subject: Welcome\r\n\r\nWelcome aboard!",
//! );
//!
//! assert_eq!(request.address(), "smtp.example.com:587");
//! SmtpTransport::new(SmtpSettings::default()).send(request).await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod request;
mod sender;

pub use backend::smtp::SmtpTransport;
pub use request::{build_smtp_address, PlainCredentials, SendRequest};
pub use sender::MailTransport;

#[cfg(test)]
pub(crate) use sender::MockMailTransport;
