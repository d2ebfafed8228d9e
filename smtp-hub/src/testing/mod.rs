//! Test doubles for the storage and transport seams
//!
//! [`MemoryStore`] stands in for a database and [`RecordingTransport`] for an
//! SMTP server, so [`SmtpHub`](crate::SmtpHub) can be exercised without either.
//!
//! ```rust
//! use smtp_hub::testing::{MemoryStore, RecordingTransport};
//! use smtp_hub::SmtpHub;
//!
//! # async fn example() -> smtp_hub::Result<()> {
//! let transport = RecordingTransport::new();
//! let hub = SmtpHub::new(MemoryStore::new(), transport.clone());
//!
//! hub.save_config("smtp.example.com", 587, "a@example.com", "pw").await?;
//! hub.send_mail(["b@example.com"], "Subject: Hi\r\n\r\nHello").await?;
//!
//! assert_eq!(transport.sent_count(), 1);
//! assert!(transport.was_sent_to("b@example.com"));
//! # Ok(())
//! # }
//! ```

mod store;
mod transport;

pub use store::MemoryStore;
pub use transport::RecordingTransport;
