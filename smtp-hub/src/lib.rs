//! smtp-hub: send mail with SMTP credentials kept in a database
//!
//! Credentials are stored as [`SmtpConfig`] records in one of four backends,
//! chosen at run time by the `DATABASE_TYPE` selector:
//!
//! - `postgres`, `mysql`, `sqlite` through `sqlx` pools
//! - `mongodb` through the official driver, reads bounded by a timeout
//!
//! Mail goes out through `lettre` with `AUTH PLAIN`, either with the first
//! stored record or with credentials supplied by the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # async fn example() -> smtp_hub::Result<()> {
//! // DATABASE_TYPE=sqlite SQLITE_URL=sqlite://hub.db
//! smtp_hub::save_config("smtp.example.com", 587, "a@example.com", "pw").await?;
//! smtp_hub::send_mail(["b@example.com"], "Subject: Hi\r\n\r\nHello").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Long-lived callers open an [`SmtpHub`] once instead:
//!
//! ```rust,no_run
//! use smtp_hub::prelude::*;
//!
//! # async fn example() -> smtp_hub::Result<()> {
//! let hub = SmtpHub::connect(&HubConfig::load()?).await?;
//! for config in hub.configs().await? {
//!     println!("{config:?}");
//! }
//! hub.close().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod email;
pub mod error;
pub mod hub;
pub mod models;
pub mod observability;
pub mod store;
pub mod testing;

pub use config::HubConfig;
pub use database::{BackendKind, Connection};
pub use error::{HubError, Result};
pub use hub::{save_config, send_mail, send_mail_custom, SmtpHub};
pub use models::SmtpConfig;
pub use store::ConfigStore;

/// Common imports
pub mod prelude {
    pub use crate::config::{HubConfig, SmtpSettings, TlsMode};
    pub use crate::database::{BackendKind, Connection};
    pub use crate::email::{MailTransport, SendRequest, SmtpTransport};
    pub use crate::error::{HubError, Result};
    pub use crate::hub::SmtpHub;
    pub use crate::models::SmtpConfig;
    pub use crate::store::ConfigStore;
}
