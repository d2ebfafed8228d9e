//! Facade over the dispatcher, the config repository and the mail sender
//!
//! [`SmtpHub`] owns one store and one transport. Open it once with
//! [`SmtpHub::connect`] and reuse it, or inject your own store and transport
//! with [`SmtpHub::new`].
//!
//! The free functions [`send_mail`], [`send_mail_custom`] and [`save_config`]
//! load [`HubConfig`] from the environment on every call, open a connection,
//! run one operation and close it again.

use tracing::{debug, info, warn};

use crate::config::HubConfig;
use crate::database::Connection;
use crate::email::{MailTransport, PlainCredentials, SendRequest, SmtpTransport};
use crate::error::{HubError, Result};
use crate::models::SmtpConfig;
use crate::store::ConfigStore;

/// Stored-credential mail sender
///
/// # Examples
///
/// ```rust,no_run
/// use smtp_hub::{HubConfig, SmtpHub};
///
/// # async fn example() -> smtp_hub::Result<()> {
/// let hub = SmtpHub::connect(&HubConfig::load()?).await?;
///
/// hub.save_config("smtp.example.com", 587, "a@example.com", "pw").await?;
/// hub.send_mail(["b@example.com"], "Subject: Hi\r\n\r\nHello").await?;
///
/// hub.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmtpHub<S = Connection, T = SmtpTransport> {
    store: S,
    transport: T,
}

impl SmtpHub {
    /// Open the configured backend and build the SMTP transport
    ///
    /// # Errors
    ///
    /// - `HubError::ConfigurationMissing` if no backend is selected
    /// - `HubError::UnsupportedBackend` for an unknown selector
    /// - the connector's error if the backend cannot be opened
    pub async fn connect(config: &HubConfig) -> Result<Self> {
        let store = Connection::open(&config.database).await?;
        Ok(Self::new(store, SmtpTransport::new(config.smtp.clone())))
    }
}

impl<T: Send> SmtpHub<Connection, T> {
    /// Release the database connection
    pub async fn close(self) {
        self.store.close().await;
    }
}

impl<S, T> SmtpHub<S, T> {
    /// Assemble a hub from an existing store and transport
    #[must_use]
    pub const fn new(store: S, transport: T) -> Self {
        Self { store, transport }
    }

    /// Config store backing this hub
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Transport used for every send
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<S: ConfigStore, T: MailTransport> SmtpHub<S, T> {
    /// Send `message` using the first stored SMTP config
    ///
    /// The record's email is the login and the envelope sender; its host and
    /// port name the server.
    ///
    /// # Errors
    ///
    /// - `HubError::NoSmtpConfig` if the store is empty
    /// - the store's error if the records cannot be read
    /// - the transport's error if the send fails
    pub async fn send_mail(
        &self,
        to: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let to: Vec<String> = to.into_iter().map(Into::into).collect();
        let message = message.into();

        let configs = self.store.list().await?;
        let Some(config) = configs.first() else {
            warn!("no smtp config stored");
            return Err(HubError::NoSmtpConfig);
        };

        let request = SendRequest::from_config(config, to, message);
        debug!(
            address = %request.address(),
            stored = configs.len(),
            "sending with stored smtp config"
        );
        self.transport.send(request).await
    }

    /// Send `message` with caller-supplied server and credentials
    ///
    /// The store is not touched. `email`/`password` authenticate; `from` is
    /// the envelope sender.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the send fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_mail_custom(
        &self,
        host: &str,
        port: u16,
        email: &str,
        password: &str,
        from: &str,
        to: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let request = SendRequest::new(
            host,
            port,
            PlainCredentials::new(email, password),
            from,
            to,
            message,
        );
        debug!(address = %request.address(), "sending with custom credentials");
        self.transport.send(request).await
    }

    /// Store a new SMTP config
    ///
    /// Values are not validated; duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    pub async fn save_config(
        &self,
        host: &str,
        port: u16,
        email: &str,
        password: &str,
    ) -> Result<()> {
        let config = SmtpConfig::new(host, port, email, password);
        self.store.insert(&config).await?;
        info!(host = %config.host, port = config.port, email = %config.email, "smtp config saved");
        Ok(())
    }

    /// Every stored SMTP config, oldest first
    ///
    /// # Errors
    ///
    /// Returns the store's error if the read fails.
    pub async fn configs(&self) -> Result<Vec<SmtpConfig>> {
        self.store.list().await
    }
}

/// Send `message` with the first stored SMTP config
///
/// Loads [`HubConfig`] from the environment, so a changed `DATABASE_TYPE`
/// applies on the next call.
///
/// # Errors
///
/// Every error of [`HubConfig::load`], [`SmtpHub::connect`] and
/// [`SmtpHub::send_mail`].
pub async fn send_mail(
    to: impl IntoIterator<Item = impl Into<String>>,
    message: impl Into<Vec<u8>>,
) -> Result<()> {
    let to: Vec<String> = to.into_iter().map(Into::into).collect();
    let message = message.into();

    let config = HubConfig::load()?;
    let hub = SmtpHub::connect(&config).await?;
    let result = hub.send_mail(to, message).await;
    hub.close().await;
    result
}

/// Send `message` with caller-supplied server and credentials
///
/// No database is opened; only the SMTP settings of [`HubConfig`] are used.
///
/// # Errors
///
/// Returns `HubError::Config` if settings cannot be loaded, otherwise the
/// transport's error.
#[allow(clippy::too_many_arguments)]
pub async fn send_mail_custom(
    host: &str,
    port: u16,
    email: &str,
    password: &str,
    from: &str,
    to: impl IntoIterator<Item = impl Into<String>>,
    message: impl Into<Vec<u8>>,
) -> Result<()> {
    let config = HubConfig::load()?;
    let transport = SmtpTransport::new(config.smtp);
    let request = SendRequest::new(
        host,
        port,
        PlainCredentials::new(email, password),
        from,
        to,
        message,
    );
    transport.send(request).await
}

/// Store a new SMTP config in the configured backend
///
/// # Errors
///
/// Every error of [`HubConfig::load`], [`SmtpHub::connect`] and
/// [`SmtpHub::save_config`].
pub async fn save_config(host: &str, port: u16, email: &str, password: &str) -> Result<()> {
    let config = HubConfig::load()?;
    let hub = SmtpHub::connect(&config).await?;
    let result = hub.save_config(host, port, email, password).await;
    hub.close().await;
    result
}

#[cfg(test)]
mod tests {
    use mockall::predicate::function;

    use super::*;
    use crate::email::MockMailTransport;
    use crate::testing::MemoryStore;

    fn stored(host: &str, email: &str) -> SmtpConfig {
        SmtpConfig::new(host, 587, email, "pw")
    }

    #[tokio::test]
    async fn test_send_mail_with_empty_store() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().never();
        let hub = SmtpHub::new(MemoryStore::new(), transport);

        assert!(matches!(
            hub.send_mail(["b@example.com"], "body").await,
            Err(HubError::NoSmtpConfig)
        ));
    }

    #[tokio::test]
    async fn test_send_mail_uses_first_record() {
        let store = MemoryStore::with_records([
            stored("first.example.com", "first@example.com"),
            stored("second.example.com", "second@example.com"),
        ]);
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .with(function(|request: &SendRequest| {
                request.address() == "first.example.com:587"
                    && request.from == "first@example.com"
                    && request.credentials == PlainCredentials::new("first@example.com", "pw")
                    && request.to == ["b@example.com"]
                    && request.message == b"body"
            }))
            .times(1)
            .returning(|_| Ok(()));
        let hub = SmtpHub::new(store, transport);

        hub.send_mail(["b@example.com"], "body").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_mail_propagates_transport_error() {
        let store = MemoryStore::with_records([stored("smtp.example.com", "a@example.com")]);
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|request| Err(HubError::invalid_address(request.from)));
        let hub = SmtpHub::new(store, transport);

        assert!(matches!(
            hub.send_mail(["b@example.com"], "body").await,
            Err(HubError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_send_mail_with_closed_store() {
        let store = MemoryStore::with_records([stored("smtp.example.com", "a@example.com")]);
        store.close();
        let mut transport = MockMailTransport::new();
        transport.expect_send().never();
        let hub = SmtpHub::new(store, transport);

        assert!(matches!(
            hub.send_mail(["b@example.com"], "body").await,
            Err(HubError::NoConnection)
        ));
    }

    #[tokio::test]
    async fn test_send_mail_custom_bypasses_store() {
        let store = MemoryStore::new();
        store.close();
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .with(function(|request: &SendRequest| {
                request.address() == "smtp.example.com:587"
                    && request.credentials.username() == "a@example.com"
                    && request.credentials.password() == "pw"
                    && request.from == "noreply@example.com"
                    && request.to == ["b@example.com", "c@example.com"]
            }))
            .times(1)
            .returning(|_| Ok(()));
        let hub = SmtpHub::new(store, transport);

        hub.send_mail_custom(
            "smtp.example.com",
            587,
            "a@example.com",
            "pw",
            "noreply@example.com",
            ["b@example.com", "c@example.com"],
            "Subject: Hi\r\n\r\nHello",
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_save_config_then_configs() {
        let hub = SmtpHub::new(MemoryStore::new(), MockMailTransport::new());

        hub.save_config("smtp.example.com", 587, "a@example.com", "pw")
            .await
            .unwrap();
        hub.save_config("smtp.example.com", 587, "a@example.com", "pw")
            .await
            .unwrap();

        let configs = hub.configs().await.unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0], stored("smtp.example.com", "a@example.com"));
    }

    #[tokio::test]
    async fn test_save_config_keeps_unvalidated_values() {
        let hub = SmtpHub::new(MemoryStore::new(), MockMailTransport::new());

        hub.save_config("", 0, "", "").await.unwrap();

        assert_eq!(hub.store().records(), vec![SmtpConfig::new("", 0, "", "")]);
    }

    #[test]
    fn test_free_functions_require_selector() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("DATABASE_TYPE", "");
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                assert!(matches!(
                    send_mail(["b@example.com"], "body").await,
                    Err(HubError::ConfigurationMissing)
                ));
                assert!(matches!(
                    save_config("smtp.example.com", 587, "a@example.com", "pw").await,
                    Err(HubError::ConfigurationMissing)
                ));
            });
            Ok(())
        });
    }
}
