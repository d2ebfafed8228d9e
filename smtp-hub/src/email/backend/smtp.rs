//! SMTP transport for sending mail
//!
//! Uses the `lettre` crate to deliver raw message bytes via an SMTP server
//! with `AUTH PLAIN`.
//!
//! Credentials only travel in cleartext to a loopback server. For any other
//! host `opportunistic` is tightened to mandatory STARTTLS and `none` is
//! refused before connecting.

use std::net::IpAddr;

use async_trait::async_trait;
use lettre::{
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::{debug, info, warn};

use crate::config::{SmtpSettings, TlsMode};
use crate::email::{MailTransport, SendRequest};
use crate::error::{HubError, Result};

/// SMTP mail transport
///
/// Builds a fresh `lettre` transport for every request, so nothing is reused
/// between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use smtp_hub::config::{SmtpSettings, TlsMode};
/// use smtp_hub::email::SmtpTransport;
///
/// let transport = SmtpTransport::new(SmtpSettings {
///     tls: TlsMode::Required,
///     ..SmtpSettings::default()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct SmtpTransport {
    settings: SmtpSettings,
}

impl SmtpTransport {
    /// Create a new SMTP transport with the given settings
    #[must_use]
    pub const fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// Settings applied to every send
    #[must_use]
    pub const fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    /// TLS mode actually used for `host`
    ///
    /// # Errors
    ///
    /// Returns `HubError::InsecureAuth` when the configured mode would send
    /// credentials unencrypted to a host that is not loopback.
    pub fn effective_tls(&self, host: &str) -> Result<TlsMode> {
        if is_loopback(host) {
            return Ok(self.settings.tls);
        }

        match self.settings.tls {
            TlsMode::None => {
                warn!(host, "plaintext SMTP refused for remote host");
                Err(HubError::InsecureAuth(host.to_string()))
            }
            TlsMode::Opportunistic => Ok(TlsMode::Required),
            mode @ (TlsMode::Required | TlsMode::Wrapper) => Ok(mode),
        }
    }

    fn tls(&self, host: &str) -> Result<Tls> {
        let tls = match self.effective_tls(host)? {
            TlsMode::None => Tls::None,
            TlsMode::Opportunistic => Tls::Opportunistic(TlsParameters::new(host.to_string())?),
            TlsMode::Required => Tls::Required(TlsParameters::new(host.to_string())?),
            TlsMode::Wrapper => Tls::Wrapper(TlsParameters::new(host.to_string())?),
        };
        Ok(tls)
    }

    /// Create the `lettre` transport for one request
    fn create_transport(&self, request: &SendRequest) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(
            request.credentials.username().to_string(),
            request.credentials.password().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&request.host)
            .port(request.port)
            .tls(self.tls(&request.host)?)
            .credentials(credentials)
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(self.settings.timeout()))
            .build();

        Ok(transport)
    }
}

/// Whether `host` names this machine: `localhost` or a loopback address
fn is_loopback(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().is_ok_and(|addr| addr.is_loopback())
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, request: SendRequest) -> Result<()> {
        let envelope = request.envelope()?;
        let transport = self.create_transport(&request)?;

        debug!(
            address = %request.address(),
            tls = ?self.settings.tls,
            username = %request.credentials.username(),
            "connecting to SMTP server"
        );

        let response = transport.send_raw(&envelope, &request.message).await?;

        info!(
            address = %request.address(),
            recipients = request.to.len(),
            code = %response.code(),
            "mail sent"
        );

        Ok(())
    }
}
