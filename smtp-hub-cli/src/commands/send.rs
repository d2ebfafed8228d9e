//! `send` and `send-custom` commands

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use smtp_hub::email::{
    build_smtp_address, MailTransport, PlainCredentials, SendRequest, SmtpTransport,
};
use smtp_hub::HubConfig;

use super::{connect, MessageArgs, SUCCESS};

/// Arguments for `send`
#[derive(Debug, Clone, Args)]
pub struct SendCommand {
    /// Recipient address (repeat for several)
    #[arg(short, long, required = true)]
    pub to: Vec<String>,

    /// Message to send
    #[command(flatten)]
    pub body: MessageArgs,
}

impl SendCommand {
    /// Send with the first stored config
    ///
    /// # Errors
    ///
    /// Returns an error if no config is stored, the message cannot be read or
    /// the SMTP server rejects the send.
    pub async fn execute(self, config: &HubConfig) -> Result<()> {
        let message = self.body.read()?;

        let hub = connect(config).await?;
        let result = hub.send_mail(&self.to, message).await;
        hub.close().await;
        result.context("Failed to send mail with stored SMTP config")?;

        println!("{SUCCESS} Sent to {}", style(self.to.join(", ")).cyan());
        Ok(())
    }
}

/// Arguments for `send-custom`
#[derive(Debug, Clone, Args)]
pub struct SendCustomCommand {
    /// SMTP server hostname
    #[arg(long)]
    pub host: String,

    /// SMTP server port
    #[arg(long)]
    pub port: u16,

    /// Login for `AUTH PLAIN`
    #[arg(long)]
    pub email: String,

    /// Password for `AUTH PLAIN`
    #[arg(long)]
    pub password: String,

    /// Envelope sender [default: the login email]
    #[arg(long)]
    pub from: Option<String>,

    /// Recipient address (repeat for several)
    #[arg(short, long, required = true)]
    pub to: Vec<String>,

    /// Message to send
    #[command(flatten)]
    pub body: MessageArgs,
}

impl SendCustomCommand {
    /// Build the request this command describes
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be read.
    pub fn request(&self) -> Result<SendRequest> {
        let from = self.from.as_deref().unwrap_or(&self.email);
        Ok(SendRequest::new(
            self.host.as_str(),
            self.port,
            PlainCredentials::new(self.email.as_str(), self.password.as_str()),
            from,
            &self.to,
            self.body.read()?,
        ))
    }

    /// Send without touching the database
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be read or the SMTP server
    /// rejects the send.
    pub async fn execute(self, config: &HubConfig) -> Result<()> {
        let request = self.request()?;
        let address = build_smtp_address(&self.host, self.port);

        SmtpTransport::new(config.smtp.clone())
            .send(request)
            .await
            .with_context(|| format!("Failed to send mail through {address}"))?;

        println!(
            "{SUCCESS} Sent to {} through {}",
            style(self.to.join(", ")).cyan(),
            style(address).cyan()
        );
        Ok(())
    }
}
