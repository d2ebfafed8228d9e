//! `save-config` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use smtp_hub::HubConfig;

use super::{connect, SUCCESS};

/// Arguments for `save-config`
#[derive(Debug, Clone, Args)]
pub struct SaveConfigCommand {
    /// SMTP server hostname
    #[arg(long)]
    pub host: String,

    /// SMTP server port
    #[arg(long)]
    pub port: u16,

    /// Account email, used as login and sender
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

impl SaveConfigCommand {
    /// Store the config
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the insert fails.
    pub async fn execute(self, config: &HubConfig) -> Result<()> {
        let hub = connect(config).await?;
        let result = hub
            .save_config(&self.host, self.port, &self.email, &self.password)
            .await;
        hub.close().await;
        result.context("Failed to save SMTP config")?;

        println!(
            "{SUCCESS} Saved SMTP config for {} at {}",
            style(&self.email).cyan(),
            style(format!("{}:{}", self.host, self.port)).cyan()
        );
        Ok(())
    }
}
