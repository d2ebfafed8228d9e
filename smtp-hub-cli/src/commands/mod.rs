//! CLI command implementations

pub mod list;
pub mod save;
pub mod send;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::Emoji;
use smtp_hub::{HubConfig, SmtpHub};

pub use list::ListConfigsCommand;
pub use save::SaveConfigCommand;
pub use send::{SendCommand, SendCustomCommand};

pub(crate) static SUCCESS: Emoji = Emoji("✓", "√");
pub(crate) static INFO: Emoji = Emoji("ℹ", "i");

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an SMTP config in the selected database
    SaveConfig(SaveConfigCommand),
    /// Send a message with the first stored SMTP config
    Send(SendCommand),
    /// Send a message with credentials given on the command line
    SendCustom(SendCustomCommand),
    /// Show stored SMTP configs with passwords masked
    ListConfigs(ListConfigsCommand),
}

impl Command {
    /// Run the command against `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, the message cannot
    /// be read, or the hub operation fails.
    pub async fn execute(self, config: &HubConfig) -> Result<()> {
        match self {
            Self::SaveConfig(cmd) => cmd.execute(config).await,
            Self::Send(cmd) => cmd.execute(config).await,
            Self::SendCustom(cmd) => cmd.execute(config).await,
            Self::ListConfigs(cmd) => cmd.execute(config).await,
        }
    }
}

/// Message body, given inline or as a file
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct MessageArgs {
    /// Complete message text, headers included
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the complete message from this file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl MessageArgs {
    /// Raw message bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or neither source is set.
    pub fn read(&self) -> Result<Vec<u8>> {
        match (&self.message, &self.file) {
            (Some(text), _) => Ok(text.clone().into_bytes()),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("Failed to read message file {}", path.display())),
            (None, None) => bail!("Either --message or --file is required"),
        }
    }
}

/// Open the configured database
pub(crate) async fn connect(config: &HubConfig) -> Result<SmtpHub> {
    let backend = config.database.kind.as_deref().unwrap_or("<unset>");
    SmtpHub::connect(config)
        .await
        .with_context(|| format!("Failed to open database (DATABASE_TYPE={backend})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_message_wins() {
        let args = MessageArgs {
            message: Some("Subject: Hi\r\n\r\nHello".to_string()),
            file: None,
        };
        assert_eq!(args.read().unwrap(), b"Subject: Hi\r\n\r\nHello");
    }

    #[test]
    fn test_missing_message_source() {
        let args = MessageArgs {
            message: None,
            file: None,
        };
        assert!(args.read().is_err());
    }
}
