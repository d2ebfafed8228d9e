//! `list-configs` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use smtp_hub::{HubConfig, SmtpConfig};

use super::{connect, INFO};

/// Arguments for `list-configs`
#[derive(Debug, Clone, Args)]
pub struct ListConfigsCommand {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// A stored config as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigView {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// Account email
    pub email: String,
    /// Masked password
    pub password: String,
}

impl From<&SmtpConfig> for ConfigView {
    fn from(config: &SmtpConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            email: config.email.clone(),
            password: mask_password(&config.password),
        }
    }
}

/// Replace a password with a fixed-width mask; an empty one stays empty
#[must_use]
pub fn mask_password(password: &str) -> String {
    if password.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

impl ListConfigsCommand {
    /// Print every stored config
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or read.
    pub async fn execute(self, config: &HubConfig) -> Result<()> {
        let hub = connect(config).await?;
        let result = hub.configs().await;
        hub.close().await;
        let views: Vec<ConfigView> = result
            .context("Failed to read SMTP configs")?
            .iter()
            .map(ConfigView::from)
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&views)?);
            return Ok(());
        }

        let header = format!(
            "{:<4} {:<32} {:<6} {:<32} {:<10}",
            "#", "Host", "Port", "Email", "Password"
        );

        println!("\n{INFO} Stored SMTP configs");
        println!();
        println!("{}", style(header).bold());
        println!("{}", "─".repeat(88));

        if views.is_empty() {
            println!("  {}", style("(No SMTP configs stored)").dim());
        }
        for (index, view) in views.iter().enumerate() {
            let marker = if index == 0 { "*" } else { " " };
            println!(
                "{:<4} {:<32} {:<6} {:<32} {:<10}",
                format!("{}{marker}", index + 1),
                style(&view.host).cyan(),
                view.port,
                view.email,
                style(&view.password).dim()
            );
        }
        println!();
        if !views.is_empty() {
            println!("{INFO} `send` uses the config marked with *");
        }

        Ok(())
    }
}
