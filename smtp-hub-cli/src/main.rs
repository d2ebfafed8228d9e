//! smtp-hub CLI tool

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use smtp_hub::{observability, HubConfig};
use smtp_hub_cli::Command;

#[derive(Parser)]
#[command(name = "smtp-hub")]
#[command(version)]
#[command(about = "Store SMTP credentials in a database and send mail with them", long_about = None)]
struct Cli {
    /// Read settings from this file instead of the standard locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init().context("Failed to initialize logging")?;

    let config = match &cli.config {
        Some(path) => HubConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => HubConfig::load().context("Failed to load configuration")?,
    };

    cli.command.execute(&config).await
}
