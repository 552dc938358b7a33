use clap::{Parser, Subcommand};
use colored::*;
use opshub_client::{SettingsClient, SettingsEditor};
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{EditArgs, UploadArgs};
use config::Config;

#[derive(Parser)]
#[command(name = "opshub")]
#[command(about = "Opshub CLI - console system settings administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current system settings
    Show,
    /// Change settings fields and save
    Edit(EditArgs),
    /// Upload a favicon or logo and save the new reference
    Upload(UploadArgs),
    /// Restore the server-side default settings
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Using console API");

    let client = SettingsClient::new(&config.api_url, &config.token)?;
    let mut editor = SettingsEditor::new(client);

    let result = match cli.command {
        Commands::Show => commands::handle_show(&mut editor).await,
        Commands::Edit(args) => commands::handle_edit(&mut editor, args).await,
        Commands::Upload(args) => commands::handle_upload(&mut editor, args).await,
        Commands::Reset => commands::handle_reset(&mut editor).await,
    };

    // Every failure is a transient notice to the operator, never a panic.
    if let Err(e) = result {
        eprintln!("❌ {}", e.to_string().red());
        process::exit(1);
    }

    Ok(())
}
