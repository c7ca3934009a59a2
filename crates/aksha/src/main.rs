//! Aksha command-line client.
//!
//! Runs the SOS path on a Linux host: location from gpsd (or `--lat/--lng`),
//! battery from sysfs, contacts from a JSON export, and the alert handed to
//! the system `sms:` handler.

mod app;
mod cli;
mod commands;
mod config;
mod helplines;
mod location;
mod safety_tips;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::location::HostLocation;

/// Result type for commands.
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.contacts_file {
        config.contacts_file = path;
    }
    if let Some(platform) = cli.platform.as_deref() {
        config.sms_platform = platform.parse()?;
    }

    let location = HostLocation::select(cli.lat, cli.lng, &config.gpsd_addr)?;
    let app = App::new(config, location)?;

    match cli.command {
        Command::Sos { to, no_server } => commands::sos::run(&app, &to, no_server).await,
        Command::EndSos => commands::sos::end(&app).await,
        Command::Chat { message, model } => {
            commands::chat::run(&app, message.as_deref(), model.as_deref()).await
        }
        Command::Emergency {
            situation,
            location,
        } => commands::chat::emergency(&app, &situation, location.as_deref()).await,
        Command::Models => commands::chat::models(&app).await,
        Command::Login {
            clerk_id,
            session_id,
            session_token,
        } => {
            commands::account::login(
                &app,
                &clerk_id,
                session_id.as_deref(),
                session_token.as_deref(),
            )
            .await
        }
        Command::Logout => commands::account::logout(&app).await,
        Command::Whoami { verify } => commands::account::whoami(&app, verify).await,
        Command::ShareLocation => commands::location::share(&app).await,
        Command::ReportUnsafe { description } => {
            commands::location::report_unsafe(&app, &description).await
        }
        Command::Helplines { call } => commands::directory::helplines(&app, call.as_deref()).await,
        Command::Tips { topic } => commands::directory::tips(topic.as_deref()),
        Command::Contacts { all } => commands::directory::contacts(&app, all).await,
        Command::Session => commands::session::run(&app).await,
    }
}
