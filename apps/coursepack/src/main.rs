mod artifacts;
mod calendar;
mod cli;
mod config;
mod errors;
mod llm_client;
mod planning;
mod toc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Environment first: .env may carry RUST_LOG and GEMINI_API_KEY
    let settings = Settings::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &settings.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    cli::run(cli, &settings).await
}
