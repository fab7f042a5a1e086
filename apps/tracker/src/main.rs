mod api;
mod cli;
mod commands;
mod config;
mod controllers;
mod errors;
mod models;
mod notify;
mod session;
mod shell;
mod state;
mod storage;
mod transport;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Job tracker v{} using {}", env!("CARGO_PKG_VERSION"), config.api_base_url);
    debug!("State directory: {}", config.state_dir.display());

    let mut ctx = AppContext::from_config(&config)?;
    commands::run(&mut ctx, cli.command).await
}
