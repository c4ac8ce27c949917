//! # vine-daemon
//!
//! The Vine referral engine daemon.
//!
//! Serves the engine's three inbound triggers over HTTP: normalized
//! email delivery, reshare landing links, and store change
//! notifications. Runs against the in-memory directory store in local
//! mode; production deployments swap the collaborators at the trait
//! seams.
//!
//! ## Usage
//!
//! ```text
//! vine-daemon --config vine.toml
//! vine-daemon --listen 0.0.0.0:8660
//! ```

mod config;
mod mailer;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::VineConfig;
use routes::{app, AppState};

/// Vine referral engine daemon.
#[derive(Parser)]
#[command(name = "vine-daemon", about = "Vine referral engine daemon")]
struct Cli {
    /// Path to a vine.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen address from the config.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vine_daemon=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => VineConfig::load(path)?,
        None => VineConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    tracing::info!("starting vine daemon");
    tracing::info!("mail domain: {}", config.mail_domain);

    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("listening on {}", listen_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
