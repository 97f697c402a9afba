//! Roost - personal X dashboard core
//!
//! CLI entry point for the Roost server.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roost=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = server::config::Cli::parse();
    let config = server::config::AppConfig::load(cli);

    info!("Starting Roost v{}", env!("CARGO_PKG_VERSION"));

    server::run(config).await
}
