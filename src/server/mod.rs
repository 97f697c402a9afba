//! Server assembly: construct every component explicitly at startup,
//! then serve the API router until shutdown.
//!
//! Credential validation is fail-fast: a missing X or OpenAI variable
//! stops the process here, before the listener binds.

pub mod config;

use crate::api::{self, AppState};
use anyhow::{Context, Result};
use roost_assistant::{AssistantConfig, OpenAiCompletion, ReplyAssistant};
use roost_gateway::{Gateway, UpgradeGate, XClient, XConfig};
use roost_store::Store;
use std::sync::Arc;
use tracing::info;

use self::config::AppConfig;

/// Build all components and run the HTTP server.
pub async fn run(config: AppConfig) -> Result<()> {
    let store = Store::from_path(std::path::Path::new(&config.database_path))
        .await
        .with_context(|| format!("opening database at {}", config.database_path))?;

    let x_config = XConfig::from_env().context("loading X API credentials")?;
    let client: Arc<dyn roost_gateway::XApi> = Arc::new(XClient::new(x_config));

    let gate = UpgradeGate::from_env();
    if gate.timeline || gate.mentions {
        info!(
            timeline = gate.timeline,
            mentions = gate.mentions,
            "tier-restricted feeds are gated"
        );
    }
    let gateway = Arc::new(Gateway::new(client, store.clone(), gate));

    let assistant_config = AssistantConfig::from_env().context("loading assistant credentials")?;
    let completion = Arc::new(OpenAiCompletion::new(assistant_config));
    let assistant = Arc::new(ReplyAssistant::new(completion, store.clone()));

    let state = AppState {
        gateway,
        assistant,
        store,
    };
    let app = api::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Roost listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Roost shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
    } else {
        info!("shutdown signal received");
    }
}
