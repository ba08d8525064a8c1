// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use local_embedding_service::{
    api::{start_server, AppState},
    config::ServiceConfig,
    embeddings::load_model,
    version,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays free for anything piping the process
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests...");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ServiceConfig::parse();

    info!(
        "Starting local embedding service {}",
        version::get_version_string()
    );
    info!("  Version:      {}", version::VERSION_NUMBER);
    info!("  Features:     {}", version::FEATURES.join(", "));

    let model_config = match config.embedding_model_config() {
        Ok(model_config) => model_config,
        Err(e) => {
            error!("❌ Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    // The model must be fully loaded before the port is bound; there is no
    // degraded mode without it.
    info!("🧠 Loading model: {}...", model_config.name);
    let model = match load_model(model_config).await {
        Ok(model) => model,
        Err(e) => {
            error!("❌ Failed to load embedding model: {:#}", e);
            error!("   Refusing to start without a model");
            std::process::exit(1);
        }
    };
    info!("✅ Model loaded ({} dimensions)", model.dimension());

    let state = AppState::new(Arc::new(model)).with_max_body_bytes(config.max_body_bytes);
    match config.max_body_bytes {
        Some(limit) => info!("  Body limit:   {} bytes", limit),
        None => info!("  Body limit:   none"),
    }

    info!("  Health:       GET  http://{}/health", config.bind_addr());
    info!("  Embed:        POST http://{}/embed", config.bind_addr());

    start_server(config.bind_addr(), state, shutdown_signal()).await
}
