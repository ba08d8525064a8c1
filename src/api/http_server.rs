// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use super::{embed_handler, health_handler};
use crate::embeddings::TextEmbedder;

/// Shared router state: the read-only model loaded at startup
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn TextEmbedder>,
    /// Request body cap in bytes; `None` accepts any size
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            max_body_bytes: None,
        }
    }

    pub fn with_max_body_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    // axum caps extracted bodies at 2 MB unless told otherwise
    let body_limit = match state.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        // Liveness check
        .route("/health", get(health_handler))
        // Single-text embedding endpoint
        .route("/embed", post(embed_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until `shutdown` resolves.
///
/// In-flight requests are allowed to finish once shutdown starts.
pub async fn start_server<F>(addr: SocketAddr, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let model_name = state.embedder.model_name().to_string();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        "🚀 Local embedding service ({}) listening on http://{}",
        model_name,
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Embedding service stopped");
    Ok(())
}
