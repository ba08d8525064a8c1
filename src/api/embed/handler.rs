// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::embeddings::TextEmbedder;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

/// POST /embed handler
///
/// # Request Body
/// ```json
/// { "text": "hello world" }
/// ```
///
/// # Responses
/// - 200 `{"embedding": [...], "dimension": 384, "model": "all-MiniLM-L6-v2"}`
/// - 400 `{"error": "No text provided"}` when `text` is missing or empty
/// - 413 `{"error": "..."}` when the body exceeds `--max-body-bytes`
/// - 500 `{"error": "<message>"}` when the body is unreadable or encoding fails
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let request = payload
        .map_err(rejection_error)
        .and_then(|Json(body)| EmbedRequest::from_body(body))
        .inspect_err(log_failure)?;

    embed_text(state.embedder.as_ref(), &request).await.map(Json)
}

fn rejection_error(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge(rejection.body_text())
    } else {
        ApiError::InvalidBody(rejection.body_text())
    }
}

fn log_failure(err: &ApiError) {
    if err.is_client_error() {
        warn!("Embed request rejected: {}", err);
    } else {
        error!("❌ Embedding failed: {}", err);
    }
}

/// Validates the request and runs it through the model.
///
/// Input errors are returned before the model is touched, so a fake embedder
/// can assert it was never called.
pub async fn embed_text(
    embedder: &dyn TextEmbedder,
    request: &EmbedRequest,
) -> Result<EmbedResponse, ApiError> {
    let result = encode(embedder, request).await;

    match &result {
        Ok(response) => info!(
            "✓ Generated embedding (dimension: {})",
            response.dimension
        ),
        Err(e) => log_failure(e),
    }

    result
}

async fn encode(
    embedder: &dyn TextEmbedder,
    request: &EmbedRequest,
) -> Result<EmbedResponse, ApiError> {
    let text = request.validate()?;

    let embedding = embedder
        .embed(text)
        .await
        .map_err(ApiError::from)?;

    if embedding.len() != embedder.dimension() {
        return Err(ApiError::Encoding(format!(
            "Unexpected embedding dimension: {} (expected {})",
            embedding.len(),
            embedder.dimension()
        )));
    }

    Ok(EmbedResponse::new(embedding, embedder.model_name()))
}
