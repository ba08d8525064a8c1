// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed through the full router
//!
//! These tests verify that the embed route:
//! - Returns the vector, its dimension and the model name on success
//! - Rejects missing or empty text with 400 without touching the model
//! - Accepts bodies of any size unless a limit is configured
//! - Reports unreadable bodies and encoder failures as 500 `{"error": ...}`

use super::fake_embedder::{
    json_body, post_embed, send, send_with_state, FakeEmbedder, FAKE_DIMENSION, FAKE_MODEL,
};
use axum::{body::Body, http::{Request, StatusCode}};
use local_embedding_service::api::AppState;
use serde_json::json;

// ========== SUCCESS CASES ==========

#[tokio::test]
async fn test_embed_hello_world() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed(r#"{"text": "hello world"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["dimension"], FAKE_DIMENSION);
    assert_eq!(body["model"], FAKE_MODEL);
    assert_eq!(body["embedding"].as_array().unwrap().len(), FAKE_DIMENSION);
    assert!(body["embedding"].as_array().unwrap().iter().all(|v| v.is_f64()));
    assert_eq!(embedder.calls(), 1);
}

#[tokio::test]
async fn test_embed_is_deterministic() {
    let embedder = FakeEmbedder::new();

    let first = json_body(send(embedder.clone(), post_embed(r#"{"text": "same input"}"#)).await).await;
    let second = json_body(send(embedder.clone(), post_embed(r#"{"text": "same input"}"#)).await).await;

    assert_eq!(first["embedding"], second["embedding"]);
    assert_eq!(embedder.calls(), 2);
}

#[tokio::test]
async fn test_whitespace_text_is_encoded() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed(r#"{"text": "   "}"#)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(embedder.calls(), 1);
}

#[tokio::test]
async fn test_text_over_two_megabytes_is_encoded() {
    let embedder = FakeEmbedder::new();
    let body = json!({ "text": "word ".repeat(600_000) }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let response = send(embedder.clone(), post_embed(&body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["dimension"], FAKE_DIMENSION);
    assert_eq!(embedder.calls(), 1);
}

// ========== CLIENT ERRORS ==========

#[tokio::test]
async fn test_missing_text_returns_400() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed("{}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body, json!({"error": "No text provided"}));
    assert_eq!(embedder.calls(), 0, "model must not be invoked");
}

#[tokio::test]
async fn test_empty_text_returns_400() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed(r#"{"text": ""}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "No text provided");
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_empty_json_values_return_400() {
    for text in [json!(null), json!(0), json!(false), json!([]), json!({})] {
        let embedder = FakeEmbedder::new();
        let body = json!({ "text": text.clone() }).to_string();

        let response = send(embedder.clone(), post_embed(&body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "text = {}", text);

        let body = json_body(response).await;
        assert_eq!(body, json!({"error": "No text provided"}));
        assert_eq!(embedder.calls(), 0);
    }
}

#[tokio::test]
async fn test_configured_body_limit_returns_413() {
    let embedder = FakeEmbedder::new();
    let state = AppState::new(embedder.clone()).with_max_body_bytes(Some(64));
    let body = json!({ "text": "word ".repeat(100) }).to_string();

    let response = send_with_state(state, post_embed(&body)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_get_on_embed_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/embed")
        .body(Body::empty())
        .unwrap();

    let response = send(FakeEmbedder::new(), request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ========== SERVER ERRORS ==========

#[tokio::test]
async fn test_malformed_json_returns_500_with_error_field() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed("{not json")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_non_string_text_returns_500() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed(r#"{"text": 42}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body, json!({"error": "text must be a string, got number"}));
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_null_body_returns_500() {
    let embedder = FakeEmbedder::new();

    let response = send(embedder.clone(), post_embed("null")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("JSON object"));
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_missing_content_type_returns_500() {
    let embedder = FakeEmbedder::new();

    let request = Request::builder()
        .method("POST")
        .uri("/embed")
        .body(Body::from(r#"{"text": "hello"}"#))
        .unwrap();

    let response = send(embedder.clone(), request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_encoder_failure_returns_500_with_message() {
    let embedder = FakeEmbedder::failing("ONNX session exploded");

    let response = send(embedder.clone(), post_embed(r#"{"text": "hello"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body, json!({"error": "ONNX session exploded"}));
    assert_eq!(embedder.calls(), 1);
}
