// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use super::fake_embedder::{get_health, json_body, post_embed, FakeEmbedder, FAKE_MODEL};
use axum::http::StatusCode;
use local_embedding_service::api::{create_app, AppState};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_model() {
    let app = create_app(AppState::new(FakeEmbedder::new()));

    let response = app.oneshot(get_health()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body,
        serde_json::json!({"status": "healthy", "model": FAKE_MODEL})
    );
}

#[tokio::test]
async fn test_health_unaffected_by_embed_calls() {
    let embedder = FakeEmbedder::failing("boom");
    let app = create_app(AppState::new(embedder.clone()));

    let before = json_body(app.clone().oneshot(get_health()).await.unwrap()).await;

    let failed = app.clone().oneshot(post_embed(r#"{"text": "x"}"#)).await.unwrap();
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let rejected = app.clone().oneshot(post_embed("{}")).await.unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let after = app.oneshot(get_health()).await.unwrap();
    assert_eq!(after.status(), StatusCode::OK);
    assert_eq!(json_body(after).await, before);
    assert_eq!(embedder.calls(), 1);
}

#[tokio::test]
async fn test_health_never_invokes_model() {
    let embedder = FakeEmbedder::new();
    let app = create_app(AppState::new(embedder.clone()));

    for _ in 0..3 {
        let response = app.clone().oneshot(get_health()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(embedder.calls(), 0);
}
