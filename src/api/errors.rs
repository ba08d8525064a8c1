// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error body shared by every failing route: `{"error": "<message>"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// `text` absent or empty (`null`, `""`, `0`, `false`, `[]`, `{}`); the
    /// model is never invoked
    #[error("No text provided")]
    MissingText,

    /// Body is not a JSON object, or `text` is not a string
    #[error("{0}")]
    InvalidBody(String),

    /// Body exceeds the configured `--max-body-bytes`
    #[error("{0}")]
    BodyTooLarge(String),

    /// The model failed to produce a usable vector
    #[error("{0}")]
    Encoding(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingText => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidBody(_) | ApiError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }

    /// Client errors are logged at `warn`, everything else at `error`
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Encoding(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
