// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for POST /embed

use crate::api::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for POST /embed
///
/// ```json
/// { "text": "hello world" }
/// ```
///
/// `text` is kept as a raw JSON value so that every "empty" value (absent,
/// `null`, `""`, `0`, `false`, `[]`, `{}`) gets the same 400 from
/// [`EmbedRequest::validate`] instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

impl EmbedRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(Value::String(text.into())),
        }
    }

    /// Builds a request from an already-parsed JSON body.
    ///
    /// Anything other than a JSON object is a server-side failure (500), the
    /// same as an encoding error.
    pub fn from_body(body: Value) -> Result<Self, ApiError> {
        match body {
            Value::Object(mut fields) => Ok(Self {
                text: fields.remove("text"),
            }),
            other => Err(ApiError::InvalidBody(format!(
                "request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the text to encode.
    ///
    /// Empty values are rejected with [`ApiError::MissingText`]; whitespace-only
    /// text is passed through unchanged. A non-empty value that is not a string
    /// cannot be encoded and is reported as [`ApiError::InvalidBody`].
    pub fn validate(&self) -> Result<&str, ApiError> {
        match &self.text {
            None => Err(ApiError::MissingText),
            Some(value) if is_empty_value(value) => Err(ApiError::MissingText),
            Some(Value::String(text)) => Ok(text),
            Some(other) => Err(ApiError::InvalidBody(format!(
                "text must be a string, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
