// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Sentence embedding models
//!
//! The HTTP layer only sees the [`TextEmbedder`] trait. The production
//! implementation is [`OnnxEmbeddingModel`] (all-MiniLM-L6-v2 on ONNX Runtime),
//! built once at startup by [`load_model`].

pub mod model_loader;
pub mod onnx_model;
pub mod pooling;

pub use model_loader::{
    load_model, EmbeddingModelConfig, ModelSource, DEFAULT_MAX_LENGTH, DEFAULT_MODEL_NAME,
    DEFAULT_MODEL_REPO,
};
pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// A loaded, read-only model mapping text to a fixed-length vector.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Encodes a single text. The returned vector has `dimension()` entries.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension of the model (384 for all-MiniLM-L6-v2)
    fn dimension(&self) -> usize;

    /// Identifier reported to clients, constant for the process lifetime
    fn model_name(&self) -> &str;
}

#[async_trait]
impl TextEmbedder for OnnxEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        OnnxEmbeddingModel::embed(self, text).await
    }

    fn dimension(&self) -> usize {
        OnnxEmbeddingModel::dimension(self)
    }

    fn model_name(&self) -> &str {
        OnnxEmbeddingModel::model_name(self)
    }
}
