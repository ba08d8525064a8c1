// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding Model Loader
//!
//! Resolves the model artifacts (local files or a HuggingFace Hub repository)
//! and builds the single [`OnnxEmbeddingModel`] the service runs with.
//! Loading happens once, before the HTTP listener is bound; any error here is
//! meant to abort startup.

use crate::embeddings::onnx_model::{OnnxEmbeddingModel, SessionOptions};
use anyhow::{Context, Result};
use hf_hub::api::tokio::ApiBuilder;
use std::path::PathBuf;
use tracing::{error, info};

/// Identifier reported by `/health` and `/embed`
pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Hub repository the default model is fetched from
pub const DEFAULT_MODEL_REPO: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// all-MiniLM-L6-v2 was trained with 256-token inputs
pub const DEFAULT_MAX_LENGTH: usize = 256;

const HUB_MODEL_FILE: &str = "onnx/model.onnx";
const HUB_TOKENIZER_FILE: &str = "tokenizer.json";

/// Where the ONNX graph and tokenizer come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Pre-downloaded files on disk
    LocalFiles {
        model_path: PathBuf,
        tokenizer_path: PathBuf,
    },
    /// HuggingFace Hub repository, downloaded into the local hub cache
    Hub { repo: String },
}

/// Configuration for loading the embedding model
#[derive(Debug, Clone)]
pub struct EmbeddingModelConfig {
    /// Model name (e.g., "all-MiniLM-L6-v2")
    pub name: String,
    pub source: ModelSource,
    pub session: SessionOptions,
    /// When set, the measured output dimension must match
    pub expected_dimension: Option<usize>,
}

impl Default for EmbeddingModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL_NAME.to_string(),
            source: ModelSource::Hub {
                repo: DEFAULT_MODEL_REPO.to_string(),
            },
            session: SessionOptions {
                max_length: DEFAULT_MAX_LENGTH,
                ..SessionOptions::default()
            },
            expected_dimension: None,
        }
    }
}

impl ModelSource {
    /// Returns local paths to `(model.onnx, tokenizer.json)`, downloading from the
    /// hub when needed.
    pub async fn resolve(&self) -> Result<(PathBuf, PathBuf)> {
        match self {
            ModelSource::LocalFiles {
                model_path,
                tokenizer_path,
            } => Ok((model_path.clone(), tokenizer_path.clone())),
            ModelSource::Hub { repo } => {
                info!("Fetching model artifacts from HuggingFace Hub: {}", repo);

                let api = ApiBuilder::new()
                    .with_progress(false)
                    .build()
                    .context("Failed to initialize HuggingFace Hub client")?;
                let hub_repo = api.model(repo.clone());

                let model_path = hub_repo
                    .get(HUB_MODEL_FILE)
                    .await
                    .with_context(|| format!("Failed to fetch {} from {}", HUB_MODEL_FILE, repo))?;
                let tokenizer_path = hub_repo.get(HUB_TOKENIZER_FILE).await.with_context(|| {
                    format!("Failed to fetch {} from {}", HUB_TOKENIZER_FILE, repo)
                })?;

                Ok((model_path, tokenizer_path))
            }
        }
    }
}

/// Loads the embedding model described by `config`
///
/// # Errors
/// - Artifacts cannot be resolved (missing files, hub unreachable)
/// - ONNX Runtime or tokenizer initialization fails
/// - The measured dimension differs from `expected_dimension`
pub async fn load_model(config: EmbeddingModelConfig) -> Result<OnnxEmbeddingModel> {
    info!("Loading embedding model: {}", config.name);

    let result = async {
        let (model_path, tokenizer_path) = config.source.resolve().await?;
        let model =
            OnnxEmbeddingModel::new(config.name.clone(), model_path, tokenizer_path, config.session)
                .await?;

        if let Some(expected) = config.expected_dimension {
            if model.dimension() != expected {
                anyhow::bail!(
                    "Model {} dimension mismatch: expected {}, got {}",
                    config.name,
                    expected,
                    model.dimension()
                );
            }
        }

        Ok::<_, anyhow::Error>(model)
    }
    .await;

    match &result {
        Ok(model) => info!(
            "✓ Successfully loaded model: {} ({} dimensions)",
            model.model_name(),
            model.dimension()
        ),
        Err(e) => error!("✗ Failed to load model {}: {:#}", config.name, e),
    }

    result
}
