// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running
//! the all-MiniLM-L6-v2 sentence transformer model.
//!
//! Features:
//! - ONNX model loading from disk
//! - BERT tokenization with truncation to the model's max sequence length
//! - Mean pooling over token embeddings, then L2 normalization
//! - Output dimension measured from the graph at load time (384 for MiniLM)

use crate::embeddings::pooling::{l2_normalize, mean_pool};
use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, Axis, Ix2};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Encoding, Tokenizer, TruncationParams};
use tracing::{debug, info};

/// Runtime knobs for an ONNX session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Maximum sequence length in tokens; longer inputs are truncated
    pub max_length: usize,
    /// ONNX Runtime intra-op thread count
    pub intra_threads: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_length: 256,
            intra_threads: 4,
        }
    }
}

/// ONNX-based embedding model (all-MiniLM-L6-v2)
///
/// The model uses a sentence transformer architecture with:
/// - BERT-based tokenizer
/// - Mean pooling over token embeddings
/// - L2 normalization of the pooled vector
///
/// # Thread Safety
/// All fields are wrapped in Arc for cheap cloning and thread-safe sharing.
/// Running the session needs exclusive access, so concurrent encodes take turns
/// on the session mutex.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    /// ONNX Runtime session
    session: Arc<Mutex<Session>>,

    /// BERT tokenizer, truncation configured
    tokenizer: Arc<Tokenizer>,

    /// Model name (e.g., "all-MiniLM-L6-v2")
    model_name: String,

    /// Output dimension, measured by the validation inference
    dimension: usize,

    /// Maximum sequence length (256 for all-MiniLM-L6-v2)
    max_length: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - Tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The validation inference does not produce `[batch, seq_len, hidden]` output
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "all-MiniLM-L6-v2",
    ///     "./models/all-MiniLM-L6-v2-onnx/model.onnx",
    ///     "./models/all-MiniLM-L6-v2-onnx/tokenizer.json",
    ///     SessionOptions::default(),
    /// ).await?;
    /// ```
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        options: SessionOptions,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }
        if options.max_length == 0 {
            anyhow::bail!("max_length must be greater than 0");
        }

        info!(
            "Initializing ONNX session from {} ({} intra-op threads)",
            model_path.display(),
            options.intra_threads
        );

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(options.intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: options.max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure tokenizer truncation: {}", e))?;

        // Validation run: confirms the graph accepts our inputs and tells us the hidden size
        let dimension = {
            let sample = tokenizer
                .encode("validation test", true)
                .map_err(|e| anyhow!("Tokenizer validation failed: {}", e))?;
            let pooled = run_and_pool(&mut session, &sample)?;
            pooled.len()
        };

        if dimension == 0 {
            anyhow::bail!("Model produced an empty embedding during validation");
        }

        info!(
            "✅ ONNX embedding model loaded: {} ({} dimensions)",
            model_name, dimension
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
            max_length: options.max_length,
        })
    }

    /// Generates the embedding for a single text
    ///
    /// Tokenization and inference are CPU-bound, so the work is moved to the
    /// blocking thread pool.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = self.clone();
        let text = text.to_owned();

        tokio::task::spawn_blocking(move || model.embed_blocking(&text))
            .await
            .context("Embedding task panicked")?
    }

    /// Synchronous encode: tokenize, run, mean-pool, normalize
    pub fn embed_blocking(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        let embedding = {
            let mut session_guard = self
                .session
                .lock()
                .map_err(|_| anyhow!("ONNX session lock poisoned"))?;
            run_and_pool(&mut session_guard, &encoding)?
        };

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        debug!(tokens = encoding.len(), "encoded text");
        Ok(embedding)
    }

    /// Counts tokens (including special tokens) after truncation
    pub fn count_tokens(&self, text: &str) -> Result<usize> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        Ok(encoding.get_attention_mask().iter().map(|&m| m as usize).sum())
    }

    /// Returns the output dimension of this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the truncation length in tokens
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Runs one encoding through the session and returns the pooled, normalized vector.
fn run_and_pool(session: &mut Session, encoding: &Encoding) -> Result<Vec<f32>> {
    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let token_type_ids: Vec<i64> = vec![0i64; input_ids.len()];

    let seq_len = input_ids.len();
    let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
        .context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
        .context("Failed to create attention_mask array")?;
    let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
        .context("Failed to create token_type_ids array")?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids_array)?,
        "attention_mask" => Value::from_array(attention_mask_array)?,
        "token_type_ids" => Value::from_array(token_type_ids_array)?
    ])?;

    // Index [0] rather than a name: exports differ in what they call the output
    let output_array = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;

    // Token-level embeddings: [batch, seq_len, hidden_dim]
    if output_array.ndim() != 3 {
        anyhow::bail!(
            "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden])",
            output_array.shape()
        );
    }

    let token_embeddings = output_array
        .index_axis(Axis(0), 0)
        .into_dimensionality::<Ix2>()
        .context("Failed to view token embeddings as a matrix")?;

    let mut pooled = mean_pool(token_embeddings, &attention_mask);
    l2_normalize(&mut pooled);

    Ok(pooled)
}
