// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Service configuration
//!
//! Every option can be given as a flag or an environment variable (a `.env`
//! file is loaded first by the binary). Defaults reproduce the stock service:
//! all-MiniLM-L6-v2 from the HuggingFace Hub on `0.0.0.0:5001`.

use crate::embeddings::onnx_model::SessionOptions;
use crate::embeddings::{
    EmbeddingModelConfig, ModelSource, DEFAULT_MAX_LENGTH, DEFAULT_MODEL_NAME, DEFAULT_MODEL_REPO,
};
use anyhow::{bail, Result};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5001;

/// Local sentence-embedding HTTP service
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "local-embedding-service")]
#[command(version, about = "Serves sentence embeddings from a locally loaded model", long_about = None)]
pub struct ServiceConfig {
    /// Interface to bind
    #[arg(long, env = "EMBED_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "EMBED_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Model identifier reported by /health and /embed
    #[arg(long, env = "EMBED_MODEL_NAME", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// HuggingFace Hub repository used when no local paths are given
    #[arg(long, env = "EMBED_MODEL_REPO", default_value = DEFAULT_MODEL_REPO)]
    pub model_repo: String,

    /// Local ONNX model file (requires --tokenizer-path)
    #[arg(long, env = "EMBED_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Local tokenizer.json (requires --model-path)
    #[arg(long, env = "EMBED_TOKENIZER_PATH")]
    pub tokenizer_path: Option<PathBuf>,

    /// Inputs longer than this many tokens are truncated
    #[arg(long, env = "EMBED_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Fail startup unless the model produces vectors of this length
    #[arg(long, env = "EMBED_DIMENSION")]
    pub expected_dimension: Option<usize>,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "EMBED_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Reject POST bodies larger than this many bytes (413); unlimited when unset
    #[arg(long, env = "EMBED_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            bail!("model name cannot be empty");
        }
        if self.max_length == 0 {
            bail!("max_length must be greater than 0");
        }
        if self.intra_threads == 0 {
            bail!("intra_threads must be greater than 0");
        }
        if self.expected_dimension == Some(0) {
            bail!("expected_dimension must be greater than 0");
        }
        if self.max_body_bytes == Some(0) {
            bail!("max_body_bytes must be greater than 0");
        }
        Ok(())
    }

    pub fn model_source(&self) -> Result<ModelSource> {
        match (&self.model_path, &self.tokenizer_path) {
            (Some(model_path), Some(tokenizer_path)) => Ok(ModelSource::LocalFiles {
                model_path: model_path.clone(),
                tokenizer_path: tokenizer_path.clone(),
            }),
            (None, None) => {
                if self.model_repo.trim().is_empty() {
                    bail!("model repository cannot be empty when no local paths are given");
                }
                Ok(ModelSource::Hub {
                    repo: self.model_repo.clone(),
                })
            }
            (Some(_), None) => bail!("--model-path requires --tokenizer-path"),
            (None, Some(_)) => bail!("--tokenizer-path requires --model-path"),
        }
    }

    /// Validates and converts into the loader's configuration
    pub fn embedding_model_config(&self) -> Result<EmbeddingModelConfig> {
        self.validate()?;

        Ok(EmbeddingModelConfig {
            name: self.model_name.clone(),
            source: self.model_source()?,
            session: SessionOptions {
                max_length: self.max_length,
                intra_threads: self.intra_threads,
            },
            expected_dimension: self.expected_dimension,
        })
    }
}
