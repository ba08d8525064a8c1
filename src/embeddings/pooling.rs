// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Sentence pooling over token-level model output.
//!
//! all-MiniLM-L6-v2 emits one vector per token (`[seq_len, hidden_dim]`). The
//! sentence embedding is the attention-weighted mean of those vectors, scaled to
//! unit length.

use ndarray::ArrayView2;

/// Mean pooling weighted by the attention mask.
///
/// Padding positions (mask 0) do not contribute. An all-zero mask yields a
/// zero vector rather than NaNs.
pub fn mean_pool(token_embeddings: ArrayView2<'_, f32>, attention_mask: &[i64]) -> Vec<f32> {
    let hidden_dim = token_embeddings.ncols();

    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for (i, row) in token_embeddings.outer_iter().enumerate() {
        let mask_value = attention_mask.get(i).copied().unwrap_or(0) as f32;
        if mask_value == 0.0 {
            continue;
        }
        sum_mask += mask_value;
        for (acc, value) in pooled.iter_mut().zip(row.iter()) {
            *acc += value * mask_value;
        }
    }

    for val in &mut pooled {
        *val /= sum_mask.max(1e-9);
    }

    pooled
}

/// Scales `vector` to unit L2 norm in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-12 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
