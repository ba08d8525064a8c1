// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the local embedding service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-local-minilm-2025-10-17";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-17";

/// Supported features in this version
pub const FEATURES: &[&str] = &["health-check", "single-text-embed", "hub-model-download"];

pub fn get_version_string() -> String {
    format!("{} ({})", VERSION, BUILD_DATE)
}
