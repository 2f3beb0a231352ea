//! # Input Files
//!
//! Fixtures are JSON or YAML, chosen by extension: `.yaml` and `.yml`
//! are YAML, everything else is JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Serialization format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and deserialize `path`.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let format = InputFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "loading input");
    match format {
        InputFormat::Yaml => serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing YAML {}", path.display())),
        InputFormat::Json => serde_json::from_str(&raw)
            .with_context(|| format!("parsing JSON {}", path.display())),
    }
}
