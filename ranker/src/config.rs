//! Configuration for the search engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the semantic search engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Path of the durable embedding store.
    pub cache_path: PathBuf,

    /// Model to request from the provider (provider default when unset).
    pub model: Option<String>,
}

impl SearchConfig {
    /// Create a new configuration with the given store path.
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            model: None,
        }
    }

    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(
            dirs::data_dir()
                .unwrap_or_default()
                .join("semsearch/embeddings.tsv"),
        )
    }
}
