//! Error types for the search engine.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while ranking candidates.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Embedding resolution or similarity failure.
    #[error("embedding error: {0}")]
    Embedding(#[from] semsearch_embeddings::EmbeddingError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
