//! # Ranker
//!
//! This crate provides top-k semantic similarity search: given a query
//! string and a list of candidate strings, it ranks the candidates by
//! embedding similarity to the query.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     SemanticSearch                         │
//! ├────────────────────────────────────────────────────────────┤
//! │                                                            │
//! │  query ──► resolve ──► CachedProvider ──► cache │ provider │
//! │                │                                           │
//! │                ▼                                           │
//! │         cosine_similarity per candidate                    │
//! │                │                                           │
//! │                ▼                                           │
//! │         sort descending, truncate to k                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use semsearch_ranker::{SearchConfig, SemanticSearch};
//! use semsearch_embeddings::OpenAIProvider;
//!
//! let engine = SemanticSearch::open(OpenAIProvider::new(), SearchConfig::default()).await?;
//! let results = engine.search("I gonna go shopping.", &candidates, 3).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::SearchConfig;
pub use engine::{ScoredCandidate, SemanticSearch};
pub use error::{Result, SearchError};

// Re-export from dependencies for convenience
pub use semsearch_embeddings::{Embedding, EmbeddingProvider, OpenAIProvider};
