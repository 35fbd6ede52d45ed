//! # Embeddings
//!
//! This crate provides embedding generation with durable caching and the
//! vector similarity kernel used by the semantic search engine.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors via a remote
//!   provider
//! - **Durable Caching**: An append-only store so identical text is never
//!   embedded twice
//! - **Cache-or-Fetch Resolution**: A single `resolve` entry point in front
//!   of the cache and the provider
//! - **Similarity**: Dot product, Euclidean norm, cosine similarity
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Embeddings System                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  CachedProvider ──► EmbeddingCache ──► append-only store   │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  EmbeddingProvider (OpenAI)        similarity kernel       │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod provider;
pub mod similarity;

pub use cache::{CachedProvider, EmbeddingCache};
pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use similarity::{cosine_similarity, dot_product, norm};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
