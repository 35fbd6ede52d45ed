//! Semantic search engine implementation.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use semsearch_embeddings::{
    CachedProvider, Embedding, EmbeddingCache, EmbeddingProvider, cosine_similarity,
};

use crate::config::SearchConfig;
use crate::error::Result;

/// A candidate scored against the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Position of the candidate in the input list.
    pub index: usize,

    /// The candidate text.
    pub text: String,

    /// Cosine similarity to the query.
    pub similarity: f32,
}

/// Semantic similarity search over candidate strings.
///
/// This is the main entry point of the system. It resolves embeddings for
/// the query and every candidate through the durable cache (falling back to
/// the provider on a miss), scores each candidate with cosine similarity,
/// and returns the top `k`.
pub struct SemanticSearch<P> {
    /// Cache-fronted embedding resolution.
    resolver: CachedProvider<P>,
}

impl<P> SemanticSearch<P>
where
    P: EmbeddingProvider,
{
    /// Open a search engine backed by the given provider and configuration.
    ///
    /// Creates the embedding store at the configured path if it does not
    /// exist yet.
    pub async fn open(provider: P, config: SearchConfig) -> Result<Self> {
        info!(
            "opening semantic search with store at {}",
            config.cache_path.display()
        );

        let cache = EmbeddingCache::open(&config.cache_path).await?;
        let mut resolver = CachedProvider::new(provider, cache);
        if let Some(model) = config.model {
            resolver = resolver.with_model(model);
        }

        Ok(Self { resolver })
    }

    /// Resolve the embedding for `text`, consulting the cache first.
    pub async fn resolve(&self, text: &str) -> Result<Embedding> {
        Ok(self.resolver.resolve(text).await?)
    }

    /// Rank `candidates` by similarity to `query` and return the top `k`.
    ///
    /// Candidates are resolved sequentially in input order, each completing
    /// before the next begins. The result is sorted by similarity
    /// descending; equal scores keep their original input order. Its length
    /// is `min(k, candidates.len())`.
    ///
    /// Any resolution or similarity failure aborts the whole call; no
    /// partial ranking is returned.
    pub async fn search(
        &self,
        query: &str,
        candidates: &[String],
        k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        let query_embedding = self.resolver.resolve(query).await?;

        let mut scored = Vec::with_capacity(candidates.len());
        for (index, text) in candidates.iter().enumerate() {
            let embedding = self.resolver.resolve(text).await?;
            let similarity = cosine_similarity(&query_embedding, &embedding)?;
            scored.push(ScoredCandidate {
                index,
                text: text.clone(),
                similarity,
            });
        }

        scored.sort_by_key(|c| (Reverse(OrderedFloat(c.similarity)), c.index));
        scored.truncate(k);

        debug!(
            "ranked {} candidates, returning top {}",
            candidates.len(),
            scored.len()
        );
        Ok(scored)
    }

    /// Get the underlying resolver.
    pub fn resolver(&self) -> &CachedProvider<P> {
        &self.resolver
    }
}
