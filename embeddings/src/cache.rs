//! Durable embedding cache.
//!
//! The cache is a flat append-only store mapping raw text to its embedding,
//! one record per line: `text<TAB>json-array-of-numbers`. The first line is
//! a fixed header and is skipped on read. Records are never rewritten in
//! place; the store only grows, which keeps earlier records safe from
//! partial writes.
//!
//! The store is reloaded in full on every access. That trades read
//! efficiency for simplicity and crash-safety, which is acceptable for the
//! small-to-moderate cache sizes this system targets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::provider::{EmbeddingProvider, EmbeddingRequest};

/// Header line written as the first line of a new store file.
pub const STORE_HEADER: &str = "text\tembedding";

/// Durable cache mapping raw text to its previously computed embedding.
///
/// Keys are compared by exact value equality with no normalization, and
/// the store holds at most one record per distinct text (first write wins).
/// The cache is the sole writer of its store file; concurrent processes
/// appending to the same file are not supported.
#[derive(Clone)]
pub struct EmbeddingCache {
    /// Path of the append-only store file.
    path: PathBuf,

    /// Serializes check-then-append so concurrent stores of the same text
    /// write at most one record.
    append_lock: Arc<Mutex<()>>,
}

impl EmbeddingCache {
    /// Open a cache backed by the store file at `path`.
    ///
    /// Creates the file (and any missing parent directories) with a header
    /// line if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let cache = Self {
            path: path.as_ref().to_path_buf(),
            append_lock: Arc::new(Mutex::new(())),
        };

        cache.ensure_store().await?;
        Ok(cache)
    }

    /// Path of the underlying store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store file with its header if it is missing.
    async fn ensure_store(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, format!("{STORE_HEADER}\n")).await?;
        info!("created embedding store at {}", self.path.display());
        Ok(())
    }

    /// Load the entire store into a mapping from text to embedding.
    ///
    /// Degrades instead of failing: a missing store is recreated with a
    /// header and yields an empty mapping, an unreadable store yields an
    /// empty mapping, and malformed record lines are skipped. Callers never
    /// lose more than cache benefit to a corrupt store.
    pub async fn load(&self) -> HashMap<String, Embedding> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Err(e) = self.ensure_store().await {
                    warn!("failed to recreate embedding store: {e}");
                }
                return HashMap::new();
            }
            Err(e) => {
                warn!(
                    "failed to read embedding store {}: {e}",
                    self.path.display()
                );
                return HashMap::new();
            }
        };

        let mut map = HashMap::new();
        // Line 1 is the header row.
        for (line_no, line) in content.lines().enumerate().skip(1) {
            if line.is_empty() {
                continue;
            }
            match parse_record(line) {
                Some((text, embedding)) => {
                    // First record wins on duplicate keys.
                    map.entry(text).or_insert(embedding);
                }
                None => {
                    warn!(
                        "skipping malformed record at {}:{}",
                        self.path.display(),
                        line_no + 1
                    );
                }
            }
        }

        map
    }

    /// Look up the cached embedding for exact-match `text`.
    ///
    /// Never performs a remote call. Absence is a normal miss, not an error.
    pub async fn lookup(&self, text: &str) -> Option<Embedding> {
        self.load().await.remove(text)
    }

    /// Persist `(text, embedding)` if `text` is not already present.
    ///
    /// A second store for the same text is a silent no-op, so the first
    /// written embedding is the one the cache keeps. On a fresh text this
    /// appends exactly one record line to the store.
    pub async fn store(&self, text: &str, embedding: &[f32]) -> Result<()> {
        if text.contains(['\t', '\n', '\r']) {
            return Err(EmbeddingError::Cache(
                "text containing tab or newline cannot be stored".to_string(),
            ));
        }

        let _guard = self.append_lock.lock().await;

        self.ensure_store().await?;
        if self.load().await.contains_key(text) {
            debug!("embedding already cached, skipping append");
            return Ok(());
        }

        let record = format!("{text}\t{}\n", serde_json::to_string(embedding)?);
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;

        debug!("appended embedding record ({} dims)", embedding.len());
        Ok(())
    }

    /// Number of records currently in the store.
    pub async fn len(&self) -> usize {
        self.load().await.len()
    }

    /// Whether the store currently holds no records.
    pub async fn is_empty(&self) -> bool {
        self.load().await.is_empty()
    }
}

/// Parse one `text<TAB>json-array` record line.
fn parse_record(line: &str) -> Option<(String, Embedding)> {
    let (text, encoded) = line.split_once('\t')?;
    let embedding: Embedding = serde_json::from_str(encoded).ok()?;
    Some((text.to_string(), embedding))
}

/// A provider wrapped with cache-or-fetch resolution.
///
/// `resolve` is the single entry point for turning text into an embedding:
/// cached vectors are returned without touching the network, misses go to
/// the provider and are written back so identical text is never sent to the
/// provider twice.
pub struct CachedProvider<P> {
    provider: P,
    cache: EmbeddingCache,
    model: Option<String>,
}

impl<P> CachedProvider<P>
where
    P: EmbeddingProvider,
{
    /// Create a new cached provider.
    pub fn new(provider: P, cache: EmbeddingCache) -> Self {
        Self {
            provider,
            cache,
            model: None,
        }
    }

    /// Override the model requested from the provider.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Resolve the embedding for `text`.
    ///
    /// Cache hits return immediately with no remote call and no write. On a
    /// miss the provider is called, the result is stored, and the embedding
    /// is returned. Provider failures propagate untouched; nothing is
    /// written to the cache on failure.
    pub async fn resolve(&self, text: &str) -> Result<Embedding> {
        if let Some(embedding) = self.cache.lookup(text).await {
            debug!("cache hit for embedding");
            return Ok(embedding);
        }

        let mut request = EmbeddingRequest::new(text);
        if let Some(model) = &self.model {
            request = request.with_model(model);
        }

        let response = self.provider.embed(request).await?;
        self.cache.store(text, &response.embedding).await?;

        Ok(response.embedding)
    }

    /// Get the underlying cache.
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
