//! FAQ matching against a startup-loaded dataset.
//!
//! Entries come from a line-delimited JSON dataset; each distinct question
//! is embedded once, either freshly through the embedding provider or from
//! a content-addressed cache keyed by the SHA-256 digest of the dataset.
//! A changed dataset changes the digest, so a stale cache is structurally
//! impossible.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::faq::{best_match, parse_dataset, FaqEntry};
use crate::domain::foundation::DomainError;
use crate::ports::{EmbeddingCache, EmbeddingError, EmbeddingProvider};

/// Default similarity threshold an answer must strictly exceed.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Default reply when no entry clears the threshold.
pub const DEFAULT_FALLBACK_REPLY: &str = "I'm sorry, I don't have an answer for that.";

/// Matches user questions to the closest indexed FAQ answer.
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    embeddings: Vec<Vec<f32>>,
    embedder: Arc<dyn EmbeddingProvider>,
    threshold: f64,
    fallback: String,
}

impl FaqMatcher {
    /// Loads the matcher from raw dataset text.
    ///
    /// Malformed dataset lines are skipped during parsing, never fatal.
    /// When the cache holds embeddings for this exact dataset content they
    /// are trusted as-is; otherwise every question is embedded through the
    /// provider and the result is written back to the cache (a cache write
    /// failure is logged and ignored).
    pub async fn load(
        dataset: &str,
        embedder: Arc<dyn EmbeddingProvider>,
        cache: &dyn EmbeddingCache,
        threshold: f64,
        fallback: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let entries = parse_dataset(dataset);
        let digest = dataset_digest(dataset);

        let embeddings = match cache.load(&digest) {
            Ok(Some(cached)) if cached.len() == entries.len() => {
                tracing::info!(entries = entries.len(), "loaded FAQ embeddings from cache");
                cached
            }
            Ok(Some(cached)) => {
                tracing::warn!(
                    cached = cached.len(),
                    entries = entries.len(),
                    "cached embedding count does not match dataset, re-embedding"
                );
                Self::embed_all(&entries, embedder.as_ref(), cache, &digest).await?
            }
            Ok(None) => Self::embed_all(&entries, embedder.as_ref(), cache, &digest).await?,
            Err(error) => {
                tracing::warn!(%error, "embedding cache unreadable, re-embedding");
                Self::embed_all(&entries, embedder.as_ref(), cache, &digest).await?
            }
        };

        Ok(Self {
            entries,
            embeddings,
            embedder,
            threshold,
            fallback: fallback.into(),
        })
    }

    async fn embed_all(
        entries: &[FaqEntry],
        embedder: &dyn EmbeddingProvider,
        cache: &dyn EmbeddingCache,
        digest: &str,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut embeddings = Vec::with_capacity(entries.len());
        for entry in entries {
            embeddings.push(embedder.embed(&entry.question).await?);
        }
        tracing::info!(entries = entries.len(), "computed FAQ embeddings");

        if let Err(error) = cache.store(digest, &embeddings) {
            tracing::warn!(%error, "failed to persist FAQ embedding cache");
        }
        Ok(embeddings)
    }

    /// Returns the indexed answer closest to the question.
    ///
    /// The answer is returned only when its similarity strictly exceeds
    /// the threshold; otherwise the fallback reply. Ties on the maximum
    /// similarity resolve to the earliest entry in load order.
    pub async fn answer(&self, question: &str) -> Result<String, DomainError> {
        if question.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }

        let query = self.embedder.embed(question).await?;

        match best_match(&query, &self.embeddings) {
            Some((index, score)) if score > self.threshold => {
                tracing::debug!(score, matched = %self.entries[index].question, "FAQ hit");
                Ok(self.entries[index].answer.clone())
            }
            _ => Ok(self.fallback.clone()),
        }
    }

    /// Number of loaded entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Hex SHA-256 digest of the dataset content.
fn dataset_digest(dataset: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dataset.as_bytes());
    format!("{:x}", hasher.finalize())
}
