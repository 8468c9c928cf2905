//! Embedding Cache Port - startup-time cache for FAQ question embeddings.
//!
//! The cache is content-addressed: entries are keyed by a digest of the
//! dataset content, so a changed dataset can never read a stale cache.
//! Lookups happen only during startup, before the server accepts traffic,
//! so the interface is synchronous.

use thiserror::Error;

/// Errors a cache backend can surface.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("embedding cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("embedding cache entry is not valid: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Port for persisting computed FAQ embeddings between process runs.
pub trait EmbeddingCache: Send + Sync {
    /// Loads the embeddings cached under a dataset digest, if present.
    fn load(&self, digest: &str) -> Result<Option<Vec<Vec<f32>>>, CacheError>;

    /// Stores embeddings under a dataset digest.
    fn store(&self, digest: &str, embeddings: &[Vec<f32>]) -> Result<(), CacheError>;
}
