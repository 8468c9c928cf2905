//! File-backed embedding cache.
//!
//! One JSON file per dataset digest under a cache directory. Because the
//! file name is the content digest, a modified dataset simply misses and
//! re-embeds; stale reads cannot happen.

use std::fs;
use std::path::PathBuf;

use crate::ports::{CacheError, EmbeddingCache};

/// Stores FAQ embeddings as `<dir>/<digest>.json`.
pub struct FileEmbeddingCache {
    dir: PathBuf,
}

impl FileEmbeddingCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, digest: &str) -> PathBuf {
        self.dir.join(format!("{}.json", digest))
    }
}

impl EmbeddingCache for FileEmbeddingCache {
    fn load(&self, digest: &str) -> Result<Option<Vec<Vec<f32>>>, CacheError> {
        let path = self.entry_path(digest);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn store(&self, digest: &str, embeddings: &[Vec<f32>]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(embeddings)?;
        fs::write(self.entry_path(digest), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_embeddings_per_digest() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileEmbeddingCache::new(dir.path());

        let embeddings = vec![vec![0.1f32, 0.2], vec![0.3f32, 0.4]];
        cache.store("abc123", &embeddings).unwrap();

        assert_eq!(cache.load("abc123").unwrap(), Some(embeddings));
        assert_eq!(cache.load("other-digest").unwrap(), None);
    }

    #[test]
    fn corrupt_entry_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileEmbeddingCache::new(dir.path());

        fs::write(dir.path().join("bad.json"), "not json").unwrap();
        assert!(matches!(
            cache.load("bad"),
            Err(CacheError::Malformed(_))
        ));
    }
}
