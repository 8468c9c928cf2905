//! FAQ matcher configuration

use serde::Deserialize;

use super::error::ValidationError;

/// FAQ dataset and matching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FaqConfig {
    /// Path to the line-delimited JSON dataset
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Directory for the content-addressed embedding cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Similarity a match must strictly exceed
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Reply when no entry clears the threshold
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

impl FaqConfig {
    /// Validate FAQ configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dataset_path.is_empty() {
            return Err(ValidationError::MissingRequired("FAQ_DATASET_PATH"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ValidationError::InvalidSimilarityThreshold);
        }
        Ok(())
    }
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            cache_dir: default_cache_dir(),
            similarity_threshold: default_similarity_threshold(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

fn default_dataset_path() -> String {
    "data/faqs.jsonl".to_string()
}

fn default_cache_dir() -> String {
    ".cache/faq_embeddings".to_string()
}

fn default_similarity_threshold() -> f64 {
    0.75
}

fn default_fallback_reply() -> String {
    "I'm sorry, I don't have an answer for that.".to_string()
}
