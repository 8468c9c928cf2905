//! FAQ dataset model and similarity math.

mod entry;
mod similarity;

pub use entry::{parse_dataset, FaqEntry};
pub use similarity::{best_match, cosine_similarity};
