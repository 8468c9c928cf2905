//! Intent classification for incoming user messages.

mod classifier;
mod extractor;

pub use classifier::{Intent, IntentClassifier};
pub use extractor::{extract_route, ExtractedRoute};
