//! FAQ entries and lenient JSONL dataset parsing.

use serde::{Deserialize, Serialize};

/// One question/answer pair from the FAQ dataset.
///
/// Immutable after load; the matching embedding is kept alongside by the
/// matcher, not on the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Parses a line-delimited JSON dataset.
///
/// Each line is parsed independently. A line that is not valid JSON, or
/// is missing a non-empty question or answer, is skipped with a warning;
/// a bad line never fails the whole load.
pub fn parse_dataset(raw: &str) -> Vec<FaqEntry> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(number, line)| match serde_json::from_str::<FaqEntry>(line) {
            Ok(entry) if !entry.question.trim().is_empty() && !entry.answer.trim().is_empty() => {
                Some(entry)
            }
            Ok(_) => {
                tracing::warn!(line = number + 1, "skipping FAQ entry with empty fields");
                None
            }
            Err(error) => {
                tracing::warn!(line = number + 1, %error, "skipping malformed FAQ line");
                None
            }
        })
        .collect()
}
