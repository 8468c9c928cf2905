//! Keyword/pattern intent classifier.
//!
//! Maps free text to one of three intents: move estimation, FAQ lookup, or
//! general conversation. Classification is two ordered pattern lists with a
//! fixed precedence: if any FAQ pattern matches, the intent is `Faq` even
//! when move patterns also match. FAQ questions routinely contain incidental
//! move vocabulary ("how much does a move cost?"), so FAQ-first precedence
//! keeps those out of the slot-filling flow.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Move-cost estimation; enters the slot-filling flow.
    Move,
    /// FAQ lookup; answered in a single turn.
    Faq,
    /// General conversation; delegated to the completion provider.
    General,
}

/// Ordered FAQ patterns, evaluated against lowercased trimmed text.
static FAQ_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Platform and account topics.
        r"\b(account|login|log in|sign ?up|password|website|platform|app)\b",
        // Interrogative question forms.
        r"^(how|what|why|when|where|who|which|can|could|do you|does|is|are|should)\b",
        // Mover trust topics.
        r"\b(trust(ed|worthy)?|licensed|insured|verified|reliable|review|reviews|rating)\b",
        // Technical support topics.
        r"\b(support|helpdesk|technical issue|error|bug|not working|broken)\b",
        // Policy topics.
        r"\b(policy|policies|refund|cancellation|cancel my|terms|privacy|claim)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("FAQ pattern must compile"))
    .collect()
});

/// Ordered move patterns, evaluated against lowercased trimmed text.
static MOVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Move and relocation keywords.
        r"\b(move|moving|mover|relocate|relocating|relocation|transfer|shifting)\b",
        // "from X to Y" route structure.
        r"\bfrom\s+[\w\s,]+\s+to\s+[\w\s,]+",
        // Cost and distance keywords.
        r"\b(cost|estimate|quote|price|pricing|charge|distance|miles)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("move pattern must compile"))
    .collect()
});

/// Pattern-rule intent classifier.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies a message.
    ///
    /// Empty or whitespace-only text is `General`; this function never
    /// panics on any input.
    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return Intent::General;
        }

        if FAQ_PATTERNS.iter().any(|p| p.is_match(&normalized)) {
            return Intent::Faq;
        }
        if MOVE_PATTERNS.iter().any(|p| p.is_match(&normalized)) {
            return Intent::Move;
        }
        Intent::General
    }
}
