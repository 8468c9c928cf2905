//! Route extraction from a single utterance.
//!
//! Pulls origin and/or destination out of "from X to Y" phrasing so the
//! slot-filling flow can skip questions the user already answered. Either
//! side can be extracted alone ("moving from austin", "relocating to
//! dallas").

use once_cell::sync::Lazy;
use regex::Regex;

/// Full route; lazy match on the origin so the first " to " ends it.
static FULL_ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"from\s+([\w\s,]+?)\s+to\s+([\w\s,]+)").expect("route pattern must compile")
});

/// Origin alone: "from X" with no following " to ".
static ORIGIN_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfrom\s+([\w\s,]+)").expect("origin pattern must compile"));

/// Destination alone: a move verb followed by "to X". Anchoring on the
/// verb keeps incidental infinitives ("want to know") out.
static DESTINATION_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:move|moving|relocate|relocating|relocation|transfer)\s+to\s+([\w\s,]+)")
        .expect("destination pattern must compile")
});

/// Origin/destination slots extracted from one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRoute {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl ExtractedRoute {
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}

/// Extracts whatever route slots the utterance carries.
///
/// Matching is case-insensitive via lowercasing; extracted places are
/// title-cased for display and storage. Blank captures count as absent.
pub fn extract_route(text: &str) -> ExtractedRoute {
    let lowered = text.to_lowercase();

    if let Some(caps) = FULL_ROUTE.captures(&lowered) {
        let origin = non_empty(title_case(caps.get(1).map_or("", |m| m.as_str())));
        let destination = non_empty(title_case(caps.get(2).map_or("", |m| m.as_str())));
        if origin.is_some() && destination.is_some() {
            return ExtractedRoute {
                origin,
                destination,
            };
        }
    }

    if let Some(caps) = ORIGIN_ONLY.captures(&lowered) {
        return ExtractedRoute {
            origin: non_empty(title_case(caps.get(1).map_or("", |m| m.as_str()))),
            destination: None,
        };
    }

    if let Some(caps) = DESTINATION_ONLY.captures(&lowered) {
        return ExtractedRoute {
            origin: None,
            destination: non_empty(title_case(caps.get(1).map_or("", |m| m.as_str()))),
        };
    }

    ExtractedRoute::default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Uppercases the first letter of each whitespace-separated word.
fn title_case(raw: &str) -> String {
    raw.trim()
        .trim_matches(',')
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
