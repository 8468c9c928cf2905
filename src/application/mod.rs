//! Application layer: services that wire domain logic to the ports.

mod distance_resolver;
mod faq_matcher;
mod orchestrator;

pub use distance_resolver::DistanceResolver;
pub use faq_matcher::{FaqMatcher, DEFAULT_FALLBACK_REPLY, DEFAULT_SIMILARITY_THRESHOLD};
pub use orchestrator::{ChatTurn, ConversationOrchestrator};
