//! Ports: async trait seams between the core and external collaborators.
//!
//! Each external collaborator (LLM completion, embedding, distance,
//! key-value persistence) is reached only through the trait defined here;
//! adapters implement them and normalize provider-specific failures into
//! the port's error type at the boundary.

mod completion_provider;
mod conversation_store;
mod embedding_cache;
mod embedding_provider;
mod route_provider;

pub use completion_provider::{CompletionError, CompletionProvider};
pub use conversation_store::{ChatHistory, ConversationStore, StoreError};
pub use embedding_cache::{CacheError, EmbeddingCache};
pub use embedding_provider::{EmbeddingError, EmbeddingProvider};
pub use route_provider::{RouteError, RouteProvider};
