//! Storage adapters: conversation store backends and the embedding cache.

mod file_embedding_cache;
mod in_memory_store;
mod redis_store;

pub use file_embedding_cache::FileEmbeddingCache;
pub use in_memory_store::InMemoryConversationStore;
pub use redis_store::RedisConversationStore;
