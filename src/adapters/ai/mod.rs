//! AI adapters: OpenAI-backed completion and embedding providers.

mod openai_provider;

pub use openai_provider::{OpenAiConfig, OpenAiProvider};
