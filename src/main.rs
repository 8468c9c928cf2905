//! Chatbot service binary - composition root.
//!
//! Ties the layers together into a single executable:
//! 1. Load and validate configuration from environment variables
//! 2. Connect to Redis (conversation store)
//! 3. Build the OpenAI and Google Maps providers
//! 4. Load the FAQ dataset and its embedding cache
//! 5. Start the axum API server

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use good_movers_chatbot::adapters::ai::{OpenAiConfig, OpenAiProvider};
use good_movers_chatbot::adapters::http::{router, AppState};
use good_movers_chatbot::adapters::maps::{GoogleMapsConfig, GoogleMapsProvider};
use good_movers_chatbot::adapters::storage::{FileEmbeddingCache, RedisConversationStore};
use good_movers_chatbot::application::{
    ConversationOrchestrator, DistanceResolver, FaqMatcher,
};
use good_movers_chatbot::config::AppConfig;
use good_movers_chatbot::domain::intent::IntentClassifier;
use good_movers_chatbot::domain::pricing::PricingEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!("Starting chatbot service v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    // Conversation store.
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = tokio::time::timeout(
        config.redis.timeout(),
        redis_client.get_multiplexed_async_connection(),
    )
    .await
    .map_err(|_| "Timed out connecting to Redis")??;
    tracing::info!(url = %config.redis.url, "Connected to Redis");
    let store = Arc::new(RedisConversationStore::new(redis_conn));

    // AI provider (completions + embeddings). Validation guarantees the key.
    let ai_key = config
        .ai
        .api_key
        .as_ref()
        .ok_or("AI API key missing after validation")?;
    let openai = Arc::new(OpenAiProvider::new(
        OpenAiConfig::new(ai_key.expose_secret().clone())
            .with_base_url(config.ai.base_url.clone())
            .with_completion_model(config.ai.completion_model.clone())
            .with_embedding_model(config.ai.embedding_model.clone())
            .with_timeout(config.ai.timeout()),
    )?);

    // Distance provider.
    let maps_key = config
        .maps
        .api_key
        .as_ref()
        .ok_or("Maps API key missing after validation")?;
    let maps = Arc::new(GoogleMapsProvider::new(
        GoogleMapsConfig::new(maps_key.expose_secret().clone())
            .with_base_url(config.maps.base_url.clone())
            .with_timeout(config.maps.timeout()),
    )?);

    // FAQ matcher with the content-addressed embedding cache.
    let dataset = std::fs::read_to_string(&config.faq.dataset_path).map_err(|e| {
        format!(
            "Failed to read FAQ dataset at {}: {}",
            config.faq.dataset_path, e
        )
    })?;
    let cache = FileEmbeddingCache::new(config.faq.cache_dir.clone());
    let faq = Arc::new(
        FaqMatcher::load(
            &dataset,
            openai.clone(),
            &cache,
            config.faq.similarity_threshold,
            config.faq.fallback_reply.clone(),
        )
        .await?,
    );
    tracing::info!(path = %config.faq.dataset_path, "FAQ dataset loaded");

    let orchestrator = Arc::new(ConversationOrchestrator::new(
        store,
        openai,
        IntentClassifier::new(),
        faq,
        DistanceResolver::new(maps),
        PricingEngine::new(),
    ));

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let parsed = origins
                .iter()
                .map(|o| o.parse())
                .collect::<Result<Vec<http::HeaderValue>, _>>()
                .map_err(|e| format!("Invalid CORS origin: {}", e))?;
            CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = router(AppState::new(orchestrator))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
