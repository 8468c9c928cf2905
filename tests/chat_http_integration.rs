//! Integration tests for the chatbot HTTP endpoints.
//!
//! Each test builds the full router over an in-memory conversation store
//! and stubbed providers, then drives it with `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use good_movers_chatbot::adapters::http::{router, AppState};
use good_movers_chatbot::adapters::storage::InMemoryConversationStore;
use good_movers_chatbot::application::{
    ConversationOrchestrator, DistanceResolver, FaqMatcher, DEFAULT_FALLBACK_REPLY,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use good_movers_chatbot::domain::intent::IntentClassifier;
use good_movers_chatbot::domain::pricing::PricingEngine;
use good_movers_chatbot::ports::{
    CacheError, CompletionError, CompletionProvider, EmbeddingCache, EmbeddingError,
    EmbeddingProvider, RouteError, RouteProvider,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Completion stub that prefixes the prompt so tests can see what was sent.
struct EchoCompletion;

#[async_trait]
impl CompletionProvider for EchoCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        Ok(format!("echo: {}", prompt))
    }
}

/// Route stub returning a fixed distance in meters.
struct FixedRoute(f64);

#[async_trait]
impl RouteProvider for FixedRoute {
    async fn driving_distance_meters(
        &self,
        _origin: &str,
        _destination: &str,
    ) -> Result<f64, RouteError> {
        Ok(self.0)
    }
}

/// Route stub that never finds a drivable route.
struct NoRoute;

#[async_trait]
impl RouteProvider for NoRoute {
    async fn driving_distance_meters(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, RouteError> {
        Err(RouteError::NotRouteable {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }
}

/// Embedding stub with canned vectors per text; everything else maps to a
/// vector orthogonal to the dataset questions.
struct CannedEmbedder(HashMap<String, Vec<f32>>);

#[async_trait]
impl EmbeddingProvider for CannedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self
            .0
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0, 0.0, 1.0]))
    }
}

/// Cache stub that never hits.
struct NoCache;

impl EmbeddingCache for NoCache {
    fn load(&self, _digest: &str) -> Result<Option<Vec<Vec<f32>>>, CacheError> {
        Ok(None)
    }

    fn store(&self, _digest: &str, _embeddings: &[Vec<f32>]) -> Result<(), CacheError> {
        Ok(())
    }
}

const DATASET: &str =
    r#"{"question": "Are your movers insured?", "answer": "All our movers are insured."}"#;

// 160934 meters resolves to exactly 100.00 miles.
const HUNDRED_MILES_IN_METERS: f64 = 160_934.0;

async fn faq_matcher() -> Arc<FaqMatcher> {
    let mut vectors = HashMap::new();
    vectors.insert("Are your movers insured?".to_string(), vec![1.0, 0.0, 0.0]);
    vectors.insert("are your movers insured?".to_string(), vec![1.0, 0.0, 0.0]);
    Arc::new(
        FaqMatcher::load(
            DATASET,
            Arc::new(CannedEmbedder(vectors)),
            &NoCache,
            DEFAULT_SIMILARITY_THRESHOLD,
            DEFAULT_FALLBACK_REPLY,
        )
        .await
        .unwrap(),
    )
}

/// Build the full router over stubbed collaborators.
async fn make_app(route: Arc<dyn RouteProvider>) -> axum::Router {
    let orchestrator = Arc::new(ConversationOrchestrator::new(
        Arc::new(InMemoryConversationStore::new()),
        Arc::new(EchoCompletion),
        IntentClassifier::new(),
        faq_matcher().await,
        DistanceResolver::new(route),
        PricingEngine::new(),
    ));
    router(AppState::new(orchestrator))
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn home_reports_liveness() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app.oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"Chatbot API is running.");
}

// =============================================================================
// /calculate_distance
// =============================================================================

#[tokio::test]
async fn calculate_distance_converts_meters_to_miles() {
    let app = make_app(Arc::new(FixedRoute(300_000.0))).await;
    let resp = app
        .oneshot(post_json(
            "/calculate_distance",
            r#"{"origin": "Austin, TX", "destination": "Dallas, TX"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    // 300000 / 1609.34 = 186.4117..., rounded to 2 decimals.
    assert_eq!(body["distance"], 186.41);
}

#[tokio::test]
async fn calculate_distance_requires_both_locations() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/calculate_distance",
            r#"{"origin": "Austin, TX"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        "Missing required fields: origin and destination"
    );
}

#[tokio::test]
async fn calculate_distance_maps_unroutable_pair_to_bad_request() {
    let app = make_app(Arc::new(NoRoute)).await;
    let resp = app
        .oneshot(post_json(
            "/calculate_distance",
            r#"{"origin": "Atlantis", "destination": "El Dorado"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        "Unable to calculate distance. Please check the locations."
    );
}

// =============================================================================
// /estimate_cost
// =============================================================================

#[tokio::test]
async fn estimate_cost_returns_the_formatted_band() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/estimate_cost",
            r#"{
                "origin": "Austin, TX",
                "destination": "Dallas, TX",
                "move_size": "2-bedroom",
                "additional_services": []
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    // 100 * 1.50 + 600 = 750 -> band (675, 825)
    assert_eq!(body["estimated_cost"], "$675.00 - $825.00");
}

#[tokio::test]
async fn estimate_cost_rejects_missing_fields() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/estimate_cost",
            r#"{"origin": "Austin, TX", "move_size": "2-bedroom"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields.");
}

#[tokio::test]
async fn estimate_cost_includes_additional_service_charges() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/estimate_cost",
            r#"{
                "origin": "Austin, TX",
                "destination": "Dallas, TX",
                "move_size": "studio",
                "additional_services": ["packing", "storage"]
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    // 100 * 1.50 + 200 + 150 + 100 = 600 -> band (540, 660)
    assert_eq!(body["estimated_cost"], "$540.00 - $660.00");
}

// =============================================================================
// /faq_query
// =============================================================================

#[tokio::test]
async fn faq_query_answers_a_known_question() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/faq_query",
            r#"{"message": "Are your movers insured?"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "All our movers are insured.");
}

#[tokio::test]
async fn faq_query_falls_back_when_nothing_matches() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/faq_query",
            r#"{"message": "what color is the sky"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], DEFAULT_FALLBACK_REPLY);
}

#[tokio::test]
async fn faq_query_rejects_an_empty_question() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json("/faq_query", r#"{"message": "  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "No question provided");
}

// =============================================================================
// /general_query
// =============================================================================

#[tokio::test]
async fn general_query_replies_and_returns_ok() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json(
            "/general_query",
            r#"{"message": "hello there", "chat_id": "general-http"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "echo: hello there");
}

// =============================================================================
// /chat state machine
// =============================================================================

#[tokio::test]
async fn chat_runs_the_full_move_flow_over_http() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "I want to relocate from austin, tx to dallas, tx", "chat_id": "http-flow"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["chat_id"], "http-flow");
    assert_eq!(body["distance"], 100.0);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "next friday", "chat_id": "http-flow"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert!(body["reply"].as_str().unwrap().contains("move size"));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "2-bedroom", "chat_id": "http-flow"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert!(body["reply"]
        .as_str()
        .unwrap()
        .contains("additional services"));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "none", "chat_id": "http-flow"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["estimated_cost"], "$675.00 - $825.00");

    // Four exchanges, eight ordered log entries.
    let resp = app
        .oneshot(get("/chat_history/http-flow"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 8);
    assert!(messages[0].as_str().unwrap().starts_with("User: "));
    assert!(messages[1].as_str().unwrap().starts_with("Assistant: "));
}

#[tokio::test]
async fn chat_generates_an_identifier_when_none_is_sent() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(post_json("/chat", r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(!body["chat_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn chat_history_for_unknown_session_is_not_found() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;
    let resp = app
        .oneshot(get("/chat_history/never-created"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_returns_no_content_and_restarts_the_flow() {
    let app = make_app(Arc::new(FixedRoute(HUNDRED_MILES_IN_METERS))).await;

    app.clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "moving from austin to dallas", "chat_id": "http-reset"}"#,
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(
            Request::post("/chat/http-reset/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Classified fresh instead of being treated as a date slot.
    let resp = app
        .oneshot(post_json(
            "/chat",
            r#"{"message": "are your movers insured?", "chat_id": "http-reset"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "All our movers are insured.");
}
