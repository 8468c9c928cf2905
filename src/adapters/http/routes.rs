//! Axum router for the chatbot API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{
    calculate_distance, chat, chat_history, estimate_cost, faq_query, general_query, home,
    reset_chat, AppState,
};

/// Builds the complete API router.
///
/// # Routes
///
/// - `GET /` - liveness text
/// - `POST /general_query` - context-aware general chat
/// - `POST /faq_query` - single-turn FAQ lookup
/// - `POST /estimate_cost` - move cost estimate
/// - `POST /calculate_distance` - driving distance in miles
/// - `POST /chat` - one turn of the conversation state machine
/// - `GET /chat_history/{chat_id}` - session turn log
/// - `POST /chat/{chat_id}/reset` - reset the slot-filling flow
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/general_query", post(general_query))
        .route("/faq_query", post(faq_query))
        .route("/estimate_cost", post(estimate_cost))
        .route("/calculate_distance", post(calculate_distance))
        .route("/chat", post(chat))
        .route("/chat_history/:chat_id", get(chat_history))
        .route("/chat/:chat_id/reset", post(reset_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
