//! HTTP handlers connecting Axum routes to the orchestrator.
//!
//! Validation happens at this boundary before any external call; provider
//! failures arrive here already normalized into domain errors and are
//! mapped onto the wire contract's status codes.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ConversationOrchestrator;
use crate::domain::foundation::{ChatId, DomainError, ErrorCode};
use crate::domain::session::MoveEstimateRequest;

use super::dto::{
    ChatMessageRequest, ChatResponse, DistanceRequest, DistanceResponse, ErrorResponse,
    EstimateCostRequest, EstimateCostResponse, FaqQueryRequest, HistoryResponse, ReplyResponse,
};

/// Shared application state: Arc-wrapped dependencies cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConversationOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ConversationOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Maps a domain error onto the wire contract.
fn error_response(err: DomainError) -> Response {
    let status = match err.code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
        // The distance routes promise 400 for an unresolvable route.
        ErrorCode::DistanceUnavailable => StatusCode::BAD_REQUEST,
        ErrorCode::EmbeddingUnavailable | ErrorCode::CompletionUnavailable => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCode::StoreUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        // Server-side detail goes to the log, not the caller.
        tracing::error!(code = %err.code, message = %err.message, "request failed");
        return (
            status,
            Json(ErrorResponse::new("An unexpected error occurred.")),
        )
            .into_response();
    }
    (status, Json(ErrorResponse::new(err.message))).into_response()
}

/// GET `/` - liveness probe.
pub async fn home() -> &'static str {
    "Chatbot API is running."
}

/// POST `/general_query` - context-aware general chat.
///
/// Always 200 on the conversational path: provider failures are folded
/// into the reply text by the orchestrator.
pub async fn general_query(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Response {
    let chat_id = ChatId::from_request(body.chat_id);
    match state.orchestrator.general_reply(&chat_id, &body.message).await {
        Ok(reply) => Json(ReplyResponse { reply }).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/faq_query` - single-turn FAQ lookup.
pub async fn faq_query(
    State(state): State<AppState>,
    Json(body): Json<FaqQueryRequest>,
) -> Response {
    if body.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No question provided")),
        )
            .into_response();
    }

    match state.orchestrator.faq_reply(&body.message).await {
        Ok(reply) => Json(ReplyResponse { reply }).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/estimate_cost` - validate, price, and persist a move estimate.
pub async fn estimate_cost(
    State(state): State<AppState>,
    Json(body): Json<EstimateCostRequest>,
) -> Response {
    let chat_id = ChatId::from_request(body.chat_id);

    let mut request = MoveEstimateRequest::new(body.origin, body.destination, body.move_size);
    request.additional_services = body.additional_services;
    if let Some(move_date) = body.move_date {
        request.move_date = move_date;
    }
    if let Some(username) = body.username {
        request.username = username;
    }
    if let Some(contact_no) = body.contact_no {
        request.contact_no = contact_no;
    }

    match state.orchestrator.estimate(&chat_id, request).await {
        Ok((_, range)) => Json(EstimateCostResponse {
            estimated_cost: range.to_string(),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/calculate_distance` - driving distance in miles.
pub async fn calculate_distance(
    State(state): State<AppState>,
    Json(body): Json<DistanceRequest>,
) -> Response {
    if body.origin.trim().is_empty() || body.destination.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Missing required fields: origin and destination",
            )),
        )
            .into_response();
    }

    match state
        .orchestrator
        .resolve_distance(&body.origin, &body.destination)
        .await
    {
        Ok(distance) => Json(DistanceResponse { distance }).into_response(),
        Err(err) if err.code == ErrorCode::DistanceUnavailable => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Unable to calculate distance. Please check the locations.",
            )),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/chat` - one turn of the conversation state machine.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Response {
    let chat_id = ChatId::from_request(body.chat_id);
    match state.orchestrator.handle_message(&chat_id, &body.message).await {
        Ok(turn) => Json(ChatResponse {
            chat_id: chat_id.to_string(),
            reply: turn.reply,
            distance: turn.distance_miles,
            estimated_cost: turn.estimated_cost,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET `/chat_history/{chat_id}` - identity fields and ordered turn log.
pub async fn chat_history(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Response {
    match state.orchestrator.history(&ChatId::from(chat_id)).await {
        Ok(history) => Json(HistoryResponse {
            username: history.username,
            contact_no: history.contact_no,
            messages: history.messages,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/chat/{chat_id}/reset` - return the flow to its initial step.
pub async fn reset_chat(State(state): State<AppState>, Path(chat_id): Path<String>) -> Response {
    match state.orchestrator.reset(&ChatId::from(chat_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
