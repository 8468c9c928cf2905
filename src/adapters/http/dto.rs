//! Request/response DTOs for the HTTP surface.
//!
//! The wire contract follows the original field names (`chat_id`,
//! `move_size`, `additional_services`); errors are a single `error`
//! string.

use serde::{Deserialize, Serialize};

/// Body of `/general_query` and `/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub message: String,
    pub chat_id: Option<String>,
}

/// Body of `/faq_query`.
#[derive(Debug, Deserialize)]
pub struct FaqQueryRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply-only response used by `/general_query` and `/faq_query`.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Body of `/estimate_cost`.
#[derive(Debug, Deserialize)]
pub struct EstimateCostRequest {
    pub chat_id: Option<String>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub move_size: String,
    #[serde(default)]
    pub additional_services: Vec<String>,
    pub move_date: Option<String>,
    pub username: Option<String>,
    pub contact_no: Option<String>,
}

/// Response of `/estimate_cost`: the formatted cost band.
#[derive(Debug, Serialize)]
pub struct EstimateCostResponse {
    pub estimated_cost: String,
}

/// Body of `/calculate_distance`.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

/// Response of `/calculate_distance`: miles, rounded to 2 decimals.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance: f64,
}

/// Response of `/chat`: one orchestrated turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub chat_id: String,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
}

/// Response of `/chat_history/{chat_id}`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub username: String,
    pub contact_no: String,
    pub messages: Vec<String>,
}

/// Error body: a single descriptive string.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
