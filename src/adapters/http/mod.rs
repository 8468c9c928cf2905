//! HTTP adapter: REST surface for the conversational core.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::router;
