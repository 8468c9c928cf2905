//! Foundation types shared across the domain: errors and identifiers.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ChatId;
