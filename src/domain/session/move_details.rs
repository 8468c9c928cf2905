//! Move detail records and the estimate request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Default for optional identity fields that were never provided.
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Accumulated move slots for one session.
///
/// Persisted as a whole by `ConversationStore::record_move_details`; the
/// distance is optional because resolution is best-effort during the flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDetails {
    pub origin: String,
    pub destination: String,
    pub distance_miles: Option<f64>,
    pub name: String,
    pub contact_no: String,
    pub move_date: String,
    pub move_size: String,
    pub additional_services: Vec<String>,
}

impl Default for MoveDetails {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            distance_miles: None,
            name: UNKNOWN_FIELD.to_string(),
            contact_no: UNKNOWN_FIELD.to_string(),
            move_date: UNKNOWN_FIELD.to_string(),
            move_size: String::new(),
            additional_services: Vec::new(),
        }
    }
}

/// A request to estimate one move.
///
/// Transient: once estimated it is folded into the session's
/// [`MoveDetails`] and not kept separately.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEstimateRequest {
    pub origin: String,
    pub destination: String,
    pub move_size: String,
    pub additional_services: Vec<String>,
    pub move_date: String,
    pub username: String,
    pub contact_no: String,
}

impl MoveEstimateRequest {
    /// Builds a request, defaulting optional identity fields.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        move_size: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            move_size: move_size.into(),
            additional_services: Vec::new(),
            move_date: UNKNOWN_FIELD.to_string(),
            username: UNKNOWN_FIELD.to_string(),
            contact_no: UNKNOWN_FIELD.to_string(),
        }
    }

    /// Validates that every field required for estimation is present.
    ///
    /// Runs before any external call so an incomplete request never costs
    /// a provider round trip. The message matches the wire contract for
    /// missing-field rejections.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin.trim().is_empty()
            || self.destination.trim().is_empty()
            || self.move_size.trim().is_empty()
        {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Missing required fields.",
            ));
        }
        Ok(())
    }

    /// Folds this request into the session's move details once a distance
    /// is known.
    pub fn into_details(self, distance_miles: Option<f64>) -> MoveDetails {
        MoveDetails {
            origin: self.origin,
            destination: self.destination,
            distance_miles,
            name: self.username,
            contact_no: self.contact_no,
            move_date: self.move_date,
            move_size: self.move_size,
            additional_services: self.additional_services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_request_validates() {
        let request = MoveEstimateRequest::new("Austin, TX", "Dallas, TX", "2-bedroom");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn missing_destination_is_rejected() {
        let request = MoveEstimateRequest::new("Austin, TX", "", "2-bedroom");
        let err = request.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Missing required fields.");
    }

    #[test]
    fn whitespace_only_size_is_rejected() {
        let request = MoveEstimateRequest::new("Austin, TX", "Dallas, TX", "   ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn identity_fields_default_to_unknown() {
        let request = MoveEstimateRequest::new("A", "B", "studio");
        assert_eq!(request.username, UNKNOWN_FIELD);
        assert_eq!(request.contact_no, UNKNOWN_FIELD);
        assert_eq!(request.move_date, UNKNOWN_FIELD);
    }

    #[test]
    fn into_details_carries_all_fields() {
        let mut request = MoveEstimateRequest::new("A", "B", "studio");
        request.additional_services = vec!["packing".to_string()];
        let details = request.into_details(Some(12.5));
        assert_eq!(details.origin, "A");
        assert_eq!(details.distance_miles, Some(12.5));
        assert_eq!(details.additional_services, vec!["packing".to_string()]);
    }
}
