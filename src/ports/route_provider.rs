//! Route Provider Port - interface to the geocoding/distance service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a route provider can surface.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// The provider answered but found no drivable route between the
    /// places (non-OK routing element status).
    #[error("no drivable route from '{origin}' to '{destination}'")]
    NotRouteable { origin: String, destination: String },

    /// The provider call failed, timed out, or was rejected.
    #[error("route provider unavailable: {0}")]
    Unavailable(String),
}

/// Port for driving-distance lookup between two place descriptions.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Returns the driving distance in meters.
    ///
    /// Raw provider failures never cross this boundary; implementations
    /// normalize everything into [`RouteError`].
    async fn driving_distance_meters(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, RouteError>;
}
