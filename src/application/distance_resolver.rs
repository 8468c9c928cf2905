//! Distance resolution between two place descriptions.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::RouteProvider;

/// Meters per statute mile, matching the provider's metric distances.
const METERS_PER_MILE: f64 = 1609.34;

/// Resolves a driving distance in miles via the route provider.
///
/// Wraps every provider failure into a `DistanceUnavailable` domain error;
/// callers never see a raw provider error.
#[derive(Clone)]
pub struct DistanceResolver {
    provider: Arc<dyn RouteProvider>,
}

impl DistanceResolver {
    pub fn new(provider: Arc<dyn RouteProvider>) -> Self {
        Self { provider }
    }

    /// Returns the driving distance in miles, rounded to 2 decimals.
    pub async fn resolve(&self, origin: &str, destination: &str) -> Result<f64, DomainError> {
        let meters = self
            .provider
            .driving_distance_meters(origin, destination)
            .await
            .map_err(|err| DomainError::new(ErrorCode::DistanceUnavailable, err.to_string()))?;

        let miles = meters / METERS_PER_MILE;
        Ok((miles * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RouteError;
    use async_trait::async_trait;

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

    struct FailingRoute;

    #[async_trait]
    impl RouteProvider for FailingRoute {
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

    #[tokio::test]
    async fn meters_convert_to_rounded_miles() {
        let resolver = DistanceResolver::new(Arc::new(FixedRoute(300_000.0)));
        let miles = resolver.resolve("Austin, TX", "Dallas, TX").await.unwrap();
        assert_eq!(miles, 186.41);
    }

    #[tokio::test]
    async fn provider_failure_becomes_distance_unavailable() {
        let resolver = DistanceResolver::new(Arc::new(FailingRoute));
        let err = resolver.resolve("Nowhere", "Elsewhere").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DistanceUnavailable);
    }
}
