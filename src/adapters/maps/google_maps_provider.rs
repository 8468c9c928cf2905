//! Google Distance Matrix adapter for the route port.
//!
//! One origin, one destination, driving mode. The element status decides
//! routability; anything else (transport failure, non-OK API status,
//! unexpected payload shape) normalizes to `RouteError::Unavailable`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{RouteError, RouteProvider};

/// Configuration for the Distance Matrix adapter.
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL (used to point tests at a stub server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Google Distance Matrix API adapter.
pub struct GoogleMapsProvider {
    config: GoogleMapsConfig,
    client: Client,
}

impl GoogleMapsProvider {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn matrix_url(&self) -> String {
        format!("{}/distancematrix/json", self.config.base_url)
    }
}

#[async_trait]
impl RouteProvider for GoogleMapsProvider {
    async fn driving_distance_meters(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, RouteError> {
        let response = self
            .client
            .get(self.matrix_url())
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", "driving"),
                ("key", self.config.api_key()),
            ])
            .send()
            .await
            .map_err(|err| RouteError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Unavailable(format!(
                "distance matrix endpoint returned {}",
                status
            )));
        }

        let body: MatrixResponse = response
            .json()
            .await
            .map_err(|err| RouteError::Unavailable(err.to_string()))?;

        if body.status != "OK" {
            return Err(RouteError::Unavailable(format!(
                "distance matrix status {}",
                body.status
            )));
        }

        let element = body
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| RouteError::Unavailable("response carried no elements".to_string()))?;

        if element.status != "OK" {
            return Err(RouteError::NotRouteable {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }

        element
            .distance
            .as_ref()
            .map(|d| d.value)
            .ok_or_else(|| RouteError::Unavailable("element carried no distance".to_string()))
    }
}

// ── Wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixDistance>,
}

#[derive(Debug, Deserialize)]
struct MatrixDistance {
    value: f64,
}
