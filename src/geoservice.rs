//! HTTP adapter for a hosted exact-distance service.
//!
//! Queries one pair per request. Every failure (connect, HTTP status,
//! decode, timeout) surfaces as a per-pair [`ProviderError`] so the
//! matrix builder can fall back to haversine for that pair alone.

use serde::Deserialize;

use crate::point::GeoPoint;
use crate::traits::{DistanceProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct GeoServiceConfig {
    pub base_url: String,
    /// Bound on each pair lookup; a timeout is an ordinary per-pair
    /// failure, not a fatal abort.
    pub timeout_secs: u64,
}

impl Default for GeoServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Blocking client for the `/distance` endpoint of a geodesic service.
#[derive(Debug, Clone)]
pub struct GeoServiceClient {
    config: GeoServiceConfig,
    client: reqwest::blocking::Client,
}

impl GeoServiceClient {
    pub fn new(config: GeoServiceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DistanceProvider for GeoServiceClient {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> Result<f64, ProviderError> {
        let url = format!(
            "{}/distance?from={:.6},{:.6}&to={:.6},{:.6}",
            self.config.base_url,
            from.latitude(),
            from.longitude(),
            to.latitude(),
            to.longitude()
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DistanceResponse>())
            .map_err(|err| ProviderError::new(err.to_string()))?;

        Ok(response.distance_km)
    }
}

#[derive(Debug, Deserialize)]
struct DistanceResponse {
    distance_km: f64,
}
