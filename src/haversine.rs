//! Haversine great-circle distance (fallback when the exact provider is
//! unavailable).
//!
//! Less accurate than a geodesic service (treats the Earth as a sphere)
//! but always available, and close enough that both are computed side by
//! side at the boundary for validation.

use crate::point::GeoPoint;
use crate::traits::{DistanceProvider, ProviderError};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
///
/// Symmetric, zero for identical points.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude().to_radians();
    let lat2_rad = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lng = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine-backed distance provider. Infallible for validated points.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineProvider;

impl DistanceProvider for HaversineProvider {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> Result<f64, ProviderError> {
        Ok(haversine_km(from, to))
    }
}
