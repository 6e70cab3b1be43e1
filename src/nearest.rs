//! Nearest-anchor search.
//!
//! For a selected origin, ranks anchor points (stations) by their exact
//! provider distance and reports the haversine distance alongside, plus
//! the difference between the two. The boundary shows both columns, so a
//! provider that drifts from the spherical model is visible there.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::haversine::haversine_km;
use crate::point::{GeoPoint, LabeledPoint};
use crate::traits::DistanceProvider;

/// One ranked anchor with both distance computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestAnchor {
    pub point: LabeledPoint,
    /// Exact provider distance; haversine when the provider failed for
    /// this anchor.
    pub provider_km: f64,
    pub haversine_km: f64,
    /// Absolute difference between the two columns.
    pub diff_km: f64,
}

/// Returns the `top_n` anchors nearest to `origin`, ascending by provider
/// distance. Provider failures fall back to haversine per anchor.
pub fn nearest_anchors<P>(
    origin: GeoPoint,
    anchors: &[LabeledPoint],
    top_n: usize,
    provider: &P,
) -> Result<Vec<NearestAnchor>>
where
    P: DistanceProvider + ?Sized,
{
    let mut ranked: Vec<NearestAnchor> = anchors
        .iter()
        .map(|anchor| {
            let sphere_km = haversine_km(origin, anchor.point);
            let provider_km = match provider.distance_km(origin, anchor.point) {
                Ok(km) => km,
                Err(err) => {
                    warn!(
                        anchor = %anchor.id,
                        error = %err,
                        "provider failed for anchor, using haversine"
                    );
                    sphere_km
                }
            };
            NearestAnchor {
                point: anchor.clone(),
                provider_km,
                haversine_km: sphere_km,
                diff_km: (provider_km - sphere_km).abs(),
            }
        })
        .collect();

    // Distances are finite for validated points, so total_cmp is a plain
    // ascending sort.
    ranked.sort_by(|a, b| a.provider_km.total_cmp(&b.provider_km));
    ranked.truncate(top_n);
    Ok(ranked)
}
