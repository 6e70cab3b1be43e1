//! Core strategy traits for the analysis engine.
//!
//! Hex indexing and exact geodesic distances are injectable so the core
//! stays testable without a live service: implementations can be an
//! in-process library, a fixed-answer stub, or a remote call.

use thiserror::Error;

use crate::error::Result;
use crate::point::GeoPoint;

/// Failure of an exact-distance provider for a single pair.
///
/// The matrix builder recovers these per pair via the haversine fallback;
/// one transient failure must not invalidate distances already computed
/// for other pairs.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Provides the exact distance in kilometers between two points.
///
/// Calls must be bounded by the implementation's configured timeout; a
/// timeout is reported as an ordinary [`ProviderError`].
pub trait DistanceProvider: Sync {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> std::result::Result<f64, ProviderError>;
}

/// Maps points into discrete hexagonal cells and back to cell centers.
///
/// The mapping must be a pure function: the same (point, resolution) pair
/// always yields the same cell id, and two points share an id iff they
/// fall in the same cell at that resolution.
pub trait CellIndexer {
    /// Returns the opaque cell id for a point at the given resolution.
    ///
    /// The indexer accepts the full resolution range of its grid scheme;
    /// narrower application policies are enforced by the caller.
    fn point_to_cell(&self, point: GeoPoint, resolution: u8) -> Result<String>;

    /// Returns the geometric center of a cell.
    fn cell_centroid(&self, cell_id: &str) -> Result<GeoPoint>;
}
