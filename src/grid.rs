//! Hexagonal grid indexing.
//!
//! Buckets points into H3-style hexagonal cells at a given resolution and
//! recovers cell centroids. The grid scheme itself supports resolutions
//! 0..=15; the application narrows that to 3..=8 through a
//! [`ResolutionPolicy`] — a caller-imposed policy, not an engine
//! limitation.

use std::collections::HashSet;

use h3o::{CellIndex, LatLng, Resolution};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::point::GeoPoint;
use crate::traits::CellIndexer;

/// Full resolution range of the hex grid scheme.
pub const ENGINE_MIN_RESOLUTION: u8 = 0;
pub const ENGINE_MAX_RESOLUTION: u8 = 15;

/// Application-facing resolution bounds. Higher resolution means smaller
/// cells and finer bucketing.
pub const DEFAULT_MIN_RESOLUTION: u8 = 3;
pub const DEFAULT_MAX_RESOLUTION: u8 = 8;

/// One hexagonal cell at a fixed resolution.
///
/// The id is an opaque string key: two points map to the same id iff they
/// fall in the same cell at that resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCell {
    pub cell_id: String,
    pub resolution: u8,
}

/// Caller-imposed bounds on the grid resolution, narrower than the engine
/// range. The default matches the application policy of 3..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    pub min: u8,
    pub max: u8,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_RESOLUTION,
            max: DEFAULT_MAX_RESOLUTION,
        }
    }
}

impl ResolutionPolicy {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Rejects resolutions outside the policy bounds. No clamping.
    pub fn check(&self, resolution: u8) -> Result<()> {
        if resolution < self.min || resolution > self.max {
            return Err(Error::InvalidResolution {
                resolution,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// In-process hex indexer backed by the H3 grid library.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Indexer;

impl CellIndexer for H3Indexer {
    fn point_to_cell(&self, point: GeoPoint, resolution: u8) -> Result<String> {
        let resolution = engine_resolution(resolution)?;
        let latlng =
            LatLng::new(point.latitude(), point.longitude()).map_err(|err| Error::InvalidPoint {
                row: None,
                reason: err.to_string(),
            })?;
        Ok(latlng.to_cell(resolution).to_string())
    }

    fn cell_centroid(&self, cell_id: &str) -> Result<GeoPoint> {
        let cell: CellIndex = cell_id.parse().map_err(|_| Error::InvalidCell {
            cell_id: cell_id.to_string(),
        })?;
        let center = LatLng::from(cell);
        GeoPoint::new(center.lat(), center.lng())
    }
}

fn engine_resolution(resolution: u8) -> Result<Resolution> {
    Resolution::try_from(resolution).map_err(|_| Error::InvalidResolution {
        resolution,
        min: ENGINE_MIN_RESOLUTION,
        max: ENGINE_MAX_RESOLUTION,
    })
}

/// Grid facade over an injected cell indexer.
#[derive(Debug, Clone, Default)]
pub struct HexGrid<I: CellIndexer> {
    indexer: I,
}

impl HexGrid<H3Indexer> {
    /// Grid backed by the in-process H3 indexer.
    pub fn h3() -> Self {
        Self::new(H3Indexer)
    }
}

impl<I: CellIndexer> HexGrid<I> {
    pub fn new(indexer: I) -> Self {
        Self { indexer }
    }

    /// Maps a point to its cell. Accepts the engine's full resolution
    /// range; pure and deterministic.
    pub fn cell_for_point(&self, point: GeoPoint, resolution: u8) -> Result<HexCell> {
        let cell_id = self.indexer.point_to_cell(point, resolution)?;
        Ok(HexCell {
            cell_id,
            resolution,
        })
    }

    /// Boundary entry point: same mapping, but the resolution must also
    /// satisfy the application policy.
    pub fn cell_for_point_with_policy(
        &self,
        point: GeoPoint,
        resolution: u8,
        policy: ResolutionPolicy,
    ) -> Result<HexCell> {
        policy.check(resolution)?;
        self.cell_for_point(point, resolution)
    }

    /// Geometric center of a cell.
    pub fn centroid(&self, cell: &HexCell) -> Result<GeoPoint> {
        self.indexer.cell_centroid(&cell.cell_id)
    }

    /// Dedupes overlapping points into the covering cell set, preserving
    /// first-seen order.
    pub fn distinct_cells(&self, points: &[GeoPoint], resolution: u8) -> Result<Vec<HexCell>> {
        let mut seen: HashSet<String> = HashSet::with_capacity(points.len());
        let mut cells = Vec::new();

        for point in points {
            let cell = self.cell_for_point(*point, resolution)?;
            if seen.insert(cell.cell_id.clone()) {
                cells.push(cell);
            }
        }

        info!(
            cells = cells.len(),
            points = points.len(),
            resolution,
            "bucketed points into distinct hex cells"
        );
        Ok(cells)
    }

    /// Boundary entry point for [`Self::distinct_cells`] with a policy check.
    pub fn distinct_cells_with_policy(
        &self,
        points: &[GeoPoint],
        resolution: u8,
        policy: ResolutionPolicy,
    ) -> Result<Vec<HexCell>> {
        policy.check(resolution)?;
        self.distinct_cells(points, resolution)
    }
}
