//! Anchor-radius coverage evaluation over hex cells.
//!
//! A cell is covered iff the geodesic distance from its centroid to at
//! least one anchor point is within the radius. Coverage is judged from
//! the centroid, not the cell boundary; that is a policy choice, and a
//! cell touching the radius only at its edge reads uncovered.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::grid::{HexCell, HexGrid};
use crate::haversine::haversine_km;
use crate::point::GeoPoint;
use crate::traits::CellIndexer;

/// A cell annotated with its coverage flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageCell {
    pub cell: HexCell,
    pub covered: bool,
}

/// Annotated cells plus the summary the boundary renders as metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub cells: Vec<CoverageCell>,
    pub total_cells: usize,
    pub covered_cells: usize,
    pub uncovered_cells: usize,
    /// Covered share in percent; 0.0 for an empty cell set, never NaN.
    pub coverage_rate: f64,
}

/// Unions the distinct cells of both point sets so coverage runs over
/// every cell that could plausibly appear, not only cells containing
/// anchors.
pub fn candidate_cells<I: CellIndexer>(
    grid: &HexGrid<I>,
    populations: &[GeoPoint],
    anchors: &[GeoPoint],
    resolution: u8,
) -> Result<Vec<HexCell>> {
    let mut union = Vec::with_capacity(populations.len() + anchors.len());
    union.extend_from_slice(populations);
    union.extend_from_slice(anchors);
    grid.distinct_cells(&union, resolution)
}

/// Flags every cell covered/uncovered against the anchor set.
///
/// Cross-product test, O(cells x anchors); both sets are bounded in
/// practice and the exactness matters more than pruning. An empty anchor
/// set yields all cells uncovered, never an error.
pub fn evaluate_coverage<I: CellIndexer>(
    grid: &HexGrid<I>,
    cells: &[HexCell],
    anchors: &[GeoPoint],
    radius_km: f64,
    cancel: &CancelToken,
) -> Result<CoverageReport> {
    let mut annotated = Vec::with_capacity(cells.len());

    for cell in cells {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let centroid = grid.centroid(cell)?;
        let covered = anchors
            .iter()
            .any(|anchor| haversine_km(centroid, *anchor) <= radius_km);
        annotated.push(CoverageCell {
            cell: cell.clone(),
            covered,
        });
    }

    let total_cells = annotated.len();
    let covered_cells = annotated.iter().filter(|cell| cell.covered).count();
    let uncovered_cells = total_cells - covered_cells;
    let coverage_rate = if total_cells == 0 {
        0.0
    } else {
        covered_cells as f64 / total_cells as f64 * 100.0
    };

    info!(
        covered = covered_cells,
        total = total_cells,
        coverage_rate,
        radius_km,
        "coverage analysis complete"
    );

    Ok(CoverageReport {
        cells: annotated,
        total_cells,
        covered_cells,
        uncovered_cells,
        coverage_rate,
    })
}
