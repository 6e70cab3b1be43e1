//! Three-way density classification of hex cells.
//!
//! Categories are relative to the observed maximum count, with thresholds
//! expressed as percentages of that maximum. Output is fully derived:
//! every threshold change recomputes the whole report, there is no
//! incremental update.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::grid::HexCell;

/// Density bucket relative to the busiest cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityCategory {
    Low,
    Medium,
    High,
}

/// Threshold percentages of the maximum count.
///
/// Both lie in 0..=100 with `low_pct <= high_pct`. Equal thresholds are
/// legal and collapse the medium band to empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityThresholds {
    pub low_pct: u8,
    pub high_pct: u8,
}

impl DensityThresholds {
    pub fn new(low_pct: u8, high_pct: u8) -> Result<Self> {
        if low_pct > 100 || high_pct > 100 || low_pct > high_pct {
            return Err(Error::InvalidThresholds {
                low: low_pct,
                high: high_pct,
            });
        }
        Ok(Self { low_pct, high_pct })
    }
}

/// A cell annotated with its count and density bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    pub cell: HexCell,
    pub count: u64,
    pub category: DensityCategory,
    pub percent_of_max: f64,
}

/// Aggregate statistics over a density run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityStats {
    pub total_cells: usize,
    pub total_count: u64,
    pub max_count: u64,
    pub mean_count: f64,
}

/// Classified cells plus their aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityReport {
    pub cells: Vec<DensityCell>,
    pub stats: DensityStats,
}

/// Buckets each cell by its count relative to the observed maximum.
///
/// Threshold boundaries are inclusive: a count exactly at
/// `high_pct * max / 100` classifies High, not Medium. That tie-break is
/// user-visible in legend boundaries and must hold exactly.
pub fn classify_density(
    cells: &[(HexCell, u64)],
    thresholds: DensityThresholds,
) -> Result<DensityReport> {
    let max_count = cells.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let low_cut = max_count as f64 * f64::from(thresholds.low_pct) / 100.0;
    let high_cut = max_count as f64 * f64::from(thresholds.high_pct) / 100.0;

    let classified: Vec<DensityCell> = cells
        .iter()
        .map(|(cell, count)| {
            let value = *count as f64;
            let category = if value >= high_cut {
                DensityCategory::High
            } else if value >= low_cut {
                DensityCategory::Medium
            } else {
                DensityCategory::Low
            };
            let percent_of_max = if max_count == 0 {
                0.0
            } else {
                value / max_count as f64 * 100.0
            };
            DensityCell {
                cell: cell.clone(),
                count: *count,
                category,
                percent_of_max,
            }
        })
        .collect();

    let total_count: u64 = cells.iter().map(|(_, count)| *count).sum();
    let stats = DensityStats {
        total_cells: cells.len(),
        total_count,
        max_count,
        mean_count: if cells.is_empty() {
            0.0
        } else {
            total_count as f64 / cells.len() as f64
        },
    };

    info!(
        cells = stats.total_cells,
        max_count = stats.max_count,
        low_pct = thresholds.low_pct,
        high_pct = thresholds.high_pct,
        "classified cell densities"
    );

    Ok(DensityReport {
        cells: classified,
        stats,
    })
}
