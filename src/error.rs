//! Crate-wide error type.
//!
//! Validation errors are raised immediately and are always caller-visible;
//! per-pair distance provider failures are recovered locally by the matrix
//! builder and never reach the caller through this type unless the adapter
//! itself is invoked directly.

use thiserror::Error;

/// Convenient result alias for the planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range coordinates. Carries the source row index
    /// when raised during ingestion so the caller can report which row failed.
    #[error("invalid point{}: {reason}", fmt_row(.row))]
    InvalidPoint { row: Option<usize>, reason: String },

    /// Grid resolution outside the supported range for the entry point used.
    #[error("invalid grid resolution {resolution}: supported range is {min}..={max}")]
    InvalidResolution { resolution: u8, min: u8, max: u8 },

    /// A cell identifier could not be parsed back into a grid cell.
    #[error("unknown hex cell id: {cell_id}")]
    InvalidCell { cell_id: String },

    /// Density thresholds must each lie in 0..=100 with low <= high.
    #[error("invalid density thresholds: low {low}% / high {high}%")]
    InvalidThresholds { low: u8, high: u8 },

    /// Route request exceeds the cardinality cap that bounds the
    /// factorial search.
    #[error("too many route points: {count} exceeds the maximum of {max}")]
    TooManyPoints { count: usize, max: usize },

    /// Routing needs at least two points.
    #[error("insufficient route points: got {count}, need at least 2")]
    InsufficientPoints { count: usize },

    /// An exact-distance provider failed for a single pair and the failure
    /// could not be recovered.
    #[error("distance provider failed for pair ({from_index}, {to_index}): {message}")]
    DistanceProviderFailure {
        from_index: usize,
        to_index: usize,
        message: String,
    },

    /// Caller-requested abort honored mid-computation.
    #[error("computation cancelled")]
    Cancelled,
}

fn fmt_row(row: &Option<usize>) -> String {
    match row {
        Some(index) => format!(" at row {index}"),
        None => String::new(),
    }
}
