//! Exact route optimizer (brute-force exhaustive search).
//!
//! Evaluates every permutation of the input points and returns the open
//! path (no return leg) with the minimum total distance. The point count
//! is capped at [`MAX_ROUTE_POINTS`]: the search is O(n!), and 8 points
//! keep the worst case at 5040 suffix permutations per first-point block.
//! The cap is load-bearing for the optimality guarantee's latency bound,
//! not a UI nicety.
//!
//! Enumeration is lexicographic over the input index order, and ties are
//! broken by the first-encountered permutation, so results are
//! reproducible regardless of the parallel/sequential strategy.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::point::{GeoPoint, LabeledPoint};
use crate::traits::DistanceProvider;

/// Hard cap on route cardinality (8! = 40320 permutations).
pub const MAX_ROUTE_POINTS: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Fan the first-point blocks out across worker threads. The result
    /// is identical to the sequential search; this is purely a latency
    /// optimization.
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// The optimal visiting order and its total length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Permutation of `0..n` over the input point order.
    pub order: Vec<usize>,
    pub total_distance_km: f64,
}

/// Finds the shortest open path visiting all points, using an exact
/// provider for the distance matrix with per-pair haversine fallback.
pub fn optimize_route<P>(
    points: &[LabeledPoint],
    provider: &P,
    options: SolveOptions,
    cancel: &CancelToken,
) -> Result<RouteResult>
where
    P: DistanceProvider + ?Sized,
{
    let n = points.len();
    if n < 2 {
        return Err(Error::InsufficientPoints { count: n });
    }
    if n > MAX_ROUTE_POINTS {
        return Err(Error::TooManyPoints {
            count: n,
            max: MAX_ROUTE_POINTS,
        });
    }

    let coords: Vec<GeoPoint> = points.iter().map(|p| p.point).collect();
    let matrix = DistanceMatrix::build(&coords, provider)?;
    if matrix.fallback_pairs() > 0 {
        debug!(
            fallback_pairs = matrix.fallback_pairs(),
            "matrix built with haversine fallbacks"
        );
    }

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    // Two points have a single edge; no enumeration needed.
    if n == 2 {
        return Ok(RouteResult {
            order: vec![0, 1],
            total_distance_km: matrix.get(0, 1),
        });
    }

    let result = if options.parallel {
        search_parallel(&matrix, cancel)?
    } else {
        search_sequential(&matrix, cancel)?
    };

    info!(
        points = n,
        total_distance_km = result.total_distance_km,
        "optimal route found by exhaustive search"
    );
    Ok(result)
}

/// Convenience entry point using haversine distances throughout.
pub fn optimize_route_haversine(
    points: &[LabeledPoint],
    options: SolveOptions,
    cancel: &CancelToken,
) -> Result<RouteResult> {
    optimize_route(
        points,
        &crate::haversine::HaversineProvider,
        options,
        cancel,
    )
}

/// The best path found within one first-point block.
struct BlockBest {
    total_km: f64,
    order: Vec<usize>,
}

fn search_sequential(matrix: &DistanceMatrix, cancel: &CancelToken) -> Result<RouteResult> {
    let n = matrix.len();
    let mut blocks = Vec::with_capacity(n);
    for first in 0..n {
        blocks.push(search_block(first, matrix, cancel)?);
    }
    Ok(combine(blocks))
}

fn search_parallel(matrix: &DistanceMatrix, cancel: &CancelToken) -> Result<RouteResult> {
    let n = matrix.len();
    let blocks: Vec<BlockBest> = (0..n)
        .into_par_iter()
        .map(|first| search_block(first, matrix, cancel))
        .collect::<Result<Vec<_>>>()?;
    Ok(combine(blocks))
}

/// Combines per-block results in block order. Blocks are contiguous
/// ranges of the lexicographic enumeration and each block keeps its
/// first-encountered best, so strict `<` here preserves the global
/// first-permutation tie-break.
fn combine(blocks: Vec<BlockBest>) -> RouteResult {
    let mut best = BlockBest {
        total_km: f64::INFINITY,
        order: Vec::new(),
    };
    for block in blocks {
        if block.total_km < best.total_km {
            best = block;
        }
    }
    RouteResult {
        order: best.order,
        total_distance_km: best.total_km,
    }
}

/// Exhaustive lexicographic search over all permutations starting with
/// `first`. No pruning: every permutation is evaluated.
fn search_block(first: usize, matrix: &DistanceMatrix, cancel: &CancelToken) -> Result<BlockBest> {
    let n = matrix.len();
    let mut used = vec![false; n];
    used[first] = true;
    let mut current = Vec::with_capacity(n);
    current.push(first);

    let mut best = BlockBest {
        total_km: f64::INFINITY,
        order: Vec::new(),
    };
    extend(
        &mut current,
        &mut used,
        first,
        0.0,
        matrix,
        cancel,
        &mut best,
    )?;
    Ok(best)
}

fn extend(
    current: &mut Vec<usize>,
    used: &mut [bool],
    last: usize,
    running_km: f64,
    matrix: &DistanceMatrix,
    cancel: &CancelToken,
    best: &mut BlockBest,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let n = matrix.len();
    if current.len() == n {
        if running_km < best.total_km {
            best.total_km = running_km;
            best.order = current.clone();
        }
        return Ok(());
    }

    // Ascending index order makes the enumeration lexicographic.
    for next in 0..n {
        if used[next] {
            continue;
        }
        used[next] = true;
        current.push(next);
        extend(
            current,
            used,
            next,
            running_km + matrix.get(last, next),
            matrix,
            cancel,
            best,
        )?;
        current.pop();
        used[next] = false;
    }
    Ok(())
}
