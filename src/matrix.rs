//! Symmetric distance matrix construction.
//!
//! Pairs are computed as a parallel fan-out with per-pair failure
//! handling: a provider failure for one pair falls back to the haversine
//! distance for that pair only, leaving every other pair untouched.

use rayon::prelude::*;
use tracing::warn;

use crate::error::Result;
use crate::haversine::haversine_km;
use crate::point::GeoPoint;
use crate::traits::{DistanceProvider, ProviderError};

/// A square, symmetric, zero-diagonal matrix of kilometers, indexed by
/// input point order. Built fresh per request.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
    fallback_pairs: usize,
}

impl DistanceMatrix {
    /// Builds the full matrix from an exact-distance provider, falling
    /// back to haversine per pair on provider failure.
    pub fn build<P>(points: &[GeoPoint], provider: &P) -> Result<Self>
    where
        P: DistanceProvider + ?Sized,
    {
        let n = points.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        // Each pair is independent, so the provider calls fan out. A
        // non-finite or negative answer counts as a failure for that pair.
        let computed: Vec<((usize, usize), f64, bool)> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let answer = provider
                    .distance_km(points[i], points[j])
                    .and_then(|km| {
                        if km.is_finite() && km >= 0.0 {
                            Ok(km)
                        } else {
                            Err(ProviderError::new(format!("unusable distance {km}")))
                        }
                    });
                match answer {
                    Ok(km) => ((i, j), km, false),
                    Err(err) => {
                        warn!(
                            from_index = i,
                            to_index = j,
                            error = %err,
                            "distance provider failed for pair, using haversine fallback"
                        );
                        ((i, j), haversine_km(points[i], points[j]), true)
                    }
                }
            })
            .collect();

        let mut values = vec![0.0; n * n];
        let mut fallback_pairs = 0;
        for ((i, j), km, fell_back) in computed {
            values[i * n + j] = km;
            values[j * n + i] = km;
            if fell_back {
                fallback_pairs += 1;
            }
        }

        Ok(Self {
            n,
            values,
            fallback_pairs,
        })
    }

    /// Matrix built purely from haversine distances.
    pub fn build_haversine(points: &[GeoPoint]) -> Result<Self> {
        Self::build(points, &crate::haversine::HaversineProvider)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of pairs that recovered through the haversine fallback.
    pub fn fallback_pairs(&self) -> usize {
        self.fallback_pairs
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }
}
