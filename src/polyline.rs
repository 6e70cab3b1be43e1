//! Rendering-ready path geometry for an optimized route.
//!
//! Stores latitude/longitude points directly. The rendering layer draws
//! the consecutive segments; any encoding into a compact wire format
//! happens at the boundary, not here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::LabeledPoint;
use crate::solver::RouteResult;

/// An ordered coordinate sequence, each point a (latitude, longitude)
/// tuple in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Resolves a route's visiting order against the request's point list
    /// into the coordinate sequence to draw. An order index with no
    /// matching point is a hard error, not a skipped vertex.
    pub fn from_route(result: &RouteResult, points: &[LabeledPoint]) -> Result<Self> {
        let resolved = result
            .order
            .iter()
            .map(|&index| {
                points
                    .get(index)
                    .map(|p| (p.point.latitude(), p.point.longitude()))
                    .ok_or_else(|| Error::InvalidPoint {
                        row: Some(index),
                        reason: format!(
                            "route order references index {index} but only {} points were given",
                            points.len()
                        ),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points: resolved })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Consecutive coordinate pairs, one per hop of the path.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GeoPoint;

    fn labeled(id: &str, lat: f64, lng: f64) -> LabeledPoint {
        LabeledPoint::new(GeoPoint::new(lat, lng).unwrap(), id, id, "place")
    }

    #[test]
    fn from_route_orders_points_by_visit_order() {
        let points = vec![
            labeled("a", 41.9, 12.5),
            labeled("b", 45.5, 9.2),
            labeled("c", 45.4, 12.3),
        ];
        let result = RouteResult {
            order: vec![1, 0, 2],
            total_distance_km: 0.0,
        };
        let polyline = Polyline::from_route(&result, &points).unwrap();
        assert_eq!(
            polyline.points(),
            &[(45.5, 9.2), (41.9, 12.5), (45.4, 12.3)]
        );
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let polyline = Polyline::new(vec![(41.9, 12.5), (45.5, 9.2), (45.4, 12.3)]);
        let segments: Vec<_> = polyline.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], ((41.9, 12.5), (45.5, 9.2)));
        assert_eq!(segments[1], ((45.5, 9.2), (45.4, 12.3)));
    }

    #[test]
    fn out_of_range_order_index_is_an_error() {
        let points = vec![labeled("a", 41.9, 12.5)];
        let result = RouteResult {
            order: vec![0, 1],
            total_distance_km: 0.0,
        };
        assert!(Polyline::from_route(&result, &points).is_err());
    }

    #[test]
    fn empty_polyline_has_no_segments() {
        let polyline = Polyline::new(vec![]);
        assert!(polyline.points().is_empty());
        assert_eq!(polyline.segments().count(), 0);
    }
}
