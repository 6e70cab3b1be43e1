//! Geographic point types and row ingestion.
//!
//! Points entering the engine are validated once, at construction; every
//! later layer may assume well-formed coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if let Some(reason) = coordinate_problem(latitude, longitude) {
            return Err(Error::InvalidPoint { row: None, reason });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn coordinate_problem(latitude: f64, longitude: f64) -> Option<String> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Some(format!(
            "coordinates must be finite, got ({latitude}, {longitude})"
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Some(format!("latitude {latitude} outside [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Some(format!("longitude {longitude} outside [-180, 180]"));
    }
    None
}

/// A point with the identity fields used by labeled operations
/// (route optimization, nearest-anchor search).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub point: GeoPoint,
    pub id: String,
    pub name: String,
    pub category: String,
}

impl LabeledPoint {
    pub fn new(
        point: GeoPoint,
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            point,
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// One raw row from the geospatial query service. Fields are optional so
/// that missing data is rejected here, with the row index, rather than at
/// deserialization with no context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointRow {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Converts raw rows into bare points. The first malformed row fails the
/// whole batch; nothing is silently dropped.
pub fn points_from_rows(rows: &[PointRow]) -> Result<Vec<GeoPoint>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| point_from_row(index, row))
        .collect()
}

/// Converts raw rows into labeled points, additionally requiring the
/// identity fields and rejecting duplicate ids within the batch.
pub fn labeled_points_from_rows(rows: &[PointRow]) -> Result<Vec<LabeledPoint>> {
    let mut seen_ids: Vec<&str> = Vec::with_capacity(rows.len());
    let mut points = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let point = point_from_row(index, row)?;
        let id = required_field(index, row.id.as_deref(), "id")?;
        let name = required_field(index, row.name.as_deref(), "name")?;
        let category = required_field(index, row.category.as_deref(), "category")?;

        if seen_ids.contains(&id) {
            return Err(Error::InvalidPoint {
                row: Some(index),
                reason: format!("duplicate id {id:?} within request"),
            });
        }
        seen_ids.push(id);

        points.push(LabeledPoint::new(point, id, name, category));
    }

    Ok(points)
}

fn point_from_row(index: usize, row: &PointRow) -> Result<GeoPoint> {
    let latitude = row.latitude.ok_or_else(|| Error::InvalidPoint {
        row: Some(index),
        reason: "missing latitude".to_string(),
    })?;
    let longitude = row.longitude.ok_or_else(|| Error::InvalidPoint {
        row: Some(index),
        reason: "missing longitude".to_string(),
    })?;

    GeoPoint::new(latitude, longitude).map_err(|err| match err {
        Error::InvalidPoint { reason, .. } => Error::InvalidPoint {
            row: Some(index),
            reason,
        },
        other => other,
    })
}

fn required_field<'a>(index: usize, value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value.ok_or_else(|| Error::InvalidPoint {
        row: Some(index),
        reason: format!("missing {field}"),
    })
}
