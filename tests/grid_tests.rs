//! Hex grid and ingestion tests
//!
//! Determinism of the point-to-cell mapping, the engine-versus-policy
//! resolution ranges, and boundary ingestion errors.

use hexgrid_planner::error::Error;
use hexgrid_planner::grid::{
    ENGINE_MAX_RESOLUTION, ENGINE_MIN_RESOLUTION, HexGrid, ResolutionPolicy,
};
use hexgrid_planner::point::{GeoPoint, PointRow, labeled_points_from_rows, points_from_rows};

fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

fn row(lat: f64, lng: f64) -> PointRow {
    PointRow {
        latitude: Some(lat),
        longitude: Some(lng),
        ..Default::default()
    }
}

fn labeled_row(id: &str, lat: f64, lng: f64) -> PointRow {
    PointRow {
        latitude: Some(lat),
        longitude: Some(lng),
        id: Some(id.to_string()),
        name: Some(id.to_string()),
        category: Some("city".to_string()),
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn same_point_same_resolution_same_cell() {
    let grid = HexGrid::h3();
    let venice = point(45.4384, 12.3271);
    for resolution in 3..=8 {
        let first = grid.cell_for_point(venice, resolution).unwrap();
        let second = grid.cell_for_point(venice, resolution).unwrap();
        assert_eq!(first, second, "resolution {resolution}");
        assert_eq!(first.resolution, resolution);
    }
}

#[test]
fn distant_points_land_in_distinct_cells() {
    let grid = HexGrid::h3();
    let rome = grid.cell_for_point(point(41.9028, 12.4964), 5).unwrap();
    let milan = grid.cell_for_point(point(45.4642, 9.1900), 5).unwrap();
    assert_ne!(rome.cell_id, milan.cell_id);
}

#[test]
fn distinct_cells_preserve_first_seen_order() {
    let grid = HexGrid::h3();
    let rome = point(41.9028, 12.4964);
    let milan = point(45.4642, 9.1900);
    let cells = grid
        .distinct_cells(&[milan, rome, milan, rome], 5)
        .unwrap();
    assert_eq!(cells.len(), 2);
    let milan_cell = grid.cell_for_point(milan, 5).unwrap();
    assert_eq!(cells[0], milan_cell);
}

// ============================================================================
// Resolution ranges: engine 0..=15, application policy 3..=8
// ============================================================================

#[test]
fn engine_level_call_permits_resolution_nine() {
    let grid = HexGrid::h3();
    assert!(grid.cell_for_point(point(41.9, 12.5), 9).is_ok());
}

#[test]
fn policy_restricted_call_rejects_resolution_nine() {
    let grid = HexGrid::h3();
    let err = grid
        .cell_for_point_with_policy(point(41.9, 12.5), 9, ResolutionPolicy::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidResolution {
            resolution: 9,
            min: 3,
            max: 8
        }
    ));
}

#[test]
fn engine_bounds_are_the_grid_scheme_bounds() {
    let grid = HexGrid::h3();
    let rome = point(41.9, 12.5);
    assert!(grid.cell_for_point(rome, ENGINE_MIN_RESOLUTION).is_ok());
    assert!(grid.cell_for_point(rome, ENGINE_MAX_RESOLUTION).is_ok());
    assert!(grid.cell_for_point(rome, ENGINE_MAX_RESOLUTION + 1).is_err());
}

#[test]
fn policy_applies_to_distinct_cells_too() {
    let grid = HexGrid::h3();
    let points = [point(41.9, 12.5)];
    let policy = ResolutionPolicy::default();
    assert!(grid.distinct_cells_with_policy(&points, 2, policy).is_err());
    assert!(grid.distinct_cells_with_policy(&points, 5, policy).is_ok());
}

#[test]
fn custom_policy_overrides_the_default_range() {
    let policy = ResolutionPolicy::new(5, 6);
    assert!(policy.check(5).is_ok());
    assert!(policy.check(4).is_err());
    assert!(policy.check(7).is_err());
}

// ============================================================================
// Ingestion
// ============================================================================

#[test]
fn valid_rows_ingest_in_order() {
    let rows = vec![row(41.9028, 12.4964), row(45.4642, 9.1900)];
    let points = points_from_rows(&rows).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].latitude(), 41.9028);
}

#[test]
fn out_of_range_coordinates_name_the_row() {
    let rows = vec![row(41.9, 12.5), row(120.0, 12.5)];
    match points_from_rows(&rows).unwrap_err() {
        Error::InvalidPoint { row: Some(1), reason } => {
            assert!(reason.contains("latitude"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_field_rejects_the_batch() {
    let rows = vec![
        labeled_row("1", 41.9, 12.5),
        PointRow {
            latitude: Some(45.5),
            longitude: Some(9.2),
            id: Some("2".to_string()),
            name: Some("Milan".to_string()),
            category: None,
        },
    ];
    let err = labeled_points_from_rows(&rows).unwrap_err();
    assert!(matches!(err, Error::InvalidPoint { row: Some(1), .. }));
}

#[test]
fn labeled_rows_round_trip_identity_fields() {
    let rows = vec![labeled_row("osm-41", 41.9028, 12.4964)];
    let points = labeled_points_from_rows(&rows).unwrap();
    assert_eq!(points[0].id, "osm-41");
    assert_eq!(points[0].category, "city");
}

#[test]
fn point_rows_deserialize_from_service_json() {
    let json = r#"[
        {"latitude": 41.9028, "longitude": 12.4964, "id": "1", "name": "Rome", "category": "city"},
        {"latitude": 45.4642, "longitude": 9.19}
    ]"#;
    let rows: Vec<PointRow> = serde_json::from_str(json).unwrap();
    assert!(points_from_rows(&rows).is_ok());
    // Second row lacks identity fields, so labeled ingestion rejects it.
    assert!(labeled_points_from_rows(&rows).is_err());
}
