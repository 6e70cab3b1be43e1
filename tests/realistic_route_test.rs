//! End-to-end scenarios over real Italian geography
//!
//! Exercises the full request flow the boundary performs: ingest rows,
//! bucket and classify cells, evaluate coverage, optimize a route, and
//! resolve the path geometry.

use hexgrid_planner::cancel::CancelToken;
use hexgrid_planner::coverage::{candidate_cells, evaluate_coverage};
use hexgrid_planner::density::{DensityCategory, DensityThresholds, classify_density};
use hexgrid_planner::grid::{HexGrid, ResolutionPolicy};
use hexgrid_planner::point::{GeoPoint, PointRow, labeled_points_from_rows};
use hexgrid_planner::polyline::Polyline;
use hexgrid_planner::solver::{SolveOptions, optimize_route_haversine};

fn city_row(id: &str, name: &str, lat: f64, lng: f64) -> PointRow {
    PointRow {
        latitude: Some(lat),
        longitude: Some(lng),
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        category: Some("city".to_string()),
    }
}

fn tour_rows() -> Vec<PointRow> {
    vec![
        city_row("1", "Rome", 41.9028, 12.4964),
        city_row("2", "Florence", 43.7696, 11.2558),
        city_row("3", "Venice", 45.4384, 12.3271),
        city_row("4", "Milan", 45.4642, 9.1900),
        city_row("5", "Naples", 40.8518, 14.2681),
    ]
}

#[test]
fn italian_tour_routes_through_adjacent_cities() {
    let places = labeled_points_from_rows(&tour_rows()).unwrap();
    let result =
        optimize_route_haversine(&places, SolveOptions::default(), &CancelToken::new()).unwrap();

    // The optimal open tour keeps Naples and Rome adjacent: they sit on
    // the same side of the country and splitting them forces a back-track.
    let naples = places.iter().position(|p| p.name == "Naples").unwrap();
    let rome = places.iter().position(|p| p.name == "Rome").unwrap();
    let pos_of = |index: usize| result.order.iter().position(|&o| o == index).unwrap();
    assert_eq!(pos_of(naples).abs_diff(pos_of(rome)), 1);

    // Rome-Milan alone is ~477 km, so a five-city tour is longer than
    // that but clearly bounded.
    assert!(result.total_distance_km > 477.0);
    assert!(result.total_distance_km < 1500.0);
}

#[test]
fn route_geometry_resolves_every_stop() {
    let places = labeled_points_from_rows(&tour_rows()).unwrap();
    let result =
        optimize_route_haversine(&places, SolveOptions::default(), &CancelToken::new()).unwrap();
    let polyline = Polyline::from_route(&result, &places).unwrap();

    assert_eq!(polyline.points().len(), places.len());
    assert_eq!(polyline.segments().count(), places.len() - 1);

    let first = result.order[0];
    assert_eq!(
        polyline.points()[0],
        (
            places[first].point.latitude(),
            places[first].point.longitude()
        )
    );
}

#[test]
fn grid_analysis_pipeline_over_cities_and_stations() {
    let grid = HexGrid::h3();
    let policy = ResolutionPolicy::default();
    let resolution = 5;

    let cities: Vec<GeoPoint> = labeled_points_from_rows(&tour_rows())
        .unwrap()
        .into_iter()
        .map(|p| p.point)
        .collect();
    // Stations: Roma Termini and Milano Centrale.
    let stations = [
        GeoPoint::new(41.9010, 12.5011).unwrap(),
        GeoPoint::new(45.4862, 9.2048).unwrap(),
    ];

    // Density over city cells, counting one city per cell here.
    let cells = grid
        .distinct_cells_with_policy(&cities, resolution, policy)
        .unwrap();
    let counted: Vec<_> = cells.iter().map(|cell| (cell.clone(), 1u64)).collect();
    let density =
        classify_density(&counted, DensityThresholds::new(20, 50).unwrap()).unwrap();
    assert_eq!(density.cells.len(), cells.len());
    // Uniform counts all sit at the maximum.
    assert!(
        density
            .cells
            .iter()
            .all(|c| c.category == DensityCategory::High)
    );

    // Coverage over the union of city and station cells.
    let union = candidate_cells(&grid, &cities, &stations, resolution).unwrap();
    let report =
        evaluate_coverage(&grid, &union, &stations, 25.0, &CancelToken::new()).unwrap();
    assert_eq!(report.total_cells, union.len());
    assert!(report.covered_cells >= 2, "both station cells are covered");
    assert!(report.coverage_rate > 0.0);
    assert!(report.coverage_rate <= 100.0);
}
