//! Deterministic fixtures for unit and behaviour tests.
//!
//! Routes built here run north along the prime meridian, where great-circle
//! distance is exactly proportional to latitude. That makes "the station at
//! mile 490" an exact statement rather than an approximation.

use crate::geodesy::{EARTH_RADIUS_MILES, GeoPoint};
use crate::route::RouteGeometry;
use crate::station::{Station, StationCatalog};

/// Point on the prime meridian `mile` miles north of the equator.
pub fn meridian_point(mile: f64) -> GeoPoint {
    GeoPoint::new((mile / EARTH_RADIUS_MILES).to_degrees(), 0.0)
}

/// Meridian route from mile 0 to `total_miles` with a vertex every
/// `step_miles`.
///
/// The final vertex is always placed at `total_miles`.
pub fn meridian_route(total_miles: f64, step_miles: f64) -> Vec<GeoPoint> {
    let steps = (total_miles / step_miles).floor() as usize;
    let mut route: Vec<GeoPoint> = (0..=steps)
        .map(|i| meridian_point(i as f64 * step_miles))
        .collect();
    if (steps as f64 * step_miles) < total_miles {
        route.push(meridian_point(total_miles));
    }
    route
}

/// Meridian route geometry whose reported length equals `total_miles`.
pub fn meridian_geometry(total_miles: f64, step_miles: f64) -> RouteGeometry {
    RouteGeometry {
        coordinates: meridian_route(total_miles, step_miles),
        total_distance_miles: total_miles,
    }
}

/// Catalog of stations sitting on the meridian at `(mile, price)` pairs, in
/// the given order.
///
/// # Panics
///
/// Panics if a price is negative or not finite.
pub fn stations_at_miles(stations: &[(f64, f64)]) -> StationCatalog {
    stations
        .iter()
        .map(|&(mile, price)| {
            Station::new(meridian_point(mile), price).expect("test station must be valid")
        })
        .collect()
}
