//! Behavioural tests for placing stations onto a route.

use fuelstop_core::{
    GeoPoint, ResampledRoute, RouteMatcher, RouteMatching, RouteProjection, resample,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[fixture]
fn route() -> RefCell<Option<ResampledRoute>> {
    RefCell::new(None)
}

#[fixture]
fn projection() -> RefCell<Option<RouteProjection>> {
    RefCell::new(None)
}

fn mileage(route: &RefCell<Option<ResampledRoute>>, index: usize) -> f64 {
    route
        .borrow()
        .as_ref()
        .expect("route built")
        .get(index)
        .expect("vertex exists")
        .mile_position
}

fn project(
    route: &RefCell<Option<ResampledRoute>>,
    projection: &RefCell<Option<RouteProjection>>,
    matching: RouteMatching,
    station: GeoPoint,
) {
    let route = route.borrow();
    let matcher = RouteMatcher::new(route.as_ref().expect("route built"), matching);
    *projection.borrow_mut() = Some(matcher.project(station));
}

#[given("a straight route with vertices every degree of latitude")]
fn given_straight_route(#[from(route)] route: &RefCell<Option<ResampledRoute>>) {
    let coords: Vec<GeoPoint> = (0..=8)
        .map(|i| GeoPoint::new(30.0 + f64::from(i), -97.0))
        .collect();
    *route.borrow_mut() = Some(resample(&coords).expect("non-empty route"));
}

#[when("I match a station slightly east of the fourth vertex by nearest vertex")]
fn when_match_vertex(
    #[from(route)] route: &RefCell<Option<ResampledRoute>>,
    #[from(projection)] projection: &RefCell<Option<RouteProjection>>,
) {
    project(
        route,
        projection,
        RouteMatching::NearestVertex,
        GeoPoint::new(33.2, -96.9),
    );
}

#[when("I match a station midway between the fourth and fifth vertices by segment projection")]
fn when_match_segment(
    #[from(route)] route: &RefCell<Option<ResampledRoute>>,
    #[from(projection)] projection: &RefCell<Option<RouteProjection>>,
) {
    project(
        route,
        projection,
        RouteMatching::SegmentProjection,
        GeoPoint::new(33.5, -97.0),
    );
}

#[then("the station is placed at the fourth vertex's mileage")]
fn then_vertex_mileage(
    #[from(route)] route: &RefCell<Option<ResampledRoute>>,
    #[from(projection)] projection: &RefCell<Option<RouteProjection>>,
) {
    let placed = projection.borrow().expect("matched");
    assert_eq!(placed.mile_position, mileage(route, 3));
    assert!(placed.off_route_distance > 0.0);
}

#[then("the station is placed halfway between their mileages")]
fn then_interpolated_mileage(
    #[from(route)] route: &RefCell<Option<ResampledRoute>>,
    #[from(projection)] projection: &RefCell<Option<RouteProjection>>,
) {
    let placed = projection.borrow().expect("matched");
    let midway = (mileage(route, 3) + mileage(route, 4)) / 2.0;
    assert!((placed.mile_position - midway).abs() < 0.01);
    assert!(placed.off_route_distance < 1e-6);
}

#[scenario(path = "tests/features/spatial_index.feature", index = 0)]
fn scenario_nearest_vertex(
    route: RefCell<Option<ResampledRoute>>,
    projection: RefCell<Option<RouteProjection>>,
) {
    let _ = (route, projection);
}

#[scenario(path = "tests/features/spatial_index.feature", index = 1)]
fn scenario_segment_projection(
    route: RefCell<Option<ResampledRoute>>,
    projection: RefCell<Option<RouteProjection>>,
) {
    let _ = (route, projection);
}
