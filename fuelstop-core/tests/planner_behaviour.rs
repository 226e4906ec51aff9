//! Behavioural tests for the greedy stop planner.

use fuelstop_core::{
    EARTH_RADIUS_MILES, GeoPoint, GreedyStopPlanner, PlanError, PlanRequest, PlannerConfig,
    PlanningResult, Station, StationCatalog, StopPlanner,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Meridian point `mile` miles north of the equator.
fn at_mile(mile: f64) -> GeoPoint {
    GeoPoint::new((mile / EARTH_RADIUS_MILES).to_degrees(), 0.0)
}

fn route_to(total: f64) -> Vec<GeoPoint> {
    let steps = (total / 10.0) as usize;
    (0..=steps).map(|i| at_mile(i as f64 * 10.0)).collect()
}

fn catalog(stations: &[(f64, f64)]) -> StationCatalog {
    stations
        .iter()
        .map(|&(mile, price)| Station::new(at_mile(mile), price).expect("valid station"))
        .collect()
}

#[derive(Debug, Default)]
struct Trip {
    route: Vec<GeoPoint>,
    total_miles: f64,
    catalog: StationCatalog,
}

#[fixture]
fn trip() -> RefCell<Trip> {
    RefCell::new(Trip::default())
}

#[fixture]
fn outcome() -> RefCell<Option<Result<PlanningResult, PlanError>>> {
    RefCell::new(None)
}

#[given("a 1000 mile route with stations at miles 0, 490 and 980")]
fn given_reference_trip(#[from(trip)] trip: &RefCell<Trip>) {
    *trip.borrow_mut() = Trip {
        route: route_to(1_000.0),
        total_miles: 1_000.0,
        catalog: catalog(&[(0.0, 3.00), (490.0, 2.50), (980.0, 2.80)]),
    };
}

#[given("a 1000 mile route with no stations")]
fn given_empty_catalog(#[from(trip)] trip: &RefCell<Trip>) {
    *trip.borrow_mut() = Trip {
        route: route_to(1_000.0),
        total_miles: 1_000.0,
        catalog: StationCatalog::default(),
    };
}

#[given("a 1000 mile route with a single station at mile 100")]
fn given_gap(#[from(trip)] trip: &RefCell<Trip>) {
    *trip.borrow_mut() = Trip {
        route: route_to(1_000.0),
        total_miles: 1_000.0,
        catalog: catalog(&[(100.0, 3.0)]),
    };
}

#[given("a zero-length route with no stations")]
fn given_zero_length(#[from(trip)] trip: &RefCell<Trip>) {
    *trip.borrow_mut() = Trip {
        route: vec![at_mile(0.0)],
        total_miles: 0.0,
        catalog: StationCatalog::default(),
    };
}

#[when("I plan stops with the reference policy")]
fn when_plan(
    #[from(trip)] trip: &RefCell<Trip>,
    #[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let planner = GreedyStopPlanner::new(PlannerConfig::default()).expect("valid config");
    let trip = trip.borrow();
    let request = PlanRequest {
        route: &trip.route,
        total_distance_miles: trip.total_miles,
        catalog: &trip.catalog,
    };
    *outcome.borrow_mut() = Some(planner.plan(&request));
}

fn planned(outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>) -> PlanningResult {
    outcome
        .borrow()
        .clone()
        .expect("planner ran")
        .expect("planning succeeded")
}

fn failed_window(outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>) -> (f64, f64) {
    match outcome.borrow().clone().expect("planner ran") {
        Err(PlanError::NoStationsInRange { window }) => (window.start, window.end),
        other => panic!("expected NoStationsInRange, found {other:?}"),
    }
}

#[then("stops are made at miles 490 and 980")]
fn then_reference_stops(
    #[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let result = planned(outcome);
    let miles: Vec<f64> = result.stops.iter().map(|s| s.mile_position).collect();
    assert_eq!(miles.len(), 2, "expected two stops, found {miles:?}");
    assert!((miles[0] - 490.0).abs() < 1e-6);
    assert!((miles[1] - 980.0).abs() < 1e-6);
    assert_eq!(result.stops[0].price_per_unit_fuel, 2.50);
    assert_eq!(result.stops[1].price_per_unit_fuel, 2.80);
}

#[then("the total cost is 259.70")]
fn then_reference_cost(#[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>) {
    let result = planned(outcome);
    assert!(
        (result.total_cost - 259.70).abs() < 1e-6,
        "unexpected cost {}",
        result.total_cost
    );
}

#[then("planning fails with no stations between miles 0 and 500")]
fn then_first_window_fails(
    #[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    assert_eq!(failed_window(outcome), (0.0, 500.0));
}

#[then("planning fails with no stations between miles 590 and 1000")]
fn then_later_window_fails(
    #[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let (start, end) = failed_window(outcome);
    assert!((start - 590.0).abs() < 1e-6);
    assert!((end - 1_000.0).abs() < 1e-6);
}

#[then("the plan has no stops and costs nothing")]
fn then_empty_plan(#[from(outcome)] outcome: &RefCell<Option<Result<PlanningResult, PlanError>>>) {
    let result = planned(outcome);
    assert!(result.stops.is_empty());
    assert_eq!(result.total_cost, 0.0);
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn scenario_reference_trip(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn scenario_empty_catalog(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn scenario_gap(trip: RefCell<Trip>, outcome: RefCell<Option<Result<PlanningResult, PlanError>>>) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn scenario_zero_length(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<PlanningResult, PlanError>>>,
) {
    let _ = (trip, outcome);
}
