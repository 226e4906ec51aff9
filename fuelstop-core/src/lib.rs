//! Core domain types and algorithms for fuel-stop planning.
//!
//! The crate turns a route polyline and a catalog of priced stations into an
//! ordered list of refuelling stops. It is pure computation: road routing and
//! catalog loading live behind the [`DirectionsProvider`] trait and in the
//! `fuelstop-data` crate respectively.
//!
//! Constructors and planners return `Result` so invalid input is reported to
//! the caller rather than panicking.

#![forbid(unsafe_code)]

pub mod config;
pub mod directions;
pub mod geodesy;
pub mod planner;
pub mod route;
pub mod spatial_index;
pub mod station;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{
    DEFAULT_FUEL_EFFICIENCY, DEFAULT_MAX_RANGE_MILES, DEFAULT_SAFETY_BUFFER_MILES, PlannerConfig,
    PlannerConfigError, RouteMatching,
};
pub use directions::{DirectionsError, DirectionsProvider};
pub use geodesy::{EARTH_RADIUS_MILES, GeoPoint, METERS_PER_MILE, great_circle_miles};
pub use planner::{
    Candidate, GreedyStopPlanner, MileWindow, PlanError, PlanRequest, PlanningResult, Stop,
    StopPlanner,
};
pub use route::{ResampleError, ResampledRoute, RouteGeometry, RoutePoint, resample};
pub use spatial_index::{RouteIndex, RouteMatcher, RouteProjection};
pub use station::{CatalogHandle, Station, StationCatalog, StationError};
