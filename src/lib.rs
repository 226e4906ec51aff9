//! Facade crate for the fuel-stop planning engine.
//!
//! This crate re-exports the core domain types and the greedy stop planner.
//! Catalog loading and the OSRM directions provider live in `fuelstop-data`.

#![forbid(unsafe_code)]

pub use fuelstop_core::{
    CatalogHandle, DirectionsError, DirectionsProvider, GeoPoint, GreedyStopPlanner, MileWindow,
    PlanError, PlanRequest, PlannerConfig, PlannerConfigError, PlanningResult, RouteGeometry,
    RouteMatching, Station, StationCatalog, StationError, Stop, StopPlanner, great_circle_miles,
};
