//! Data access for the fuel-stop planner.
//!
//! Responsibilities:
//! - Load station catalogs from CSV price sheets.
//! - Fetch route geometry from an OSRM directions service.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `fuelstop-core`).
//! - Keep blocking I/O off async executors; the HTTP provider owns its own
//!   runtime.
//!
//! Invariants:
//! - Catalogs are fully built before they are handed out or swapped in.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod routing;

pub use catalog::{
    CatalogLoadError, LoadReport, LoadedCatalog, StationCsvLoader, load_station_catalog,
    refresh_catalog,
};
pub use routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig, ProviderBuildError};
