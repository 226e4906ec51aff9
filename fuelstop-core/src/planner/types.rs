//! Request and result types exchanged with a [`super::StopPlanner`].

use std::fmt;

use crate::geodesy::GeoPoint;
use crate::route::RouteGeometry;
use crate::station::{Station, StationCatalog};

/// Slack applied to window bounds.
///
/// Mile positions are sums of floating-point segment lengths, so a station
/// sitting exactly one range-step past a stop can land a few ulps outside the
/// next window.
pub(crate) const WINDOW_TOLERANCE_MILES: f64 = 1e-6;

/// Input to a planning run.
///
/// Borrowing keeps the shared catalog snapshot and the route geometry owned by
/// the caller for the duration of the run.
///
/// # Examples
/// ```
/// use fuelstop_core::{GeoPoint, PlanRequest, RouteGeometry, StationCatalog};
///
/// let geometry = RouteGeometry {
///     coordinates: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)],
///     total_distance_miles: 69.1,
/// };
/// let catalog = StationCatalog::default();
/// let request = PlanRequest::from_geometry(&geometry, &catalog);
/// assert_eq!(request.route.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    /// Route vertices from origin to destination.
    pub route: &'a [GeoPoint],
    /// Trip length in miles as reported by the directions provider.
    pub total_distance_miles: f64,
    /// Catalog snapshot to choose stations from.
    pub catalog: &'a StationCatalog,
}

impl<'a> PlanRequest<'a> {
    /// Build a request from a directions-provider route.
    pub fn from_geometry(geometry: &'a RouteGeometry, catalog: &'a StationCatalog) -> Self {
        Self {
            route: &geometry.coordinates,
            total_distance_miles: geometry.total_distance_miles,
            catalog,
        }
    }
}

/// Inclusive range of route miles reachable from the current search start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MileWindow {
    /// First reachable mile.
    pub start: f64,
    /// Last reachable mile.
    pub end: f64,
}

impl MileWindow {
    /// Whether `mile` lies inside the window, bounds included.
    pub fn contains(&self, mile: f64) -> bool {
        mile >= self.start - WINDOW_TOLERANCE_MILES && mile <= self.end + WINDOW_TOLERANCE_MILES
    }
}

impl fmt::Display for MileWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "miles {:.1}..={:.1}", self.start, self.end)
    }
}

/// A catalog station placed onto the route for one planning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The station itself.
    pub station: Station,
    /// Position of the station in the catalog; breaks price ties.
    pub catalog_index: usize,
    /// Route mile the station was matched to.
    pub mile_position: f64,
    /// Great-circle miles between the station and its matched route position.
    pub off_route_distance: f64,
}

/// A committed refuelling stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Station position.
    pub location: GeoPoint,
    /// Price paid per unit of fuel.
    pub price_per_unit_fuel: f64,
    /// Route mile the stop was matched to.
    pub mile_position: f64,
}

impl From<&Candidate> for Stop {
    fn from(candidate: &Candidate) -> Self {
        Self {
            location: candidate.station.location,
            price_per_unit_fuel: candidate.station.price_per_unit_fuel,
            mile_position: candidate.mile_position,
        }
    }
}

/// Outcome of a successful planning run.
///
/// `stops` are in strictly increasing `mile_position` order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningResult {
    /// Stops in travel order.
    pub stops: Vec<Stop>,
    /// Sum of the fuel cost charged at each stop.
    pub total_cost: f64,
}

impl PlanningResult {
    /// A plan with no stops and no cost.
    pub fn empty() -> Self {
        Self::default()
    }
}
