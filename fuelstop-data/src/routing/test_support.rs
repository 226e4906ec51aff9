//! Test utilities for directions providers.
//!
//! [`StubDirectionsProvider`] is a deterministic test double for
//! [`DirectionsProvider`] that returns pre-configured responses without making
//! HTTP requests, and remembers what it was asked.

use std::sync::{Mutex, PoisonError};

use fuelstop_core::{DirectionsError, DirectionsProvider, GeoPoint, RouteGeometry, great_circle_miles};

/// Stub `DirectionsProvider` for testing.
///
/// # Example
///
/// ```
/// use fuelstop_core::{DirectionsProvider, GeoPoint};
/// use fuelstop_data::routing::test_support::StubDirectionsProvider;
///
/// let provider = StubDirectionsProvider::straight_line();
/// let start = GeoPoint::new(35.0, -97.0);
/// let end = GeoPoint::new(36.0, -97.0);
///
/// let route = provider.route(start, end)?;
/// assert_eq!(route.coordinates, vec![start, end]);
/// assert_eq!(provider.requests(), vec![(start, end)]);
/// # Ok::<(), fuelstop_core::DirectionsError>(())
/// ```
#[derive(Debug)]
pub struct StubDirectionsProvider {
    response: StubResponse,
    requests: Mutex<Vec<(GeoPoint, GeoPoint)>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Geometry(RouteGeometry),
    Error(DirectionsError),
    StraightLine,
}

impl StubDirectionsProvider {
    fn with_response(response: StubResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Return `geometry` for every request.
    #[must_use]
    pub fn with_geometry(geometry: RouteGeometry) -> Self {
        Self::with_response(StubResponse::Geometry(geometry))
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(error: DirectionsError) -> Self {
        Self::with_response(StubResponse::Error(error))
    }

    /// Answer with a two-point route from start to end and its great-circle
    /// length.
    #[must_use]
    pub fn straight_line() -> Self {
        Self::with_response(StubResponse::StraightLine)
    }

    /// Endpoints of every request received so far, oldest first.
    pub fn requests(&self) -> Vec<(GeoPoint, GeoPoint)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DirectionsProvider for StubDirectionsProvider {
    fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteGeometry, DirectionsError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((start, end));

        match &self.response {
            StubResponse::Geometry(geometry) => Ok(geometry.clone()),
            StubResponse::Error(error) => Err(error.clone()),
            StubResponse::StraightLine => Ok(RouteGeometry {
                coordinates: vec![start, end],
                total_distance_miles: great_circle_miles(start, end),
            }),
        }
    }
}
