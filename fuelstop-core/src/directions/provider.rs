//! Directions provider trait.

use crate::geodesy::GeoPoint;
use crate::route::RouteGeometry;

use super::error::DirectionsError;

/// Fetch a drivable route between two points.
///
/// Implementations return the full-resolution polyline from `start` to `end`
/// and the route length they computed, in miles.
///
/// # Examples
///
/// ```rust
/// use fuelstop_core::{DirectionsError, DirectionsProvider, GeoPoint, RouteGeometry};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteGeometry, DirectionsError> {
///         Ok(RouteGeometry {
///             coordinates: vec![start, end],
///             total_distance_miles: fuelstop_core::great_circle_miles(start, end),
///         })
///     }
/// }
///
/// let geometry = StraightLine.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0))?;
/// assert_eq!(geometry.coordinates.len(), 2);
/// # Ok::<(), DirectionsError>(())
/// ```
pub trait DirectionsProvider {
    /// Route from `start` to `end`.
    ///
    /// Implementations must return [`DirectionsError::NoRoute`] rather than an
    /// empty geometry when the endpoints are not connected.
    fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteGeometry, DirectionsError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::meridian_geometry;

    /// Serves a meridian route, or nothing for identical endpoints.
    struct MeridianOnly;

    impl DirectionsProvider for MeridianOnly {
        fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteGeometry, DirectionsError> {
            if start == end {
                return Err(DirectionsError::NoRoute);
            }
            Ok(meridian_geometry(300.0, 10.0))
        }
    }

    #[rstest]
    fn provider_is_object_safe() {
        let provider: &dyn DirectionsProvider = &MeridianOnly;
        let geometry = provider
            .route(GeoPoint::new(0.0, 0.0), GeoPoint::new(4.3, 0.0))
            .expect("route exists");
        assert_eq!(geometry.coordinates.len(), 31);
        assert_eq!(geometry.total_distance_miles, 300.0);
    }

    #[rstest]
    fn provider_reports_missing_route() {
        let here = GeoPoint::new(1.0, 1.0);
        assert_eq!(MeridianOnly.route(here, here), Err(DirectionsError::NoRoute));
    }
}
