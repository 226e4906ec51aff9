//! Route geometry and its mileage-annotated resampling.
//!
//! Directions services return a polyline plus a reported length. The planner
//! needs to know how far along the route each vertex sits, so the polyline is
//! walked once and every vertex is tagged with its cumulative great-circle
//! distance from the start.

use thiserror::Error;

use crate::geodesy::{GeoPoint, great_circle_miles};

/// Route returned by a directions provider.
///
/// `total_distance_miles` is the provider's own figure. It should agree with
/// the geometry but is not required to match it exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteGeometry {
    /// Ordered route vertices from origin to destination.
    pub coordinates: Vec<GeoPoint>,
    /// Route length reported by the provider, in miles.
    pub total_distance_miles: f64,
}

/// A route vertex tagged with its distance from the route start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    /// Vertex position.
    pub location: GeoPoint,
    /// Cumulative great-circle miles from the first vertex.
    pub mile_position: f64,
}

/// Errors returned by [`resample`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// The route geometry contained no points.
    #[error("route geometry must contain at least one point")]
    EmptyRoute,
}

/// A non-empty, mileage-annotated route.
///
/// Mile positions start at zero and never decrease along the sequence.
///
/// # Examples
/// ```
/// use fuelstop_core::{GeoPoint, resample};
///
/// let route = resample(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)])?;
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.points()[0].mile_position, 0.0);
/// assert!((route.total_miles() - 69.09).abs() < 0.01);
/// # Ok::<(), fuelstop_core::ResampleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledRoute {
    points: Vec<RoutePoint>,
}

impl ResampledRoute {
    /// Annotated vertices in route order.
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&RoutePoint> {
        self.points.get(index)
    }

    /// Geometry-derived route length in miles.
    pub fn total_miles(&self) -> f64 {
        self.points.last().map_or(0.0, |point| point.mile_position)
    }
}

/// Tag every vertex of `coordinates` with its cumulative distance in miles.
///
/// The output preserves order and length. Repeated vertices are kept and
/// contribute zero-length segments.
///
/// # Errors
///
/// Returns [`ResampleError::EmptyRoute`] when `coordinates` is empty.
pub fn resample(coordinates: &[GeoPoint]) -> Result<ResampledRoute, ResampleError> {
    let Some(&first) = coordinates.first() else {
        return Err(ResampleError::EmptyRoute);
    };

    let mut points = Vec::with_capacity(coordinates.len());
    points.push(RoutePoint {
        location: first,
        mile_position: 0.0,
    });

    let mut cumulative = 0.0;
    for pair in coordinates.windows(2) {
        if let [previous, current] = pair {
            cumulative += great_circle_miles(*previous, *current);
            points.push(RoutePoint {
                location: *current,
                mile_position: cumulative,
            });
        }
    }

    Ok(ResampledRoute { points })
}
