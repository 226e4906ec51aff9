//! R\*-tree indices over a resampled route.
//!
//! Both indices work in planar `[lat, lng]` degree space. Straight-line
//! distance in degrees is only a proxy for ground distance, but it is cheap
//! and preserves "which vertex is closest" well enough for stations that sit
//! near the road. Off-route distances reported to callers are always
//! great-circle miles.

use geo::{Closest, ClosestPoint, Coord, Line, Point};
use rstar::{AABB, PointDistance, RTree, RTreeObject, primitives::GeomWithData};

use crate::config::RouteMatching;
use crate::geodesy::{GeoPoint, great_circle_miles};
use crate::route::ResampledRoute;

type VertexNode = GeomWithData<[f64; 2], usize>;

/// Nearest-vertex index over a resampled route.
///
/// # Examples
/// ```
/// use fuelstop_core::{GeoPoint, RouteIndex, resample};
///
/// let route = resample(&[
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 1.0),
///     GeoPoint::new(0.0, 2.0),
/// ])?;
/// let index = RouteIndex::build(&route);
/// assert_eq!(index.nearest(GeoPoint::new(0.2, 1.1)), 1);
/// # Ok::<(), fuelstop_core::ResampleError>(())
/// ```
#[derive(Debug)]
pub struct RouteIndex {
    tree: RTree<VertexNode>,
}

impl RouteIndex {
    /// Bulk-load every vertex of `route`.
    pub fn build(route: &ResampledRoute) -> Self {
        let nodes = route
            .points()
            .iter()
            .enumerate()
            .map(|(index, point)| GeomWithData::new(point.location.planar(), index))
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Sequence index of the vertex closest to `query`.
    ///
    /// A query equal to an indexed vertex returns that vertex.
    pub fn nearest(&self, query: GeoPoint) -> usize {
        // Routes are never empty, so a neighbour always exists.
        self.tree
            .nearest_neighbor(&query.planar())
            .map_or(0, |node| node.data)
    }

    /// Number of indexed vertices.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Route segment between vertex `start` and `start + 1`.
#[derive(Debug, Clone)]
struct SegmentNode {
    start: usize,
    from: [f64; 2],
    to: [f64; 2],
}

impl RTreeObject for SegmentNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.from, self.to)
    }
}

impl PointDistance for SegmentNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let ab = [self.to[0] - self.from[0], self.to[1] - self.from[1]];
        let ap = [point[0] - self.from[0], point[1] - self.from[1]];
        let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];

        if ab_ab == 0.0 {
            // Degenerate segment from a repeated vertex.
            return ap[0] * ap[0] + ap[1] * ap[1];
        }

        let t = ((ab[0] * ap[0] + ab[1] * ap[1]) / ab_ab).clamp(0.0, 1.0);
        let dx = point[0] - (self.from[0] + t * ab[0]);
        let dy = point[1] - (self.from[1] + t * ab[1]);
        dx * dx + dy * dy
    }
}

/// Nearest-segment index used by [`RouteMatching::SegmentProjection`].
#[derive(Debug)]
struct SegmentIndex {
    tree: RTree<SegmentNode>,
}

impl SegmentIndex {
    /// Returns `None` for single-vertex routes, which have no segments.
    fn build(route: &ResampledRoute) -> Option<Self> {
        let nodes: Vec<SegmentNode> = route
            .points()
            .windows(2)
            .enumerate()
            .filter_map(|(start, pair)| match pair {
                [from, to] => Some(SegmentNode {
                    start,
                    from: from.location.planar(),
                    to: to.location.planar(),
                }),
                _ => None,
            })
            .collect();
        if nodes.is_empty() {
            return None;
        }
        Some(Self {
            tree: RTree::bulk_load(nodes),
        })
    }

    fn nearest(&self, query: GeoPoint) -> Option<&SegmentNode> {
        self.tree.nearest_neighbor(&query.planar())
    }
}

/// Where a location lands on the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProjection {
    /// Matched position on the route.
    pub route_location: GeoPoint,
    /// Miles from the route start to the matched position.
    pub mile_position: f64,
    /// Great-circle miles between the location and its matched position.
    pub off_route_distance: f64,
}

/// Places arbitrary locations onto a route using the configured strategy.
#[derive(Debug)]
pub struct RouteMatcher<'a> {
    route: &'a ResampledRoute,
    vertices: RouteIndex,
    segments: Option<SegmentIndex>,
}

impl<'a> RouteMatcher<'a> {
    /// Build the indices `matching` needs for `route`.
    pub fn new(route: &'a ResampledRoute, matching: RouteMatching) -> Self {
        let segments = match matching {
            RouteMatching::NearestVertex => None,
            RouteMatching::SegmentProjection => SegmentIndex::build(route),
        };
        Self {
            route,
            vertices: RouteIndex::build(route),
            segments,
        }
    }

    /// Match `location` onto the route.
    pub fn project(&self, location: GeoPoint) -> RouteProjection {
        if let Some(projection) = self.project_onto_segment(location) {
            return projection;
        }
        self.project_onto_vertex(location)
    }

    fn project_onto_vertex(&self, location: GeoPoint) -> RouteProjection {
        let index = self.vertices.nearest(location);
        let (route_location, mile_position) = self
            .route
            .get(index)
            .map_or((location, 0.0), |point| (point.location, point.mile_position));
        RouteProjection {
            route_location,
            mile_position,
            off_route_distance: great_circle_miles(location, route_location),
        }
    }

    fn project_onto_segment(&self, location: GeoPoint) -> Option<RouteProjection> {
        let node = self.segments.as_ref()?.nearest(location)?;
        let from = self.route.get(node.start)?;
        let to = self.route.get(node.start + 1)?;

        let line = Line::new(Coord::from(from.location), Coord::from(to.location));
        let foot = match line.closest_point(&Point::from(Coord::from(location))) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => GeoPoint::from(p.0),
            Closest::Indeterminate => from.location,
        };

        let along = great_circle_miles(from.location, foot);
        let mile_position = (from.mile_position + along).min(to.mile_position);
        Some(RouteProjection {
            route_location: foot,
            mile_position,
            off_route_distance: great_circle_miles(location, foot),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::resample;
    use rstest::{fixture, rstest};

    #[fixture]
    fn straight_route() -> ResampledRoute {
        let coords: Vec<GeoPoint> = (0..=10)
            .map(|i| GeoPoint::new(f64::from(i), 0.0))
            .collect();
        resample(&coords).expect("non-empty route")
    }

    #[rstest]
    fn indexed_vertex_maps_to_itself(straight_route: ResampledRoute) {
        let index = RouteIndex::build(&straight_route);
        assert_eq!(index.len(), 11);
        for (expected, point) in straight_route.points().iter().enumerate() {
            assert_eq!(index.nearest(point.location), expected);
        }
    }

    #[rstest]
    fn off_route_query_snaps_to_closest_vertex(straight_route: ResampledRoute) {
        let index = RouteIndex::build(&straight_route);
        assert_eq!(index.nearest(GeoPoint::new(6.4, 2.0)), 6);
        assert_eq!(index.nearest(GeoPoint::new(-5.0, 0.0)), 0);
        assert_eq!(index.nearest(GeoPoint::new(50.0, 0.0)), 10);
    }

    #[rstest]
    fn single_vertex_route_always_matches_it() {
        let route = resample(&[GeoPoint::new(10.0, 10.0)]).expect("non-empty route");
        let matcher = RouteMatcher::new(&route, RouteMatching::SegmentProjection);
        let projection = matcher.project(GeoPoint::new(11.0, 10.0));
        assert_eq!(projection.mile_position, 0.0);
        assert_eq!(projection.route_location, GeoPoint::new(10.0, 10.0));
        assert!(projection.off_route_distance > 69.0);
    }

    #[rstest]
    fn vertex_matching_reports_vertex_mileage(straight_route: ResampledRoute) {
        let matcher = RouteMatcher::new(&straight_route, RouteMatching::NearestVertex);
        let projection = matcher.project(GeoPoint::new(3.4, 0.0));
        let vertex = straight_route.get(3).expect("vertex 3");
        assert_eq!(projection.mile_position, vertex.mile_position);
        assert_eq!(projection.route_location, vertex.location);
    }

    #[rstest]
    fn segment_projection_interpolates_between_vertices(straight_route: ResampledRoute) {
        let matcher = RouteMatcher::new(&straight_route, RouteMatching::SegmentProjection);
        let projection = matcher.project(GeoPoint::new(3.5, 0.01));

        let at_three = straight_route.get(3).expect("vertex 3").mile_position;
        let at_four = straight_route.get(4).expect("vertex 4").mile_position;
        let midway = (at_three + at_four) / 2.0;

        assert!((projection.mile_position - midway).abs() < 0.01);
        assert!((projection.route_location.lat - 3.5).abs() < 1e-9);
        assert!(projection.off_route_distance < 1.0);
    }

    #[rstest]
    fn segment_projection_clamps_past_route_end(straight_route: ResampledRoute) {
        let matcher = RouteMatcher::new(&straight_route, RouteMatching::SegmentProjection);
        let projection = matcher.project(GeoPoint::new(12.0, 0.0));
        assert_eq!(projection.mile_position, straight_route.total_miles());
    }
}
