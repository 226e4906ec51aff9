//! Choose refuelling stops along a route.
//!
//! The [`StopPlanner`] trait is the seam callers program against;
//! [`GreedyStopPlanner`] is the reference implementation. A run resamples the
//! route, matches every catalog station onto it once, then walks the route
//! one reachable window at a time, committing the cheapest station in each.

mod error;
mod greedy;
mod types;

pub use error::PlanError;
pub use greedy::GreedyStopPlanner;
pub use types::{Candidate, MileWindow, PlanRequest, PlanningResult, Stop};
pub(crate) use types::WINDOW_TOLERANCE_MILES;

/// Plan refuelling stops for a route.
///
/// Implementations must be pure with respect to their inputs: the same
/// request yields the same result. Planners must be `Send + Sync` so a single
/// instance can serve concurrent runs.
pub trait StopPlanner: Send + Sync {
    /// Plan stops for `request`.
    fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanningResult, PlanError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeoPoint, StationCatalog};
    use rstest::rstest;

    struct NoStops;

    impl StopPlanner for NoStops {
        fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanningResult, PlanError> {
            if request.route.is_empty() {
                Err(PlanError::EmptyRoute)
            } else {
                Ok(PlanningResult::empty())
            }
        }
    }

    #[rstest]
    fn planners_are_usable_as_trait_objects() {
        let planner: Box<dyn StopPlanner> = Box::new(NoStops);
        let catalog = StationCatalog::default();
        let route = [GeoPoint::new(0.0, 0.0)];
        let request = PlanRequest {
            route: &route,
            total_distance_miles: 0.0,
            catalog: &catalog,
        };
        let result = planner.plan(&request).expect("non-empty route");
        assert!(result.stops.is_empty());
    }

    #[rstest]
    fn empty_route_surfaces_as_error() {
        let catalog = StationCatalog::default();
        let request = PlanRequest {
            route: &[],
            total_distance_miles: 0.0,
            catalog: &catalog,
        };
        assert_eq!(NoStops.plan(&request), Err(PlanError::EmptyRoute));
    }
}
