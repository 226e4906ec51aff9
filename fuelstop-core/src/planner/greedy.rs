//! Window-by-window greedy stop selection.

use log::{debug, info, warn};

use crate::config::{PlannerConfig, PlannerConfigError};
use crate::route::{ResampledRoute, resample};
use crate::spatial_index::RouteMatcher;
use crate::station::StationCatalog;

use super::error::PlanError;
use super::types::{Candidate, MileWindow, PlanRequest, PlanningResult, Stop};
use super::StopPlanner;

/// Greedy planner committing the cheapest reachable station in each window.
///
/// # Examples
/// ```
/// use fuelstop_core::{
///     GeoPoint, GreedyStopPlanner, PlanRequest, PlannerConfig, Station, StationCatalog,
///     StopPlanner,
/// };
///
/// let route = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)];
/// let catalog = StationCatalog::new(vec![
///     Station::new(GeoPoint::new(0.5, 0.0), 3.0)?,
/// ]);
/// let planner = GreedyStopPlanner::new(PlannerConfig::default())?;
/// let result = planner.plan(&PlanRequest {
///     route: &route,
///     total_distance_miles: 69.1,
///     catalog: &catalog,
/// })?;
/// assert_eq!(result.stops.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedyStopPlanner {
    config: PlannerConfig,
}

impl GreedyStopPlanner {
    /// Construct a planner from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError`] when `config` fails
    /// [`PlannerConfig::validate`].
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration the planner runs with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Match every catalog station onto `route`, in catalog order.
    ///
    /// Stations beyond `max_detour_miles`, when set, are dropped here.
    fn match_candidates(&self, route: &ResampledRoute, catalog: &StationCatalog) -> Vec<Candidate> {
        let matcher = RouteMatcher::new(route, self.config.matching);
        let candidates: Vec<Candidate> = catalog
            .iter()
            .enumerate()
            .map(|(catalog_index, station)| {
                let projection = matcher.project(station.location);
                Candidate {
                    station: *station,
                    catalog_index,
                    mile_position: projection.mile_position,
                    off_route_distance: projection.off_route_distance,
                }
            })
            .filter(|candidate| {
                self.config
                    .max_detour_miles
                    .is_none_or(|limit| candidate.off_route_distance <= limit)
            })
            .collect();

        debug!(
            "matched {} of {} stations onto a {}-vertex route",
            candidates.len(),
            catalog.len(),
            route.len()
        );
        candidates
    }
}

/// Cheapest candidate inside `window`; the earlier catalog entry wins ties.
fn cheapest_in_window(candidates: &[Candidate], window: MileWindow) -> Option<&Candidate> {
    candidates
        .iter()
        .filter(|candidate| window.contains(candidate.mile_position))
        .min_by(|a, b| {
            a.station
                .price_per_unit_fuel
                .total_cmp(&b.station.price_per_unit_fuel)
                .then(a.catalog_index.cmp(&b.catalog_index))
        })
}

impl StopPlanner for GreedyStopPlanner {
    fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanningResult, PlanError> {
        let total = request.total_distance_miles;
        if !total.is_finite() || total < 0.0 {
            return Err(PlanError::InvalidTotalDistance { value: total });
        }

        let route = resample(request.route)?;
        if total == 0.0 {
            return Ok(PlanningResult::empty());
        }

        let candidates = self.match_candidates(&route, request.catalog);
        let advance = self.config.advance_miles();

        let mut search_from = 0.0;
        let mut paid_through = 0.0;
        let mut result = PlanningResult::empty();

        while search_from < total {
            let window = MileWindow {
                start: search_from,
                end: (search_from + self.config.max_range_miles).min(total),
            };
            debug!("searching {window}");

            let Some(selected) = cheapest_in_window(&candidates, window) else {
                warn!(
                    "no station within {window} after {} committed stops",
                    result.stops.len()
                );
                return Err(PlanError::NoStationsInRange { window });
            };

            let segment_miles = (selected.mile_position - paid_through).max(0.0);
            let segment_cost =
                segment_miles / self.config.fuel_efficiency * selected.station.price_per_unit_fuel;
            result.total_cost += segment_cost;
            result.stops.push(Stop::from(selected));
            debug!(
                "stop at mile {:.1} for {:.3}/unit, segment cost {:.2}",
                selected.mile_position, selected.station.price_per_unit_fuel, segment_cost
            );

            paid_through = selected.mile_position;
            search_from = selected.mile_position + advance;
        }

        info!(
            "planned {} stops over {:.1} miles, total cost {:.2}",
            result.stops.len(),
            total,
            result.total_cost
        );
        Ok(result)
    }
}
