//! Plan command implementation for the fuel-stop CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use fuelstop_core::{
    DirectionsProvider, GeoPoint, GreedyStopPlanner, PlanRequest, PlannerConfig, PlanningResult,
    RouteGeometry, RouteMatching, StopPlanner,
};
use fuelstop_data::routing::{DEFAULT_BASE_URL, HttpDirectionsProvider};
use fuelstop_data::{LoadedCatalog, StationCsvLoader};
use fuelstop_fs::read_utf8_to_string;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_PLAN_DEDUPE_BY, ARG_PLAN_END_LAT, ARG_PLAN_END_LNG, ARG_PLAN_FUEL_EFFICIENCY,
    ARG_PLAN_MATCHING, ARG_PLAN_MAX_DETOUR, ARG_PLAN_MAX_RANGE, ARG_PLAN_OSRM_BASE_URL,
    ARG_PLAN_ROUTE, ARG_PLAN_SAFETY_BUFFER, ARG_PLAN_START_LAT, ARG_PLAN_START_LNG,
    ARG_PLAN_STATIONS, CliError, ENV_PLAN_END_LAT, ENV_PLAN_END_LNG, ENV_PLAN_START_LAT,
    ENV_PLAN_START_LNG, ENV_PLAN_STATIONS,
};

/// How stations are matched to the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum MatchingArg {
    /// Snap each station to the closest route vertex.
    NearestVertex,
    /// Project each station onto the closest route segment.
    SegmentProjection,
}

impl From<MatchingArg> for RouteMatching {
    fn from(value: MatchingArg) -> Self {
        match value {
            MatchingArg::NearestVertex => Self::NearestVertex,
            MatchingArg::SegmentProjection => Self::SegmentProjection,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Choose the cheapest fuel stops along a route. The route is \
                 read from a JSON file or fetched from an OSRM instance; \
                 station prices come from a CSV sheet with Latitude, \
                 Longitude and Retail Price columns.",
    about = "Plan fuel stops for a route"
)]
#[ortho_config(prefix = "FUELSTOP")]
pub(crate) struct PlanArgs {
    /// Path to the station price sheet (CSV).
    #[arg(long = ARG_PLAN_STATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) stations: Option<Utf8PathBuf>,
    /// Path to a JSON-encoded route geometry.
    #[arg(long = ARG_PLAN_ROUTE, value_name = "path")]
    #[serde(default)]
    pub(crate) route: Option<Utf8PathBuf>,
    /// Latitude of the trip origin.
    #[arg(long = ARG_PLAN_START_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the trip origin.
    #[arg(long = ARG_PLAN_START_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lng: Option<f64>,
    /// Latitude of the trip destination.
    #[arg(long = ARG_PLAN_END_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lat: Option<f64>,
    /// Longitude of the trip destination.
    #[arg(long = ARG_PLAN_END_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lng: Option<f64>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Miles the vehicle covers on a full tank.
    #[arg(long = ARG_PLAN_MAX_RANGE, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_range: Option<f64>,
    /// Miles travelled per unit of fuel.
    #[arg(long = ARG_PLAN_FUEL_EFFICIENCY, value_name = "mpg")]
    #[serde(default)]
    pub(crate) fuel_efficiency: Option<f64>,
    /// Margin kept in the tank when advancing past a stop.
    #[arg(long = ARG_PLAN_SAFETY_BUFFER, value_name = "miles")]
    #[serde(default)]
    pub(crate) safety_buffer: Option<f64>,
    /// Ignore stations further than this from the route.
    #[arg(long = ARG_PLAN_MAX_DETOUR, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_detour: Option<f64>,
    /// Station-to-route matching strategy.
    #[arg(long = ARG_PLAN_MATCHING, value_enum, value_name = "strategy")]
    #[serde(default)]
    pub(crate) matching: Option<MatchingArg>,
    /// Keep only the first row for each value of this CSV column.
    #[arg(long = ARG_PLAN_DEDUPE_BY, value_name = "column")]
    #[serde(default)]
    pub(crate) dedupe_by: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where the route geometry comes from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RouteSource {
    /// A JSON `RouteGeometry` on disk.
    File(Utf8PathBuf),
    /// A directions service queried between two endpoints.
    Directions {
        start: GeoPoint,
        end: GeoPoint,
        base_url: String,
    },
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the station CSV.
    pub(crate) stations: Utf8PathBuf,
    /// Route input.
    pub(crate) route: RouteSource,
    /// Validated planner policy.
    pub(crate) planner: PlannerConfig,
    /// Optional CSV column used to drop duplicate stations.
    pub(crate) dedupe_by: Option<String>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.stations, ARG_PLAN_STATIONS)?;
        if let RouteSource::File(path) = &self.route {
            Self::require_existing(path, ARG_PLAN_ROUTE)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fuelstop_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn loader(&self) -> StationCsvLoader {
        match &self.dedupe_by {
            Some(column) => StationCsvLoader::new().dedupe_by(column.clone()),
            None => StationCsvLoader::new(),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let route = resolve_route_source(&args)?;
        let planner = resolve_planner_config(&args)?;
        let stations = args.stations.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_STATIONS,
            env: ENV_PLAN_STATIONS,
        })?;
        Ok(Self {
            stations,
            route,
            planner,
            dedupe_by: args.dedupe_by,
        })
    }
}

fn resolve_route_source(args: &PlanArgs) -> Result<RouteSource, CliError> {
    let any_endpoint = args.start_lat.is_some()
        || args.start_lng.is_some()
        || args.end_lat.is_some()
        || args.end_lng.is_some();
    if let Some(path) = &args.route {
        if any_endpoint {
            return Err(CliError::ConflictingRouteSources {
                file_field: ARG_PLAN_ROUTE,
            });
        }
        return Ok(RouteSource::File(path.clone()));
    }

    let start_lat = require_coordinate(args.start_lat, ARG_PLAN_START_LAT, ENV_PLAN_START_LAT)?;
    let start_lng = require_coordinate(args.start_lng, ARG_PLAN_START_LNG, ENV_PLAN_START_LNG)?;
    let end_lat = require_coordinate(args.end_lat, ARG_PLAN_END_LAT, ENV_PLAN_END_LAT)?;
    let end_lng = require_coordinate(args.end_lng, ARG_PLAN_END_LNG, ENV_PLAN_END_LNG)?;
    let base_url = args
        .osrm_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    Ok(RouteSource::Directions {
        start: require_valid_point(GeoPoint::new(start_lat, start_lng), "start")?,
        end: require_valid_point(GeoPoint::new(end_lat, end_lng), "end")?,
        base_url,
    })
}

fn require_valid_point(point: GeoPoint, source: &'static str) -> Result<GeoPoint, CliError> {
    if point.is_valid() {
        Ok(point)
    } else {
        Err(CliError::InvalidCoordinate {
            source_name: source,
            lat: point.lat,
            lng: point.lng,
        })
    }
}

fn require_coordinate(
    value: Option<f64>,
    field: &'static str,
    env: &'static str,
) -> Result<f64, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

fn resolve_planner_config(args: &PlanArgs) -> Result<PlannerConfig, CliError> {
    let defaults = PlannerConfig::default();
    let config = PlannerConfig {
        max_range_miles: args.max_range.unwrap_or(defaults.max_range_miles),
        fuel_efficiency: args.fuel_efficiency.unwrap_or(defaults.fuel_efficiency),
        safety_buffer_miles: args.safety_buffer.unwrap_or(defaults.safety_buffer_miles),
        max_detour_miles: args.max_detour.or(defaults.max_detour_miles),
        matching: args.matching.map_or(defaults.matching, RouteMatching::from),
    };
    config.validate()?;
    Ok(config)
}

/// Builds a directions provider for the current plan invocation.
pub(super) trait DirectionsProviderBuilder {
    fn build(&self, base_url: &str) -> Result<Box<dyn DirectionsProvider>, CliError>;
}

pub(super) struct HttpDirectionsProviderBuilder;

impl DirectionsProviderBuilder for HttpDirectionsProviderBuilder {
    fn build(&self, base_url: &str) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let provider = HttpDirectionsProvider::new(base_url).map_err(|source| {
            CliError::BuildDirectionsProvider {
                base_url: base_url.to_owned(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = HttpDirectionsProviderBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn DirectionsProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let result = execute_plan(args, builder)?;
    write_plan_response(writer, &PlanResponse::from(&result))
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn DirectionsProviderBuilder,
) -> Result<PlanningResult, CliError> {
    let config = resolve_plan_config(args)?;
    let LoadedCatalog { catalog, report } = config.loader().load(&config.stations)?;
    log::info!(
        "using {} stations from {} ({} rows skipped)",
        report.loaded,
        config.stations,
        report.skipped
    );
    let geometry = fetch_route(&config.route, builder)?;
    let planner = GreedyStopPlanner::new(config.planner)?;
    Ok(planner.plan(&PlanRequest::from_geometry(&geometry, &catalog))?)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn fetch_route(
    source: &RouteSource,
    builder: &dyn DirectionsProviderBuilder,
) -> Result<RouteGeometry, CliError> {
    match source {
        RouteSource::File(path) => load_route(path),
        RouteSource::Directions {
            start,
            end,
            base_url,
        } => {
            let provider = builder.build(base_url)?;
            Ok(provider.route(*start, *end)?)
        }
    }
}

/// Loads a JSON-encoded [`RouteGeometry`] from disk.
///
/// Every vertex must be a valid WGS84 position.
pub(super) fn load_route(path: &Utf8Path) -> Result<RouteGeometry, CliError> {
    let payload = read_utf8_to_string(path).map_err(|source| CliError::OpenRoute {
        path: path.to_path_buf(),
        source,
    })?;
    let geometry: RouteGeometry =
        serde_json::from_str(&payload).map_err(|source| CliError::ParseRoute {
            path: path.to_path_buf(),
            source,
        })?;
    for point in &geometry.coordinates {
        require_valid_point(*point, "route")?;
    }
    Ok(geometry)
}

/// JSON document written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanResponse {
    /// Trip fuel cost rounded to cents.
    pub(crate) total_cost: f64,
    /// Stops in travel order.
    pub(crate) fuel_stops: Vec<FuelStopResponse>,
}

/// One stop in a [`PlanResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FuelStopResponse {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    pub(crate) price_per_unit_fuel: f64,
    /// Mile position rounded to one decimal place.
    pub(crate) mile_position: f64,
}

impl From<&PlanningResult> for PlanResponse {
    fn from(result: &PlanningResult) -> Self {
        Self {
            total_cost: round_to(result.total_cost, 100.0),
            fuel_stops: result
                .stops
                .iter()
                .map(|stop| FuelStopResponse {
                    lat: stop.location.lat,
                    lng: stop.location.lng,
                    price_per_unit_fuel: stop.price_per_unit_fuel,
                    mile_position: round_to(stop.mile_position, 10.0),
                })
                .collect(),
        }
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

fn write_plan_response(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerializePlanResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
