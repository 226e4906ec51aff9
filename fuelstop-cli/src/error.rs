//! Error types emitted by the fuel-stop CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fuelstop_core::{DirectionsError, PlanError, PlannerConfigError};
use fuelstop_data::{CatalogLoadError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the fuel-stop CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Both a route file and route endpoints were supplied.
    #[error("--{file_field} cannot be combined with route endpoints")]
    ConflictingRouteSources { file_field: &'static str },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A route endpoint or vertex lies outside the WGS84 ranges.
    #[error("{source_name} coordinate ({lat}, {lng}) is not a valid latitude/longitude")]
    InvalidCoordinate {
        source_name: &'static str,
        lat: f64,
        lng: f64,
    },
    /// The merged planner parameters were rejected.
    #[error("invalid planner parameters: {0}")]
    InvalidPlannerConfig(#[from] PlannerConfigError),
    /// The station price sheet could not be loaded.
    #[error(transparent)]
    LoadCatalog(#[from] CatalogLoadError),
    /// Opening the route file failed.
    #[error("failed to open route at {path:?}: {source}")]
    OpenRoute {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Route JSON could not be decoded.
    #[error("failed to parse route JSON at {path:?}: {source}")]
    ParseRoute {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The directions service did not return a usable route.
    #[error("failed to fetch route: {0}")]
    Directions(#[from] DirectionsError),
    /// The planner could not produce a plan.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serializing the plan response failed.
    #[error("failed to serialize plan response: {0}")]
    SerializePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
