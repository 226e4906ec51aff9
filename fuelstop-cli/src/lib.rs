//! Command-line interface for the fuel-stop planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_STATIONS: &str = "stations";
pub(crate) const ARG_PLAN_ROUTE: &str = "route";
pub(crate) const ARG_PLAN_START_LAT: &str = "start-lat";
pub(crate) const ARG_PLAN_START_LNG: &str = "start-lng";
pub(crate) const ARG_PLAN_END_LAT: &str = "end-lat";
pub(crate) const ARG_PLAN_END_LNG: &str = "end-lng";
pub(crate) const ARG_PLAN_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_PLAN_MAX_RANGE: &str = "max-range";
pub(crate) const ARG_PLAN_FUEL_EFFICIENCY: &str = "fuel-efficiency";
pub(crate) const ARG_PLAN_SAFETY_BUFFER: &str = "safety-buffer";
pub(crate) const ARG_PLAN_MAX_DETOUR: &str = "max-detour";
pub(crate) const ARG_PLAN_MATCHING: &str = "matching";
pub(crate) const ARG_PLAN_DEDUPE_BY: &str = "dedupe-by";
pub(crate) const ENV_PLAN_STATIONS: &str = "FUELSTOP_CMDS_PLAN_STATIONS";
pub(crate) const ENV_PLAN_START_LAT: &str = "FUELSTOP_CMDS_PLAN_START_LAT";
pub(crate) const ENV_PLAN_START_LNG: &str = "FUELSTOP_CMDS_PLAN_START_LNG";
pub(crate) const ENV_PLAN_END_LAT: &str = "FUELSTOP_CMDS_PLAN_END_LAT";
pub(crate) const ENV_PLAN_END_LNG: &str = "FUELSTOP_CMDS_PLAN_END_LNG";

/// Run the fuel-stop CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

/// Install `env_logger`, defaulting to `warn` (or `info` when verbose).
///
/// `RUST_LOG` takes precedence over both defaults.
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if let Err(err) = builder.try_init() {
        log::debug!("logger already installed: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelstop",
    about = "Plan cost-minimising fuel stops along a driving route",
    version
)]
struct Cli {
    /// Log planning progress at info level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Choose fuel stops for a route from a station price sheet.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
