//! Command-line interface for emergency route resolution.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod resolve;

pub use error::CliError;
use resolve::{ResolveArgs, run_resolve};

pub(crate) const ARG_FACILITIES: &str = "facilities";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_GOOGLE_API_KEY: &str = "google-api-key";
pub(crate) const ARG_ORS_API_KEY: &str = "ors-api-key";
pub(crate) const ARG_GOOGLE_BASE_URL: &str = "google-base-url";
pub(crate) const ARG_ORS_BASE_URL: &str = "ors-base-url";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_EMERGENCY_CONTACT: &str = "emergency-contact";
pub(crate) const ENV_FACILITIES: &str = "RESCUE_CMDS_RESOLVE_FACILITIES";
pub(crate) const ENV_LAT: &str = "RESCUE_CMDS_RESOLVE_LAT";
pub(crate) const ENV_LON: &str = "RESCUE_CMDS_RESOLVE_LON";

/// Run the rescue CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Resolve(args) => run_resolve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rescue",
    about = "Route incidents to the nearest emergency-response facility",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the nearest facility to an incident and a route to reach it.
    Resolve(ResolveArgs),
}

#[cfg(test)]
mod tests;
