//! Error types emitted by the rescue CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use rescue_core::CoordinateError;
use rescue_data::{FacilityDatasetError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the rescue CLI.
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
    /// The incident position is not a valid coordinate.
    #[error("invalid incident location: {0}")]
    InvalidIncident(#[source] CoordinateError),
    /// The per-attempt timeout must be positive.
    #[error("{field} must be greater than zero")]
    InvalidTimeout { field: &'static str },
    /// Loading the facility registry failed.
    #[error(transparent)]
    LoadFacilities(#[from] Box<FacilityDatasetError>),
    /// Constructing the route providers failed.
    #[error("failed to build route providers: {0}")]
    BuildProviders(#[from] ProviderBuildError),
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serialising the resolution failed.
    #[error("failed to serialise resolution: {0}")]
    SerialiseResolution(#[source] serde_json::Error),
    /// Writing the resolution output failed.
    #[error("failed to write resolution output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<FacilityDatasetError> for CliError {
    fn from(value: FacilityDatasetError) -> Self {
        Self::LoadFacilities(Box::new(value))
    }
}
