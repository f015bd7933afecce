//! Resolve command implementation for the rescue CLI.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rescue_core::{
    Coordinate, DEFAULT_EMERGENCY_CONTACT, GeoIndex, ProviderChain, Resolution,
    RouteResolutionService, SyntheticRouteGenerator,
};
use rescue_data::{RoutingConfig, default_chain, load_facilities};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_EMERGENCY_CONTACT, ARG_FACILITIES, ARG_GOOGLE_API_KEY, ARG_GOOGLE_BASE_URL, ARG_LAT,
    ARG_LON, ARG_ORS_API_KEY, ARG_ORS_BASE_URL, ARG_OSRM_BASE_URL, ARG_TIMEOUT_SECS, CliError,
    ENV_FACILITIES, ENV_LAT, ENV_LON,
};

/// Default per-provider timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve an incident by loading the facility registry, \
                 picking the nearest facility and asking Google Directions, \
                 OpenRouteService and OSRM in turn for a driving route. When \
                 every provider is unavailable a synthetic route is returned.",
    about = "Route an incident to its nearest facility"
)]
#[ortho_config(prefix = "RESCUE")]
pub(crate) struct ResolveArgs {
    /// Path to the JSON facility registry.
    #[arg(long = ARG_FACILITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) facilities: Option<Utf8PathBuf>,
    /// Incident latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Incident longitude in degrees.
    #[arg(long = ARG_LON, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Google Directions API key. Google is skipped without one.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// OpenRouteService API key. OpenRouteService is skipped without one.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Override the Google Directions base URL.
    #[arg(long = ARG_GOOGLE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) google_base_url: Option<String>,
    /// Override the OpenRouteService base URL.
    #[arg(long = ARG_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// Override the OSRM base URL (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Per-provider timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Contact number quoted in synthetic route guidance.
    #[arg(long = ARG_EMERGENCY_CONTACT, value_name = "number")]
    #[serde(default)]
    pub(crate) emergency_contact: Option<String>,
}

impl ResolveArgs {
    pub(crate) fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolveConfig {
    /// Path to the facility registry.
    pub(crate) facilities: Utf8PathBuf,
    /// Validated incident position.
    pub(crate) incident: Coordinate,
    /// Provider endpoints, credentials and timeouts.
    pub(crate) routing: RoutingConfig,
    /// Contact number for synthetic guidance.
    pub(crate) emergency_contact: String,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let facilities = args.facilities.ok_or(CliError::MissingArgument {
            field: ARG_FACILITIES,
            env: ENV_FACILITIES,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_LON,
        })?;
        let incident = Coordinate::new(lat, lon).map_err(CliError::InvalidIncident)?;

        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidTimeout {
                field: ARG_TIMEOUT_SECS,
            });
        }

        let mut routing = RoutingConfig::default().with_timeout(Duration::from_secs(timeout_secs));
        routing.google = routing.google.with_api_key(args.google_api_key);
        routing.open_route_service = routing.open_route_service.with_api_key(args.ors_api_key);
        if let Some(url) = args.google_base_url {
            routing.google.base_url = url;
        }
        if let Some(url) = args.ors_base_url {
            routing.open_route_service.base_url = url;
        }
        if let Some(url) = args.osrm_base_url {
            routing.osrm.base_url = url;
        }

        let emergency_contact = args
            .emergency_contact
            .filter(|contact| !contact.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMERGENCY_CONTACT.to_owned());

        Ok(Self {
            facilities,
            incident,
            routing,
            emergency_contact,
        })
    }
}

/// Builds the provider chain for the current resolve invocation.
pub(super) trait ResolveChainBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<ProviderChain, CliError>;
}

pub(super) struct DefaultResolveChainBuilder;

impl ResolveChainBuilder for DefaultResolveChainBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<ProviderChain, CliError> {
        Ok(default_chain(&config.routing)?)
    }
}

/// JSON document written to stdout.
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    #[serde(flatten)]
    resolution: &'a Resolution,
    distance_label: Option<String>,
    duration_label: Option<String>,
}

impl<'a> From<&'a Resolution> for ResolveOutput<'a> {
    fn from(resolution: &'a Resolution) -> Self {
        Self {
            resolution,
            distance_label: resolution.route.as_ref().map(|route| route.distance_label()),
            duration_label: resolution.route.as_ref().map(|route| route.duration_label()),
        }
    }
}

pub(super) fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultResolveChainBuilder;
    run_resolve_with(args, &builder, &mut stdout)
}

pub(super) fn run_resolve_with(
    args: ResolveArgs,
    builder: &dyn ResolveChainBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let resolution = execute_resolve(&config, builder)?;
    write_resolution(writer, &resolution)
}

pub(super) fn execute_resolve(
    config: &ResolveConfig,
    builder: &dyn ResolveChainBuilder,
) -> Result<Resolution, CliError> {
    let index: Arc<GeoIndex> = Arc::new(load_facilities(&config.facilities)?);
    let chain = builder.build(config)?;
    info!(
        "resolving incident at ({}, {}) against {} facilities using {} providers",
        config.incident.latitude(),
        config.incident.longitude(),
        index.len(),
        chain.len()
    );
    let service = RouteResolutionService::new(index, chain).with_synthetic(
        SyntheticRouteGenerator::with_emergency_contact(config.emergency_contact.clone()),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(service.resolve_for_incident(config.incident)))
}

fn write_resolution(writer: &mut dyn Write, resolution: &Resolution) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(&ResolveOutput::from(resolution))
        .map_err(CliError::SerialiseResolution)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ResolveConfig, CliError> {
    let merged = ResolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ResolveConfig::try_from(merged)
}
