//! OpenRouteService directions provider.
//!
//! Requests the GeoJSON flavour of the `driving-car` profile, which returns
//! a feature collection whose first feature is the route.

use async_trait::async_trait;
use reqwest::Client;
use rescue_core::{CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource};
use serde::Deserialize;

use super::config::{HttpRouteProviderConfig, OPEN_ROUTE_SERVICE_BASE_URL};
use super::geojson::LineString;
use super::http::{self, ProviderBuildError};
use super::units::{metres_to_km, seconds_to_minutes};

const ACCEPT_GEOJSON: &str =
    "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// Instruction used when the response carries no step text.
pub const FALLBACK_INSTRUCTION: &str = "Follow the route to the destination.";

/// OpenRouteService GeoJSON directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Route features, best first.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single route feature.
#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Route summary and turn-by-turn segments.
    pub properties: Option<Properties>,
    /// Route geometry.
    pub geometry: Option<LineString>,
}

/// Feature properties.
#[derive(Debug, Deserialize)]
pub struct Properties {
    /// Totals for the whole route.
    pub summary: Option<Summary>,
    /// Per-leg step lists.
    pub segments: Option<Vec<Segment>>,
}

/// Route totals.
///
/// OpenRouteService omits zero-valued totals, so absent fields read as zero.
#[derive(Debug, Deserialize)]
pub struct Summary {
    /// Distance in metres.
    #[serde(default)]
    pub distance: f64,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// One leg of the route.
#[derive(Debug, Deserialize)]
pub struct Segment {
    /// Manoeuvres in travel order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A single manoeuvre.
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Plain-text instruction.
    #[serde(default)]
    pub instruction: String,
}

impl DirectionsResponse {
    /// Normalise the first feature into a [`CanonicalRoute`].
    pub fn into_route(self) -> ProviderResult {
        let feature = self
            .features
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResult)?;
        let properties = feature.properties.ok_or(ProviderError::MissingField {
            field: "features[0].properties",
        })?;
        let summary = properties.summary.ok_or(ProviderError::MissingField {
            field: "features[0].properties.summary",
        })?;
        let waypoints = feature
            .geometry
            .ok_or(ProviderError::MissingField {
                field: "features[0].geometry",
            })?
            .to_waypoints()?;

        let mut instructions: Vec<String> = properties
            .segments
            .unwrap_or_default()
            .into_iter()
            .flat_map(|segment| segment.steps)
            .map(|step| step.instruction)
            .filter(|instruction| !instruction.trim().is_empty())
            .collect();
        if instructions.is_empty() {
            instructions.push(FALLBACK_INSTRUCTION.to_owned());
        }

        CanonicalRoute::new(
            metres_to_km(summary.distance),
            seconds_to_minutes(summary.duration),
            waypoints,
            instructions,
            RouteSource::OpenRouteService,
        )
        .map_err(|err| ProviderError::Malformed {
            message: err.to_string(),
        })
    }
}

/// Route provider backed by OpenRouteService.
///
/// Skipped without a request when no API key is configured.
#[derive(Debug)]
pub struct OpenRouteServiceProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    base_url: String,
}

impl OpenRouteServiceProvider {
    /// Create a provider against the public endpoint using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(
            HttpRouteProviderConfig::new(OPEN_ROUTE_SERVICE_BASE_URL).with_api_key(api_key),
        )
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = http::normalise_base_url(&config.base_url)?;
        let client = http::build_client(&config)?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build the directions URL; coordinates are `lon,lat`.
    fn build_directions_url(
        &self,
        api_key: &str,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<url::Url, ProviderError> {
        http::endpoint(
            &self.base_url,
            "/v2/directions/driving-car",
            &[
                ("api_key", api_key.to_owned()),
                (
                    "start",
                    format!("{},{}", origin.longitude(), origin.latitude()),
                ),
                (
                    "end",
                    format!("{},{}", destination.longitude(), destination.latitude()),
                ),
            ],
        )
    }
}

#[async_trait]
impl RouteProvider for OpenRouteServiceProvider {
    fn source(&self) -> RouteSource {
        RouteSource::OpenRouteService
    }

    async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult {
        let Some(api_key) = self.config.api_key() else {
            return Err(ProviderError::NotConfigured {
                provider: RouteSource::OpenRouteService,
                reason: "api key is absent",
            });
        };
        let url = self.build_directions_url(api_key, origin, destination)?;
        let response: DirectionsResponse =
            http::get_json(&self.client, url, Some(ACCEPT_GEOJSON), self.config.timeout).await?;
        response.into_route()
    }
}
