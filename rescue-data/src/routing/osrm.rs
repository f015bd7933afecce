//! OSRM Route service provider.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use async_trait::async_trait;
use reqwest::Client;
use rescue_core::{CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource};
use serde::Deserialize;

use super::config::{HttpRouteProviderConfig, OSRM_BASE_URL};
use super::geojson::LineString;
use super::http::{self, ProviderBuildError};
use super::units::{metres_to_km, seconds_to_minutes};

/// Instructions attached to OSRM routes, which carry no step text.
pub const OSRM_INSTRUCTIONS: [&str; 3] = [
    "Follow the route to the destination.",
    "Use GPS navigation for turn-by-turn directions.",
    "Contact rescue team for specific guidance.",
];

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route within a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Distance in metres.
    pub distance: Option<f64>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    /// Full-overview geometry.
    pub geometry: Option<LineString>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Normalise the first route into a [`CanonicalRoute`].
    pub fn into_route(self) -> ProviderResult {
        if !self.is_ok() {
            return Err(ProviderError::ServiceStatus {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResult)?;
        let distance = route.distance.ok_or(ProviderError::MissingField {
            field: "routes[0].distance",
        })?;
        let duration = route.duration.ok_or(ProviderError::MissingField {
            field: "routes[0].duration",
        })?;
        let waypoints = route
            .geometry
            .ok_or(ProviderError::MissingField {
                field: "routes[0].geometry",
            })?
            .to_waypoints()?;

        CanonicalRoute::new(
            metres_to_km(distance),
            seconds_to_minutes(duration),
            waypoints,
            OSRM_INSTRUCTIONS.iter().map(|line| (*line).to_owned()).collect(),
            RouteSource::Osrm,
        )
        .map_err(|err| ProviderError::Malformed {
            message: err.to_string(),
        })
    }
}

/// Route provider backed by an OSRM server.
///
/// OSRM needs no credential, so this provider is always attempted.
#[derive(Debug)]
pub struct OsrmRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    base_url: String,
}

impl OsrmRouteProvider {
    /// Create a provider against the public OSRM demo server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(OSRM_BASE_URL))
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

    /// Build the Route API URL.
    ///
    /// The URL format is: `{base_url}/route/v1/driving/{lon},{lat};{lon},{lat}`.
    fn build_route_url(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<url::Url, ProviderError> {
        let path = format!(
            "/route/v1/driving/{},{};{},{}",
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude()
        );
        http::endpoint(
            &self.base_url,
            &path,
            &[
                ("overview", "full".to_owned()),
                ("geometries", "geojson".to_owned()),
            ],
        )
    }
}

#[async_trait]
impl RouteProvider for OsrmRouteProvider {
    fn source(&self) -> RouteSource {
        RouteSource::Osrm
    }

    async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult {
        let url = self.build_route_url(origin, destination)?;
        let response: RouteResponse =
            http::get_json(&self.client, url, None, self.config.timeout).await?;
        response.into_route()
    }
}
