//! Google Directions API provider.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions>

use async_trait::async_trait;
use reqwest::Client;
use rescue_core::{CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource};
use serde::Deserialize;

use super::config::{GOOGLE_DIRECTIONS_BASE_URL, HttpRouteProviderConfig};
use super::http::{self, ProviderBuildError};
use super::markup::strip_tags;
use super::ors::FALLBACK_INSTRUCTION;
use super::units::{metres_to_km, parse_distance_text, parse_duration_text, seconds_to_minutes};

/// Google Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Top-level status, `"OK"` on success.
    pub status: String,
    /// Explanation accompanying a non-OK status.
    pub error_message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Legs between successive waypoints; a direct request has one.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// A leg between two waypoints.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Total leg distance.
    pub distance: Option<TextValue>,
    /// Total leg duration.
    pub duration: Option<TextValue>,
    /// Snapped start of the leg.
    pub start_location: Option<LatLng>,
    /// Snapped end of the leg.
    pub end_location: Option<LatLng>,
    /// Manoeuvres in travel order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A measurement reported both as display text and a raw value.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Display text such as `"12.3 km"` or `"25 mins"`.
    pub text: Option<String>,
    /// Metres for distances, seconds for durations.
    pub value: Option<f64>,
}

/// A single manoeuvre.
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Where the manoeuvre starts.
    pub start_location: LatLng,
    /// Where the manoeuvre ends.
    pub end_location: LatLng,
    /// HTML-formatted instruction.
    #[serde(default)]
    pub html_instructions: String,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl TryFrom<LatLng> for Coordinate {
    type Error = ProviderError;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lng).map_err(|err| ProviderError::Malformed {
            message: format!("invalid step location: {err}"),
        })
    }
}

impl TextValue {
    /// Kilometres from `value`, or from `text` when the value is absent.
    fn kilometres(&self) -> Option<f64> {
        self.value
            .map(metres_to_km)
            .or_else(|| self.text.as_deref().and_then(parse_distance_text))
    }

    /// Minutes from `value`, or from `text` when the value is absent.
    fn minutes(&self) -> Option<f64> {
        self.value
            .map(seconds_to_minutes)
            .or_else(|| self.text.as_deref().and_then(parse_duration_text))
    }
}

impl DirectionsResponse {
    /// Normalise the first leg of the first route into a [`CanonicalRoute`].
    pub fn into_route(self) -> ProviderResult {
        if self.status != "OK" {
            return Err(ProviderError::ServiceStatus {
                code: self.status,
                message: self.error_message.unwrap_or_default(),
            });
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResult)?;
        let leg = route.legs.into_iter().next().ok_or(ProviderError::MissingField {
            field: "routes[0].legs",
        })?;

        let distance_km = leg
            .distance
            .as_ref()
            .and_then(TextValue::kilometres)
            .ok_or(ProviderError::MissingField {
                field: "routes[0].legs[0].distance",
            })?;
        let duration_minutes = leg
            .duration
            .as_ref()
            .and_then(TextValue::minutes)
            .ok_or(ProviderError::MissingField {
                field: "routes[0].legs[0].duration",
            })?;

        let waypoints = leg_waypoints(&leg)?;
        let instructions = if leg.steps.is_empty() {
            vec![FALLBACK_INSTRUCTION.to_owned()]
        } else {
            leg.steps
                .iter()
                .map(|step| strip_tags(&step.html_instructions))
                .collect()
        };

        CanonicalRoute::new(
            distance_km,
            duration_minutes,
            waypoints,
            instructions,
            RouteSource::GoogleDirections,
        )
        .map_err(|err| ProviderError::Malformed {
            message: err.to_string(),
        })
    }
}

/// Each step's start followed by the final step's end. Legs without steps
/// fall back to the leg's own endpoints.
fn leg_waypoints(leg: &Leg) -> Result<Vec<Coordinate>, ProviderError> {
    let points: Vec<LatLng> = match leg.steps.last() {
        Some(last) => leg
            .steps
            .iter()
            .map(|step| step.start_location)
            .chain(std::iter::once(last.end_location))
            .collect(),
        None => leg
            .start_location
            .into_iter()
            .chain(leg.end_location)
            .collect(),
    };
    points.into_iter().map(Coordinate::try_from).collect()
}

/// Route provider backed by the Google Directions API.
///
/// Skipped without a request when no API key is configured.
#[derive(Debug)]
pub struct GoogleDirectionsProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    base_url: String,
}

impl GoogleDirectionsProvider {
    /// Create a provider against the public endpoint using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(
            HttpRouteProviderConfig::new(GOOGLE_DIRECTIONS_BASE_URL).with_api_key(api_key),
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

    /// Build the directions URL; coordinates are `lat,lng`.
    fn build_directions_url(
        &self,
        api_key: &str,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<url::Url, ProviderError> {
        http::endpoint(
            &self.base_url,
            "/maps/api/directions/json",
            &[
                (
                    "origin",
                    format!("{},{}", origin.latitude(), origin.longitude()),
                ),
                (
                    "destination",
                    format!("{},{}", destination.latitude(), destination.longitude()),
                ),
                ("mode", "driving".to_owned()),
                ("key", api_key.to_owned()),
            ],
        )
    }
}

#[async_trait]
impl RouteProvider for GoogleDirectionsProvider {
    fn source(&self) -> RouteSource {
        RouteSource::GoogleDirections
    }

    async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult {
        let Some(api_key) = self.config.api_key() else {
            return Err(ProviderError::NotConfigured {
                provider: RouteSource::GoogleDirections,
                reason: "api key is absent",
            });
        };
        let url = self.build_directions_url(api_key, origin, destination)?;
        let response: DirectionsResponse =
            http::get_json(&self.client, url, None, self.config.timeout).await?;
        response.into_route()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FIXTURE: &str = include_str!("../../tests/fixtures/google_directions.json");

    fn parse(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[rstest]
    fn normalises_fixture() {
        let route = parse(FIXTURE).into_route().expect("should normalise");

        assert_eq!(route.source(), RouteSource::GoogleDirections);
        assert_eq!(route.distance_km(), 1.7);
        assert_eq!(route.duration_minutes(), 4.0);
        // Two step starts plus the final step end.
        assert_eq!(route.waypoints().len(), 3);
        assert_eq!(route.waypoints()[2].latitude(), 10.0001);
        assert_eq!(
            route.instructions(),
            [
                "Head south on Station Rd toward Mill Ln",
                "Turn right onto Market St Destination will be on the left",
            ]
        );
    }

    #[rstest]
    fn text_is_used_when_values_are_absent() {
        let route = parse(
            r#"{"status": "OK", "routes": [{"legs": [{
                "distance": {"text": "12.3 km"},
                "duration": {"text": "1 hour 5 mins"},
                "start_location": {"lat": 10.01, "lng": 10.01},
                "end_location": {"lat": 10.0, "lng": 10.0},
                "steps": []
            }]}]}"#,
        )
        .into_route()
        .expect("should normalise");

        assert_eq!(route.distance_km(), 12.3);
        assert_eq!(route.duration_minutes(), 65.0);
        assert_eq!(route.waypoints().len(), 2);
        assert_eq!(route.instructions(), [FALLBACK_INSTRUCTION]);
    }

    #[rstest]
    #[case(r#"{"status": "ZERO_RESULTS", "routes": []}"#, "ZERO_RESULTS", "")]
    #[case(
        r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "routes": []}"#,
        "REQUEST_DENIED",
        "The provided API key is invalid."
    )]
    fn non_ok_status_is_service_error(
        #[case] json: &str,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let err = parse(json).into_route().expect_err("should fail");
        assert_eq!(
            err,
            ProviderError::ServiceStatus {
                code: code.to_owned(),
                message: message.to_owned(),
            }
        );
    }

    #[rstest]
    fn ok_without_routes_is_empty_result() {
        let err = parse(r#"{"status": "OK", "routes": []}"#)
            .into_route()
            .expect_err("should fail");
        assert_eq!(err, ProviderError::EmptyResult);
    }

    #[rstest]
    fn unreadable_distance_is_missing() {
        let err = parse(
            r#"{"status": "OK", "routes": [{"legs": [{
                "distance": {"text": "somewhere"},
                "duration": {"value": 60},
                "steps": []
            }]}]}"#,
        )
        .into_route()
        .expect_err("should fail");
        assert_eq!(
            err,
            ProviderError::MissingField {
                field: "routes[0].legs[0].distance"
            }
        );
    }

    #[rstest]
    fn leg_without_locations_is_malformed() {
        let err = parse(
            r#"{"status": "OK", "routes": [{"legs": [{
                "distance": {"value": 10},
                "duration": {"value": 60},
                "steps": []
            }]}]}"#,
        )
        .into_route()
        .expect_err("should fail");
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[rstest]
    fn query_carries_lat_lng_pairs() {
        let provider = GoogleDirectionsProvider::new(Some("key".to_owned())).expect("builds");
        let url = provider
            .build_directions_url(
                "key",
                Coordinate::new(10.01, 20.02).expect("valid"),
                Coordinate::new(10.0, 20.0).expect("valid"),
            )
            .expect("url should build");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("origin".to_owned(), "10.01,20.02".to_owned()),
                ("destination".to_owned(), "10,20".to_owned()),
                ("mode".to_owned(), "driving".to_owned()),
                ("key".to_owned(), "key".to_owned()),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_key_skips_without_request() {
        let provider = GoogleDirectionsProvider::new(None).expect("builds");
        let here = Coordinate::new(0.0, 0.0).expect("valid");

        let err = provider.fetch(here, here).await.expect_err("should skip");

        assert_eq!(
            err,
            ProviderError::NotConfigured {
                provider: RouteSource::GoogleDirections,
                reason: "api key is absent",
            }
        );
    }
}
