//! HTTP-based route providers for external directions services.
//!
//! Three [`RouteProvider`] implementations are provided, one per service:
//! [`GoogleDirectionsProvider`], [`OpenRouteServiceProvider`] and
//! [`OsrmRouteProvider`]. Each owns a `reqwest` client, normalises the
//! service payload into a [`CanonicalRoute`](rescue_core::CanonicalRoute) and
//! reports every failure as a [`ProviderError`](rescue_core::ProviderError).
//!
//! [`default_chain`] assembles them in their fixed order of preference.
//!
//! # Example
//!
//! ```no_run
//! use rescue_core::Coordinate;
//! use rescue_data::routing::{RoutingConfig, default_chain};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = RoutingConfig::default();
//! config.google = config.google.with_api_key(std::env::var("GOOGLE_MAPS_API_KEY").ok());
//! let chain = default_chain(&config)?;
//!
//! let incident = Coordinate::new(51.5074, -0.1278)?;
//! let station = Coordinate::new(51.5155, -0.0922)?;
//! if let Some(route) = chain.resolve(incident, station).await {
//!     println!("{} via {}", route.distance_label(), route.source());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod geojson;
mod google;
mod http;
mod markup;
mod ors;
mod osrm;
mod units;

use rescue_core::{ProviderChain, RouteProvider};

pub use config::{
    DEFAULT_USER_AGENT, GOOGLE_DIRECTIONS_BASE_URL, HttpRouteProviderConfig,
    OPEN_ROUTE_SERVICE_BASE_URL, OSRM_BASE_URL, RoutingConfig,
};
pub use google::GoogleDirectionsProvider;
pub use http::ProviderBuildError;
pub use ors::OpenRouteServiceProvider;
pub use osrm::OsrmRouteProvider;

/// Build the provider chain: Google Directions, then OpenRouteService, then
/// OSRM.
///
/// # Errors
///
/// Returns an error if any provider's base URL is invalid or its HTTP
/// client fails to build.
pub fn default_chain(config: &RoutingConfig) -> Result<ProviderChain, ProviderBuildError> {
    let providers: Vec<Box<dyn RouteProvider>> = vec![
        Box::new(GoogleDirectionsProvider::with_config(config.google.clone())?),
        Box::new(OpenRouteServiceProvider::with_config(
            config.open_route_service.clone(),
        )?),
        Box::new(OsrmRouteProvider::with_config(config.osrm.clone())?),
    ];
    Ok(ProviderChain::new(providers).with_attempt_timeout(config.attempt_timeout))
}
