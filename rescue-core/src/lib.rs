//! Core domain types for emergency route resolution.
//!
//! An incident position is matched to the nearest [`ResponseFacility`] in a
//! [`GeoIndex`]. A [`ProviderChain`] then asks external directions services
//! for a road route, one after another, and [`SyntheticRouteGenerator`]
//! approximates a route locally when none of them can help.
//! [`RouteResolutionService`] ties these together.
//!
//! Constructors return `Result` so invalid coordinates and routes surface
//! early instead of propagating through the chain.

#![forbid(unsafe_code)]

mod chain;
mod coordinate;
mod facility;
mod geo_index;
pub mod provider;
mod route;
mod service;
mod synthetic;

#[doc(hidden)]
pub mod test_support;

pub use chain::{DEFAULT_ATTEMPT_TIMEOUT, ProviderChain};
pub use coordinate::{Coordinate, CoordinateError, EARTH_RADIUS_KM, haversine_km};
pub use facility::{Metadata, ResponseFacility};
pub use geo_index::GeoIndex;
pub use provider::{ProviderError, ProviderResult, RouteProvider};
pub use route::{CanonicalRoute, RouteError, RouteSource};
pub use service::{Resolution, RouteResolutionService};
pub use synthetic::{
    DEFAULT_EMERGENCY_CONTACT, INTERMEDIATE_WAYPOINTS, MINUTES_PER_KM, ROAD_DISTANCE_FACTOR,
    SyntheticRouteGenerator,
};
