//! Facade crate for emergency route resolution.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the HTTP route providers and facility loader.

#![forbid(unsafe_code)]

pub use rescue_core::{
    CanonicalRoute, Coordinate, CoordinateError, DEFAULT_ATTEMPT_TIMEOUT,
    DEFAULT_EMERGENCY_CONTACT, GeoIndex, Metadata, ProviderChain, ProviderError, ProviderResult,
    Resolution, ResponseFacility, RouteError, RouteProvider, RouteResolutionService, RouteSource,
    SyntheticRouteGenerator, haversine_km,
};

#[cfg(feature = "http")]
pub use rescue_data::routing::{
    GoogleDirectionsProvider, HttpRouteProviderConfig, OpenRouteServiceProvider,
    OsrmRouteProvider,
};
#[cfg(feature = "http")]
pub use rescue_data::{
    FacilityDatasetError, ProviderBuildError, RoutingConfig, default_chain, load_facilities,
    parse_facilities,
};
