//! Outbound integrations for rescue route resolution.
//!
//! [`routing`] holds the HTTP route providers and assembles the default
//! provider chain; [`facilities`] loads the facility registry from disk.
#![forbid(unsafe_code)]

pub mod facilities;
pub mod routing;

pub use facilities::{FacilityDatasetError, load_facilities, parse_facilities};
pub use routing::{ProviderBuildError, RoutingConfig, default_chain};
