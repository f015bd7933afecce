//! Incident-to-facility route resolution.
//!
//! [`RouteResolutionService`] joins the pieces: find the nearest facility,
//! ask the provider chain for a road route, and fall back to a synthetic
//! approximation when every provider is unavailable.

use std::sync::Arc;

use log::info;

use crate::{CanonicalRoute, Coordinate, GeoIndex, ProviderChain, ResponseFacility, SyntheticRouteGenerator};

/// Outcome of routing one incident.
///
/// `facility` and `route` are either both present or both absent; they are
/// absent only when the registry holds no facilities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Resolution {
    /// Nearest facility to the incident.
    pub facility: Option<ResponseFacility>,
    /// Route from the incident to `facility`.
    pub route: Option<CanonicalRoute>,
    /// Great-circle distance from the incident to `facility`.
    pub distance_to_facility_km: Option<f64>,
}

impl Resolution {
    /// Resolution for an empty registry.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            facility: None,
            route: None,
            distance_to_facility_km: None,
        }
    }

    /// Whether the route was approximated locally rather than fetched.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.route
            .as_ref()
            .is_some_and(|route| route.source().is_synthetic())
    }
}

/// Resolve incidents to their nearest facility and a route to it.
///
/// The service is `Send + Sync`; share it behind an [`Arc`] to serve
/// concurrent incidents. Each call holds its own state.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use rescue_core::{
///     Coordinate, GeoIndex, ProviderChain, ResponseFacility, RouteResolutionService,
/// };
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), rescue_core::CoordinateError> {
/// let index = GeoIndex::new(vec![
///     ResponseFacility::new(1, "Central", Coordinate::new(10.0, 10.0)?),
/// ]);
/// let service = RouteResolutionService::new(Arc::new(index), ProviderChain::empty());
///
/// let resolution = service
///     .resolve_for_incident(Coordinate::new(10.01, 10.01)?)
///     .await;
/// assert_eq!(resolution.facility.map(|f| f.id), Some(1));
/// assert!(resolution.route.is_some_and(|r| r.source().is_synthetic()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouteResolutionService {
    index: Arc<GeoIndex>,
    chain: ProviderChain,
    synthetic: SyntheticRouteGenerator,
}

impl RouteResolutionService {
    /// Create a service using the default synthetic generator.
    #[must_use]
    pub fn new(index: Arc<GeoIndex>, chain: ProviderChain) -> Self {
        Self {
            index,
            chain,
            synthetic: SyntheticRouteGenerator::default(),
        }
    }

    /// Replace the synthetic fallback generator.
    #[must_use]
    pub fn with_synthetic(mut self, synthetic: SyntheticRouteGenerator) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Facility registry shared by this service.
    #[must_use]
    pub fn index(&self) -> &GeoIndex {
        &self.index
    }

    /// Provider chain consulted before the synthetic fallback.
    #[must_use]
    pub const fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Route the incident at `incident` to its nearest facility.
    ///
    /// Never fails: provider errors are absorbed by the chain and a
    /// synthetic route stands in when no provider succeeds.
    pub async fn resolve_for_incident(&self, incident: Coordinate) -> Resolution {
        let Some((facility, distance_km)) = self.index.nearest_with_distance(incident) else {
            info!("no facilities registered; incident cannot be routed");
            return Resolution::unavailable();
        };

        let route = self
            .chain
            .resolve(incident, facility.location)
            .await
            .unwrap_or_else(|| {
                info!(
                    "all route providers unavailable; using synthetic route to facility {}",
                    facility.id
                );
                self.synthetic.generate(incident, facility.location)
            });

        Resolution {
            facility: Some(facility.clone()),
            route: Some(route),
            distance_to_facility_km: Some(distance_km),
        }
    }
}
