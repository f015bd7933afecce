//! Test utilities for route providers.
//!
//! [`StubRouteProvider`] is a deterministic stand-in for a directions
//! service. It never touches the network and counts how often it is asked
//! for a route, which lets tests assert the chain's ordering guarantees.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource};

/// Stub `RouteProvider` for testing.
///
/// # Example
///
/// ```
/// use rescue_core::test_support::StubRouteProvider;
/// use rescue_core::{Coordinate, RouteProvider, RouteSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = StubRouteProvider::succeeding(RouteSource::Osrm);
/// let calls = provider.call_counter();
///
/// let route = provider
///     .fetch(Coordinate::new(0.0, 0.0)?, Coordinate::new(0.0, 1.0)?)
///     .await?;
/// assert_eq!(route.source(), RouteSource::Osrm);
/// assert_eq!(calls.get(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    source: RouteSource,
    behaviour: StubBehaviour,
    calls: CallCounter,
}

#[derive(Debug, Clone)]
enum StubBehaviour {
    /// Straight two-point route between the requested endpoints.
    Succeed,
    Route(CanonicalRoute),
    Fail(ProviderError),
    Hang,
}

/// Shared handle observing how many times a stub was called.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Number of `fetch` calls so far.
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn increment(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl StubRouteProvider {
    fn with_behaviour(source: RouteSource, behaviour: StubBehaviour) -> Self {
        Self {
            source,
            behaviour,
            calls: CallCounter::default(),
        }
    }

    /// Create a provider that returns a two-point route between the
    /// requested endpoints, tagged with `source`.
    #[must_use]
    pub fn succeeding(source: RouteSource) -> Self {
        Self::with_behaviour(source, StubBehaviour::Succeed)
    }

    /// Create a provider that always returns `route`.
    #[must_use]
    pub fn with_route(route: CanonicalRoute) -> Self {
        Self::with_behaviour(route.source(), StubBehaviour::Route(route))
    }

    /// Create a provider that always fails with `error`.
    #[must_use]
    pub fn failing(source: RouteSource, error: ProviderError) -> Self {
        Self::with_behaviour(source, StubBehaviour::Fail(error))
    }

    /// Create a provider that reports missing configuration.
    #[must_use]
    pub fn unconfigured(source: RouteSource) -> Self {
        Self::failing(
            source,
            ProviderError::NotConfigured {
                provider: source,
                reason: "stub has no credentials",
            },
        )
    }

    /// Create a provider whose requests never complete.
    #[must_use]
    pub fn hanging(source: RouteSource) -> Self {
        Self::with_behaviour(source, StubBehaviour::Hang)
    }

    /// Handle reporting how many times this provider was called.
    #[must_use]
    pub fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    fn source(&self) -> RouteSource {
        self.source
    }

    async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult {
        self.calls.increment();
        match &self.behaviour {
            StubBehaviour::Succeed => CanonicalRoute::new(
                origin.distance_km(destination),
                1.0,
                vec![origin, destination],
                vec!["Drive to the destination.".to_owned()],
                self.source,
            )
            .map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            }),
            StubBehaviour::Route(route) => Ok(route.clone()),
            StubBehaviour::Fail(error) => Err(error.clone()),
            StubBehaviour::Hang => std::future::pending().await,
        }
    }
}
