//! Ordered, sequential attempts across route providers.
//!
//! [`ProviderChain`] tries each provider to completion before starting the
//! next one; the first success wins. Attempts are never run in parallel
//! because the services are billed per call.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::{CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource};

/// Default time budget for a single provider attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sequential fallback across an ordered list of [`RouteProvider`]s.
///
/// # Examples
///
/// ```rust
/// use rescue_core::{Coordinate, ProviderChain};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), rescue_core::CoordinateError> {
/// let chain = ProviderChain::empty();
/// let origin = Coordinate::new(0.0, 0.0)?;
/// let destination = Coordinate::new(0.0, 0.1)?;
///
/// // With no providers the chain is exhausted immediately.
/// assert!(chain.resolve(origin, destination).await.is_none());
/// # Ok(())
/// # }
/// ```
pub struct ProviderChain {
    providers: Vec<Box<dyn RouteProvider>>,
    attempt_timeout: Duration,
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.sources())
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::empty()
    }
}

impl ProviderChain {
    /// Create a chain that tries `providers` in the given order.
    #[must_use]
    pub const fn new(providers: Vec<Box<dyn RouteProvider>>) -> Self {
        Self {
            providers,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Create a chain with no providers; it always reports exhaustion.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Set the time budget for each individual attempt.
    #[must_use]
    pub const fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Time budget applied to each attempt.
    #[must_use]
    pub const fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Provider tags in attempt order.
    #[must_use]
    pub fn sources(&self) -> Vec<RouteSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// Number of providers in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain holds no providers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Return the first route produced by the providers, in order.
    ///
    /// Returns `None` when every provider was skipped or failed; callers
    /// should then fall back to a synthetic route. Failures are logged and
    /// never surfaced.
    pub async fn resolve(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Option<CanonicalRoute> {
        for provider in &self.providers {
            let source = provider.source();
            match self.attempt(provider.as_ref(), origin, destination).await {
                Ok(route) => {
                    info!("route resolved by {source}");
                    return Some(route);
                }
                Err(err) if err.is_skip() => debug!("skipping {source}: {err}"),
                Err(err) => warn!("{source} failed: {err}"),
            }
        }
        None
    }

    async fn attempt(
        &self,
        provider: &dyn RouteProvider,
        origin: Coordinate,
        destination: Coordinate,
    ) -> ProviderResult {
        let source = provider.source();
        debug!("requesting route from {source}");
        tokio::time::timeout(self.attempt_timeout, provider.fetch(origin, destination))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    target: source.as_str().to_owned(),
                    timeout_ms: u64::try_from(self.attempt_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                })
            })
    }
}
