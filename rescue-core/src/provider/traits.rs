//! Route provider trait and result alias for a single directions attempt.

use async_trait::async_trait;

use crate::{CanonicalRoute, Coordinate, RouteSource};

use super::error::ProviderError;

/// Outcome of one provider attempt.
pub type ProviderResult = Result<CanonicalRoute, ProviderError>;

/// Fetch a driving route between two coordinates from one external service.
///
/// Implementations issue at most one outbound request per call and never
/// retry internally. Dropping the returned future cancels the request.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use rescue_core::{
///     CanonicalRoute, Coordinate, ProviderError, ProviderResult, RouteProvider, RouteSource,
/// };
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     fn source(&self) -> RouteSource {
///         RouteSource::Osrm
///     }
///
///     async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult {
///         CanonicalRoute::new(
///             origin.distance_km(destination),
///             1.0,
///             vec![origin, destination],
///             Vec::new(),
///             self.source(),
///         )
///         .map_err(|err| ProviderError::Malformed { message: err.to_string() })
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let origin = Coordinate::new(0.0, 0.0)?;
/// let destination = Coordinate::new(0.0, 1.0)?;
/// let route = StraightLine.fetch(origin, destination).await?;
/// assert_eq!(route.waypoints().len(), 2);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Tag recorded on routes this provider produces.
    fn source(&self) -> RouteSource;

    /// Request a route from `origin` to `destination`.
    ///
    /// Implementations must return [`ProviderError::NotConfigured`] without
    /// sending a request when a required credential is absent.
    async fn fetch(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult;
}
