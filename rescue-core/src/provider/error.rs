use thiserror::Error;

use crate::RouteSource;

/// Reasons a single provider attempt produced no route.
///
/// All variants are non-fatal to a resolution: the chain logs them and moves
/// on to the next provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider lacks a credential and was skipped without a request.
    #[error("{provider} is not configured: {reason}")]
    NotConfigured {
        /// Provider that was skipped.
        provider: RouteSource,
        /// Which setting is missing.
        reason: &'static str,
    },
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Endpoint without query parameters.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The attempt exceeded its time budget.
    #[error("request to {target} timed out after {timeout_ms} ms")]
    Timeout {
        /// Endpoint or provider tag that timed out.
        target: String,
        /// Budget that was exceeded, in milliseconds.
        timeout_ms: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("{url} responded with HTTP {status}: {message}")]
    HttpStatus {
        /// Endpoint without query parameters.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The payload carried a service-level status other than success.
    #[error("service reported status {code}: {message}")]
    ServiceStatus {
        /// Status string reported by the service.
        code: String,
        /// Accompanying message, possibly empty.
        message: String,
    },
    /// The payload held an empty route or feature collection.
    #[error("response contained no routes")]
    EmptyResult,
    /// A field needed for normalisation was absent.
    #[error("response is missing required field `{field}`")]
    MissingField {
        /// Path of the missing field within the payload.
        field: &'static str,
    },
    /// The payload was well-formed JSON but unusable as a route.
    #[error("response is malformed: {message}")]
    Malformed {
        /// What made the payload unusable.
        message: String,
    },
    /// The body could not be decoded as the expected JSON shape.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

impl ProviderError {
    /// Whether the attempt was skipped because of missing configuration
    /// rather than failing.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}
