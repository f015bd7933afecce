//! Fetch drivable routes from external directions services.
//!
//! The [`RouteProvider`] trait abstracts a single outbound directions request
//! whose reply is normalised into a [`CanonicalRoute`](crate::CanonicalRoute).
//! Failures are values, never panics: every attempt yields a
//! [`ProviderResult`] and [`ProviderError::is_skip`] separates configuration
//! gaps from genuine failures.

mod error;
mod traits;

pub use error::ProviderError;
pub use traits::{ProviderResult, RouteProvider};
