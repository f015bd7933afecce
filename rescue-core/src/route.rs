//! Canonical routes shared by every provider and the synthetic fallback.
//!
//! Each external service normalises its payload into a [`CanonicalRoute`];
//! [`RouteSource`] records which one produced it.

use std::fmt;

use thiserror::Error;

use crate::Coordinate;

/// Origin of a [`CanonicalRoute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum RouteSource {
    /// Google Directions API.
    GoogleDirections,
    /// OpenRouteService directions.
    OpenRouteService,
    /// OSRM route service.
    Osrm,
    /// Locally computed approximation.
    Synthetic,
}

impl RouteSource {
    /// Stable kebab-case tag for logs and serialised output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoogleDirections => "google-directions",
            Self::OpenRouteService => "open-route-service",
            Self::Osrm => "osrm",
            Self::Synthetic => "synthetic",
        }
    }

    /// Whether the route was approximated locally.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A drivable route from an origin to a destination.
///
/// Distances are kilometres and durations minutes. The waypoint sequence
/// always holds at least two points.
///
/// # Examples
/// ```
/// use rescue_core::{CanonicalRoute, Coordinate, RouteSource};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let route = CanonicalRoute::new(
///     12.3,
///     18.0,
///     vec![Coordinate::new(10.0, 10.0)?, Coordinate::new(10.1, 10.1)?],
///     vec!["Head north".to_string()],
///     RouteSource::Osrm,
/// )?;
///
/// assert_eq!(route.distance_label(), "12.3 km");
/// assert_eq!(route.duration_label(), "18 minutes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CanonicalRoute {
    distance_km: f64,
    duration_minutes: f64,
    waypoints: Vec<Coordinate>,
    instructions: Vec<String>,
    source: RouteSource,
}

/// Errors returned by [`CanonicalRoute::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Fewer than two waypoints were supplied.
    #[error("route requires at least two waypoints, found {found}")]
    TooFewWaypoints {
        /// Number of waypoints supplied.
        found: usize,
    },
    /// Distance was negative, NaN or infinite.
    #[error("route distance {value} km is invalid")]
    InvalidDistance {
        /// Rejected distance in kilometres.
        value: f64,
    },
    /// Duration was negative, NaN or infinite.
    #[error("route duration {value} minutes is invalid")]
    InvalidDuration {
        /// Rejected duration in minutes.
        value: f64,
    },
}

impl CanonicalRoute {
    /// Minimum number of waypoints in any route.
    pub const MIN_WAYPOINTS: usize = 2;

    /// Validates and constructs a [`CanonicalRoute`].
    pub fn new(
        distance_km: f64,
        duration_minutes: f64,
        waypoints: Vec<Coordinate>,
        instructions: Vec<String>,
        source: RouteSource,
    ) -> Result<Self, RouteError> {
        if waypoints.len() < Self::MIN_WAYPOINTS {
            return Err(RouteError::TooFewWaypoints {
                found: waypoints.len(),
            });
        }
        if !is_valid_measure(distance_km) {
            return Err(RouteError::InvalidDistance { value: distance_km });
        }
        if !is_valid_measure(duration_minutes) {
            return Err(RouteError::InvalidDuration {
                value: duration_minutes,
            });
        }
        Ok(Self::assemble(
            distance_km,
            duration_minutes,
            waypoints,
            instructions,
            source,
        ))
    }

    /// Construct without validation for routes built from invariants the
    /// crate already guarantees.
    pub(crate) const fn assemble(
        distance_km: f64,
        duration_minutes: f64,
        waypoints: Vec<Coordinate>,
        instructions: Vec<String>,
        source: RouteSource,
    ) -> Self {
        Self {
            distance_km,
            duration_minutes,
            waypoints,
            instructions,
            source,
        }
    }

    /// Total distance in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Estimated duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    /// Ordered path from origin to destination.
    #[must_use]
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    /// Plain-text driving instructions.
    #[must_use]
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Service or generator that produced the route.
    #[must_use]
    pub const fn source(&self) -> RouteSource {
        self.source
    }

    /// Distance formatted for display, e.g. `"12.3 km"`.
    ///
    /// Synthetic routes carry a `" (road route)"` suffix.
    #[must_use]
    pub fn distance_label(&self) -> String {
        let label = format!("{:.1} km", self.distance_km);
        if self.source.is_synthetic() {
            format!("{label} (road route)")
        } else {
            label
        }
    }

    /// Duration formatted for display, e.g. `"25 minutes"`.
    ///
    /// Synthetic routes carry a `" (estimated)"` suffix.
    #[must_use]
    pub fn duration_label(&self) -> String {
        let label = format!("{:.0} minutes", self.duration_minutes);
        if self.source.is_synthetic() {
            format!("{label} (estimated)")
        } else {
            label
        }
    }
}

fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
