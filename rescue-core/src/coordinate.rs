//! Geographic coordinates and great-circle distance.
//!
//! [`Coordinate`] is the validated latitude/longitude pair used throughout the
//! crate. Conversions to [`geo::Coord`] follow the `geo` convention of
//! `x = longitude` and `y = latitude`.

use geo::Coord;
use thiserror::Error;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
///
/// # Examples
///
/// ```
/// use rescue_core::Coordinate;
///
/// # fn main() -> Result<(), rescue_core::CoordinateError> {
/// let incident = Coordinate::new(51.5074, -0.1278)?;
/// assert_eq!(incident.latitude(), 51.5074);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// A component was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude in degrees.
        latitude: f64,
    },
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude in degrees.
        longitude: f64,
    },
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange { latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange { longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Construct from the `lon,lat` order used by GeoJSON and most routing
    /// services.
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        Self::new(latitude, longitude)
    }

    /// Build from a `geo` coordinate without range checks.
    ///
    /// Callers must only pass values derived from already validated
    /// coordinates.
    pub(crate) const fn from_geo_unchecked(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        haversine_km(self, other)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Self::from_lon_lat(value.x, value.y)
    }
}

/// Haversine great-circle distance between two coordinates in kilometres.
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
///
/// ```
/// use rescue_core::{Coordinate, haversine_km};
///
/// # fn main() -> Result<(), rescue_core::CoordinateError> {
/// let london = Coordinate::new(51.5074, -0.1278)?;
/// let paris = Coordinate::new(48.8566, 2.3522)?;
/// let km = haversine_km(london, paris);
/// assert!((km - 343.6).abs() < 0.1);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is inherently floating-point"
)]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let raw = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push the term marginally past 1 for antipodal points.
    let a = raw.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
