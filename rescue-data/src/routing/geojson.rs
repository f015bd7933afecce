//! GeoJSON `LineString` geometry shared by OpenRouteService and OSRM.

use rescue_core::{Coordinate, ProviderError};
use serde::Deserialize;

/// A GeoJSON `LineString`.
///
/// Positions are `[longitude, latitude]` with an optional trailing
/// elevation.
#[derive(Debug, Deserialize)]
pub struct LineString {
    /// Ordered positions.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

impl LineString {
    /// Convert positions to validated coordinates, preserving order.
    pub fn to_waypoints(&self) -> Result<Vec<Coordinate>, ProviderError> {
        self.coordinates
            .iter()
            .map(|position| match position.as_slice() {
                [longitude, latitude, ..] => Coordinate::from_lon_lat(*longitude, *latitude)
                    .map_err(|err| ProviderError::Malformed {
                        message: format!("invalid geometry position: {err}"),
                    }),
                _ => Err(ProviderError::Malformed {
                    message: format!("geometry position has {} components", position.len()),
                }),
            })
            .collect()
    }
}
