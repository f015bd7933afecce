//! Locally computed routes used when every provider is unavailable.
//!
//! The generator needs no network access and cannot fail, so a resolution
//! with a known facility always ends with a route.

use geo::Coord;

use crate::{CanonicalRoute, Coordinate, RouteSource, haversine_km};

/// Roads are assumed to be this much longer than the great-circle line.
pub const ROAD_DISTANCE_FACTOR: f64 = 1.3;

/// Estimated driving minutes per road kilometre.
pub const MINUTES_PER_KM: f64 = 1.2;

/// Interpolated points between origin and destination.
pub const INTERMEDIATE_WAYPOINTS: u32 = 4;

/// Emergency number printed in the final instruction by default.
pub const DEFAULT_EMERGENCY_CONTACT: &str = "100";

const GUIDANCE: [&str; 4] = [
    "Start from the incident location.",
    "Follow main roads towards the response facility.",
    "Use GPS navigation for turn-by-turn directions.",
    "Contact rescue team for real-time guidance.",
];

/// Builds deterministic approximate routes.
///
/// # Examples
///
/// ```rust
/// use rescue_core::{Coordinate, RouteSource, SyntheticRouteGenerator, haversine_km};
///
/// # fn main() -> Result<(), rescue_core::CoordinateError> {
/// let origin = Coordinate::new(10.01, 10.01)?;
/// let destination = Coordinate::new(10.05, 10.05)?;
/// let route = SyntheticRouteGenerator::new().generate(origin, destination);
///
/// assert_eq!(route.source(), RouteSource::Synthetic);
/// assert_eq!(route.waypoints().len(), 6);
/// assert!((route.distance_km() - 1.3 * haversine_km(origin, destination)).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRouteGenerator {
    emergency_contact: String,
}

impl Default for SyntheticRouteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticRouteGenerator {
    /// Create a generator using [`DEFAULT_EMERGENCY_CONTACT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_emergency_contact(DEFAULT_EMERGENCY_CONTACT)
    }

    /// Create a generator that prints `contact` as the emergency number.
    #[must_use]
    pub fn with_emergency_contact(contact: impl Into<String>) -> Self {
        Self {
            emergency_contact: contact.into(),
        }
    }

    /// Emergency number used in generated instructions.
    #[must_use]
    pub fn emergency_contact(&self) -> &str {
        &self.emergency_contact
    }

    /// Produce an approximate route from `origin` to `destination`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "road distance and duration are scaled estimates"
    )]
    pub fn generate(&self, origin: Coordinate, destination: Coordinate) -> CanonicalRoute {
        let distance_km = haversine_km(origin, destination) * ROAD_DISTANCE_FACTOR;
        let duration_minutes = (distance_km * MINUTES_PER_KM).round();
        CanonicalRoute::assemble(
            distance_km,
            duration_minutes,
            interpolate(origin, destination),
            self.instructions(),
            RouteSource::Synthetic,
        )
    }

    fn instructions(&self) -> Vec<String> {
        GUIDANCE
            .iter()
            .map(|line| (*line).to_owned())
            .chain(std::iter::once(format!(
                "Emergency contact: {}",
                self.emergency_contact
            )))
            .collect()
    }
}

/// Origin, evenly spaced linear interpolations, then destination.
///
/// Interpolation is linear in latitude/longitude rather than geodesic.
#[expect(
    clippy::float_arithmetic,
    reason = "linear interpolation scales the coordinate delta"
)]
fn interpolate(origin: Coordinate, destination: Coordinate) -> Vec<Coordinate> {
    let start = Coord::from(origin);
    let delta = Coord::from(destination) - start;
    let segments = f64::from(INTERMEDIATE_WAYPOINTS + 1);

    let mut waypoints = Vec::with_capacity(INTERMEDIATE_WAYPOINTS as usize + 2);
    waypoints.push(origin);
    waypoints.extend((1..=INTERMEDIATE_WAYPOINTS).map(|step| {
        let fraction = f64::from(step) / segments;
        Coordinate::from_geo_unchecked(start + delta * fraction)
    }));
    waypoints.push(destination);
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn endpoints() -> (Coordinate, Coordinate) {
        (
            Coordinate::new(10.01, 10.01).expect("valid"),
            Coordinate::new(10.05, 10.05).expect("valid"),
        )
    }

    #[rstest]
    fn distance_applies_road_factor(endpoints: (Coordinate, Coordinate)) {
        let (origin, destination) = endpoints;
        let route = SyntheticRouteGenerator::new().generate(origin, destination);
        let expected = 1.3 * haversine_km(origin, destination);
        assert!((route.distance_km() - expected).abs() < 1e-9);
    }

    #[rstest]
    fn duration_rounds_to_whole_minutes(endpoints: (Coordinate, Coordinate)) {
        let (origin, destination) = endpoints;
        let route = SyntheticRouteGenerator::new().generate(origin, destination);
        // 8.11 km * 1.2 min/km = 9.74 min
        assert_eq!(route.duration_minutes(), 10.0);
    }

    #[rstest]
    fn waypoints_are_evenly_interpolated(endpoints: (Coordinate, Coordinate)) {
        let (origin, destination) = endpoints;
        let route = SyntheticRouteGenerator::new().generate(origin, destination);
        let waypoints = route.waypoints();

        assert_eq!(waypoints.len(), 6);
        assert_eq!(waypoints.first(), Some(&origin));
        assert_eq!(waypoints.last(), Some(&destination));
        for (step, waypoint) in waypoints.iter().enumerate().skip(1).take(4) {
            let fraction = step as f64 / 5.0;
            let expected_lat = 10.01 + 0.04 * fraction;
            assert!((waypoint.latitude() - expected_lat).abs() < 1e-12);
            assert!((waypoint.longitude() - expected_lat).abs() < 1e-12);
        }
    }

    #[rstest]
    fn instructions_end_with_emergency_contact(endpoints: (Coordinate, Coordinate)) {
        let (origin, destination) = endpoints;
        let route = SyntheticRouteGenerator::with_emergency_contact("112").generate(origin, destination);
        let instructions = route.instructions();
        assert_eq!(instructions.len(), 5);
        assert_eq!(
            instructions.last().map(String::as_str),
            Some("Emergency contact: 112")
        );
    }

    #[rstest]
    fn identical_endpoints_yield_zero_length_route() {
        let here = Coordinate::new(-33.87, 151.21).expect("valid");
        let route = SyntheticRouteGenerator::new().generate(here, here);
        assert_eq!(route.distance_km(), 0.0);
        assert_eq!(route.duration_minutes(), 0.0);
        assert!(route.waypoints().iter().all(|w| *w == here));
    }

    #[rstest]
    fn generation_is_deterministic(endpoints: (Coordinate, Coordinate)) {
        let (origin, destination) = endpoints;
        let generator = SyntheticRouteGenerator::new();
        assert_eq!(
            generator.generate(origin, destination),
            generator.generate(origin, destination)
        );
    }
}
