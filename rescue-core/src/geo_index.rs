//! Nearest-facility lookup over an immutable registry.
//!
//! [`GeoIndex`] performs a linear scan using [`haversine_km`]. The registry is
//! small and static, so the interesting property is determinism: when two
//! facilities are equally close, the one loaded first wins.

use crate::{Coordinate, ResponseFacility, haversine_km};

/// Read-only registry of response facilities answering nearest queries.
///
/// # Examples
///
/// ```rust
/// use rescue_core::{Coordinate, GeoIndex, ResponseFacility};
///
/// # fn main() -> Result<(), rescue_core::CoordinateError> {
/// let index = GeoIndex::new(vec![
///     ResponseFacility::new(1, "West", Coordinate::new(10.0, 10.0)?),
///     ResponseFacility::new(2, "East", Coordinate::new(10.05, 10.05)?),
/// ]);
///
/// let nearest = index.nearest(Coordinate::new(10.01, 10.01)?);
/// assert_eq!(nearest.map(|f| f.id), Some(1));
/// assert!(GeoIndex::default().nearest(Coordinate::new(0.0, 0.0)?).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoIndex {
    facilities: Vec<ResponseFacility>,
}

impl GeoIndex {
    /// Build an index over `facilities`, preserving their load order.
    #[must_use]
    pub const fn new(facilities: Vec<ResponseFacility>) -> Self {
        Self { facilities }
    }

    /// Return the facility closest to `point`.
    ///
    /// Returns `None` only when the registry is empty.
    #[must_use]
    pub fn nearest(&self, point: Coordinate) -> Option<&ResponseFacility> {
        self.nearest_with_distance(point).map(|(facility, _)| facility)
    }

    /// Return the closest facility together with its great-circle distance
    /// in kilometres.
    ///
    /// A facility replaces the incumbent only when strictly closer, so ties
    /// resolve to the earliest-loaded facility.
    #[must_use]
    pub fn nearest_with_distance(&self, point: Coordinate) -> Option<(&ResponseFacility, f64)> {
        let mut best: Option<(&ResponseFacility, f64)> = None;
        for facility in &self.facilities {
            let distance = haversine_km(point, facility.location);
            if distance.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, incumbent)| distance < incumbent) {
                best = Some((facility, distance));
            }
        }
        best
    }

    /// Number of facilities in the registry.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Whether the registry holds no facilities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Iterate over facilities in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ResponseFacility> {
        self.facilities.iter()
    }
}

impl FromIterator<ResponseFacility> for GeoIndex {
    fn from_iter<I: IntoIterator<Item = ResponseFacility>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn facility(id: u64, latitude: f64, longitude: f64) -> ResponseFacility {
        let location = Coordinate::new(latitude, longitude).expect("valid coordinate");
        ResponseFacility::new(id, format!("facility-{id}"), location)
    }

    fn point(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).expect("valid coordinate")
    }

    #[fixture]
    fn pair() -> GeoIndex {
        GeoIndex::new(vec![facility(1, 10.0, 10.0), facility(2, 10.05, 10.05)])
    }

    #[rstest]
    fn returns_none_for_empty_registry() {
        let index = GeoIndex::default();
        assert!(index.is_empty());
        assert!(index.nearest(point(0.0, 0.0)).is_none());
    }

    #[rstest]
    #[case(point(10.01, 10.01), 1)]
    #[case(point(10.04, 10.04), 2)]
    #[case(point(-5.0, -5.0), 1)]
    fn selects_smallest_haversine_distance(
        pair: GeoIndex,
        #[case] query: Coordinate,
        #[case] expected: u64,
    ) {
        let nearest = pair.nearest(query).expect("registry is non-empty");
        assert_eq!(nearest.id, expected);
    }

    #[rstest]
    fn reports_distance_of_selected_facility(pair: GeoIndex) {
        let query = point(10.01, 10.01);
        let (facility, distance) = pair.nearest_with_distance(query).expect("non-empty");
        assert_eq!(distance, haversine_km(query, facility.location));
    }

    #[rstest]
    fn ties_resolve_to_first_loaded() {
        let index = GeoIndex::new(vec![
            facility(10, 0.0, 1.0),
            facility(11, 0.0, -1.0),
            facility(12, 0.0, 1.0),
        ]);
        let nearest = index.nearest(point(0.0, 0.0)).expect("non-empty");
        assert_eq!(nearest.id, 10);
    }

    #[rstest]
    fn duplicate_locations_keep_first_entry() {
        let index: GeoIndex = [facility(3, 5.0, 5.0), facility(4, 5.0, 5.0)]
            .into_iter()
            .collect();
        assert_eq!(index.len(), 2);
        let nearest = index.nearest(point(5.0, 5.0)).expect("non-empty");
        assert_eq!(nearest.id, 3);
    }
}
