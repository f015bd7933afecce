use std::collections::BTreeMap;

use crate::Coordinate;

/// Free-form facility attributes such as a phone number or street address.
pub type Metadata = BTreeMap<String, String>;

/// An emergency-response facility that incidents can be routed to.
///
/// Facilities are loaded once at start-up and shared read-only for the
/// lifetime of the process.
///
/// # Examples
/// ```
/// use rescue_core::{Coordinate, ResponseFacility};
///
/// # fn main() -> Result<(), rescue_core::CoordinateError> {
/// let station = ResponseFacility::new(7, "North Station", Coordinate::new(10.0, 10.0)?)
///     .with_capacity(40)
///     .with_metadata("phone", "100");
///
/// assert_eq!(station.capacity, Some(40));
/// assert_eq!(station.metadata.get("phone"), Some(&"100".to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResponseFacility {
    /// Unique identifier within the loaded dataset.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Position of the facility.
    pub location: Coordinate,
    /// Optional head-count or bed capacity.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub capacity: Option<u32>,
    /// Additional attributes carried through from the dataset.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub metadata: Metadata,
}

impl ResponseFacility {
    /// Construct a facility without capacity or metadata.
    pub fn new(id: u64, name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            capacity: None,
            metadata: Metadata::new(),
        }
    }

    /// Attach a capacity figure.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Attach a single metadata entry, replacing any previous value for `key`.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
