//! Facility dataset loading.
//!
//! The dataset is a JSON array of records:
//!
//! ```json
//! [
//!   {"id": 1, "name": "Central Fire Station", "latitude": 10.0, "longitude": 10.0,
//!    "capacity": 40, "metadata": {"phone": "101"}}
//! ]
//! ```
//!
//! Records are validated and returned in file order, which is the order
//! [`GeoIndex`] uses to break distance ties.

use std::collections::HashSet;
use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::info;
use rescue_core::{Coordinate, CoordinateError, GeoIndex, Metadata, ResponseFacility};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a facility dataset.
#[derive(Debug, Error)]
pub enum FacilityDatasetError {
    /// The dataset file could not be opened or read.
    #[error("failed to read facility dataset {path}: {source}")]
    Open {
        /// Path to the dataset.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The dataset was not a JSON array of facility records.
    #[error("failed to parse facility dataset {path}: {source}")]
    Parse {
        /// Path to the dataset.
        path: Utf8PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record carried an out-of-range or non-finite position.
    #[error("facility {id} (record {index}) has an invalid location: {source}")]
    InvalidCoordinate {
        /// Zero-based position of the record in the file.
        index: usize,
        /// Identifier of the offending facility.
        id: u64,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
    /// Two records shared an identifier.
    #[error("facility id {id} appears more than once")]
    DuplicateId {
        /// Repeated identifier.
        id: u64,
    },
}

#[derive(Debug, Deserialize)]
struct FacilityRecord {
    id: u64,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    metadata: Metadata,
}

/// Load a facility dataset from `path` into a [`GeoIndex`].
///
/// # Errors
///
/// Returns [`FacilityDatasetError`] when the file cannot be read or parsed,
/// or when a record fails validation.
pub fn load_facilities(path: &Utf8Path) -> Result<GeoIndex, FacilityDatasetError> {
    let open_error = |source| FacilityDatasetError::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(open_error)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(open_error)?;

    let records: Vec<FacilityRecord> =
        serde_json::from_str(&contents).map_err(|source| FacilityDatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let facilities = validate(records)?;
    info!("loaded {} facilities from {path}", facilities.len());
    Ok(GeoIndex::new(facilities))
}

/// Parse a facility dataset held in memory.
///
/// # Errors
///
/// Returns [`FacilityDatasetError`] when the JSON is invalid or a record
/// fails validation. `Parse` errors report an empty path.
pub fn parse_facilities(json: &str) -> Result<Vec<ResponseFacility>, FacilityDatasetError> {
    let records: Vec<FacilityRecord> =
        serde_json::from_str(json).map_err(|source| FacilityDatasetError::Parse {
            path: Utf8PathBuf::new(),
            source,
        })?;
    validate(records)
}

fn validate(records: Vec<FacilityRecord>) -> Result<Vec<ResponseFacility>, FacilityDatasetError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if !seen.insert(record.id) {
                return Err(FacilityDatasetError::DuplicateId { id: record.id });
            }
            let location = Coordinate::new(record.latitude, record.longitude).map_err(|source| {
                FacilityDatasetError::InvalidCoordinate {
                    index,
                    id: record.id,
                    source,
                }
            })?;
            Ok(ResponseFacility {
                id: record.id,
                name: record.name,
                location,
                capacity: record.capacity,
                metadata: record.metadata,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const DATASET: &str = r#"[
        {"id": 1, "name": "West Station", "latitude": 10.0, "longitude": 10.0},
        {"id": 2, "name": "East Station", "latitude": 10.05, "longitude": 10.05,
         "capacity": 12, "metadata": {"phone": "101", "address": "1 Harbour Rd"}}
    ]"#;

    #[rstest]
    fn parses_records_in_file_order() {
        let facilities = parse_facilities(DATASET).expect("should parse");

        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].id, 1);
        assert!(facilities[0].capacity.is_none());
        assert_eq!(facilities[1].capacity, Some(12));
        assert_eq!(
            facilities[1].metadata.get("address").map(String::as_str),
            Some("1 Harbour Rd")
        );
    }

    #[rstest]
    fn empty_array_is_an_empty_registry() {
        assert!(parse_facilities("[]").expect("should parse").is_empty());
    }

    #[rstest]
    fn rejects_invalid_location() {
        let err = parse_facilities(
            r#"[{"id": 1, "name": "ok", "latitude": 0.0, "longitude": 0.0},
                {"id": 7, "name": "bad", "latitude": 95.0, "longitude": 0.0}]"#,
        )
        .expect_err("should reject");

        match err {
            FacilityDatasetError::InvalidCoordinate { index, id, .. } => {
                assert_eq!(index, 1);
                assert_eq!(id, 7);
            }
            other => panic!("expected InvalidCoordinate, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_duplicate_ids() {
        let err = parse_facilities(
            r#"[{"id": 3, "name": "a", "latitude": 0.0, "longitude": 0.0},
                {"id": 3, "name": "b", "latitude": 1.0, "longitude": 1.0}]"#,
        )
        .expect_err("should reject");
        assert!(matches!(err, FacilityDatasetError::DuplicateId { id: 3 }));
    }

    #[rstest]
    #[case(r#"{"id": 1}"#)]
    #[case(r#"[{"id": 1, "name": "missing coordinates"}]"#)]
    fn rejects_wrong_shape(#[case] json: &str) {
        let err = parse_facilities(json).expect_err("should reject");
        assert!(matches!(err, FacilityDatasetError::Parse { .. }));
    }

    #[rstest]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(DATASET.as_bytes()).expect("write dataset");
        let path = Utf8Path::from_path(file.path()).expect("utf-8 temp path");

        let index = load_facilities(path).expect("should load");

        assert_eq!(index.len(), 2);
    }

    #[rstest]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).expect("utf-8");

        let err = load_facilities(&path).expect_err("should fail");

        assert!(matches!(err, FacilityDatasetError::Open { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
