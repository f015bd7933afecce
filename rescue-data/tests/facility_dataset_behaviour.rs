//! Behavioural tests for facility dataset loading.

use std::cell::RefCell;
use std::io::Write;

use camino::Utf8PathBuf;
use rescue_core::{Coordinate, GeoIndex};
use rescue_data::{FacilityDatasetError, load_facilities};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Outcome of a load attempt.
type LoadCell = RefCell<Option<Result<GeoIndex, FacilityDatasetError>>>;

struct Workspace {
    dir: TempDir,
    path: RefCell<Option<Utf8PathBuf>>,
}

impl Workspace {
    fn write(&self, contents: &str) {
        let path = self.dir.path().join("facilities.json");
        let mut file = std::fs::File::create(&path).expect("create dataset");
        file.write_all(contents.as_bytes()).expect("write dataset");
        *self.path.borrow_mut() = Some(Utf8PathBuf::from_path_buf(path).expect("utf-8 path"));
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: tempfile::tempdir().expect("temp dir"),
        path: RefCell::new(None),
    }
}

#[fixture]
fn outcome() -> LoadCell {
    RefCell::new(None)
}

#[given("a dataset file with two stations")]
fn two_stations(#[from(workspace)] workspace: &Workspace) {
    workspace.write(
        r#"[
            {"id": 1, "name": "West Station", "latitude": 10.0, "longitude": 10.0},
            {"id": 2, "name": "East Station", "latitude": 10.05, "longitude": 10.05}
        ]"#,
    );
}

#[given("a dataset file with a latitude of 95")]
fn impossible_latitude(#[from(workspace)] workspace: &Workspace) {
    workspace.write(r#"[{"id": 7, "name": "Polar Base", "latitude": 95.0, "longitude": 0.0}]"#);
}

#[given("a dataset path that does not exist")]
fn missing_path(#[from(workspace)] workspace: &Workspace) {
    let path = workspace.dir.path().join("missing.json");
    *workspace.path.borrow_mut() = Some(Utf8PathBuf::from_path_buf(path).expect("utf-8 path"));
}

#[when("the dataset is loaded")]
fn load(#[from(workspace)] workspace: &Workspace, #[from(outcome)] outcome: &LoadCell) {
    let path = workspace.path.borrow().clone().expect("dataset path set");
    *outcome.borrow_mut() = Some(load_facilities(&path));
}

#[then("the registry holds 2 facilities")]
fn holds_two(#[from(outcome)] outcome: &LoadCell) {
    let borrow = outcome.borrow();
    let index = borrow
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .expect("expected a loaded registry");
    assert_eq!(index.len(), 2);
}

#[then("the nearest facility to 10.01,10.01 is 1")]
fn nearest_is_one(#[from(outcome)] outcome: &LoadCell) {
    let borrow = outcome.borrow();
    let index = borrow
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .expect("expected a loaded registry");
    let query = Coordinate::new(10.01, 10.01).expect("valid");
    assert_eq!(index.nearest(query).map(|facility| facility.id), Some(1));
}

#[then("loading fails with an invalid coordinate for facility 7")]
fn invalid_coordinate(#[from(outcome)] outcome: &LoadCell) {
    let borrow = outcome.borrow();
    let err = borrow
        .as_ref()
        .and_then(|result| result.as_ref().err())
        .expect("expected a load failure");
    assert!(matches!(
        err,
        FacilityDatasetError::InvalidCoordinate { index: 0, id: 7, .. }
    ));
}

#[then("loading fails with an open error")]
fn open_error(#[from(outcome)] outcome: &LoadCell) {
    let borrow = outcome.borrow();
    let err = borrow
        .as_ref()
        .and_then(|result| result.as_ref().err())
        .expect("expected a load failure");
    assert!(matches!(err, FacilityDatasetError::Open { .. }));
}

#[scenario(path = "tests/features/facility_dataset.feature", index = 0)]
fn valid_dataset(workspace: Workspace, outcome: LoadCell) {
    let _ = (workspace, outcome);
}

#[scenario(path = "tests/features/facility_dataset.feature", index = 1)]
fn invalid_latitude(workspace: Workspace, outcome: LoadCell) {
    let _ = (workspace, outcome);
}

#[scenario(path = "tests/features/facility_dataset.feature", index = 2)]
fn missing_file(workspace: Workspace, outcome: LoadCell) {
    let _ = (workspace, outcome);
}
