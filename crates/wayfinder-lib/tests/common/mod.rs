#![allow(dead_code)]

use std::path::PathBuf;

use wayfinder_lib::{load_building, BuildingData, Location, LocationType, Position};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/tech_innovation_center.json")
}

pub fn fixture_building() -> BuildingData {
    load_building(&fixture_path()).expect("fixture building loads")
}

pub fn location(building: &BuildingData, id: &str) -> Location {
    building
        .location_by_id(id)
        .unwrap_or_else(|| panic!("fixture location {id} present"))
        .clone()
}

/// Ad-hoc location used to probe the resolver at arbitrary coordinates.
pub fn point(floor: i32, x: f64, y: f64) -> Location {
    Location {
        id: format!("probe-{floor}-{x}-{y}"),
        name: "Probe".to_string(),
        location_type: LocationType::Room,
        floor,
        position: Position::new(x, y),
        description: None,
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
