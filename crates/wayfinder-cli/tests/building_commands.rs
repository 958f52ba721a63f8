use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/tech_innovation_center.json")
        .canonicalize()
        .expect("fixture building present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfinder");
    cmd.env_remove("WAYFINDER_BUILDING").env("RUST_LOG", "error");
    cmd
}

/// Copy of the fixture whose first path node links to a node that does not exist.
fn write_broken_building(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("broken.json");
    let contents = fs::read_to_string(fixture_path())
        .expect("read fixture")
        .replacen("\"connections\": [", "\"connections\": [\"node-1-99\", ", 1);
    fs::write(&path, contents).expect("write broken building");
    path
}

#[test]
fn locations_are_grouped_by_floor() {
    let mut cmd = cli();
    cmd.arg("--building").arg(fixture_path()).arg("locations");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Tech Innovation Center\n"))
        .stdout(predicate::str::contains("Floor 1: Ground Floor"))
        .stdout(predicate::str::contains("Floor 3: Third Floor"))
        .stdout(predicate::str::contains("tech-lab"));
}

#[test]
fn locations_search_filters_by_type() {
    let mut cmd = cli();
    cmd.arg("--building")
        .arg(fixture_path())
        .arg("--format")
        .arg("basic")
        .arg("locations")
        .arg("--search")
        .arg("elevator");

    cmd.assert()
        .success()
        .stdout("elevator-1\nelevator-2\nelevator-3\n");
}

#[test]
fn building_path_from_environment() {
    let mut cmd = cli();
    cmd.env("WAYFINDER_BUILDING", fixture_path())
        .arg("--format")
        .arg("basic")
        .arg("locations")
        .arg("--search")
        .arg("board");

    cmd.assert().success().stdout("boardroom\n");
}

#[test]
fn building_directory_resolves_building_json() {
    let dir = tempdir().expect("temp dir");
    fs::copy(fixture_path(), dir.path().join("building.json")).expect("copy fixture");

    let mut cmd = cli();
    cmd.arg("--building").arg(dir.path()).arg("fingerprint");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}  Tech Innovation Center\n$").expect("regex"));
}

#[test]
fn missing_building_is_reported() {
    let dir = tempdir().expect("temp dir");
    let mut cmd = cli();
    cmd.arg("--building")
        .arg(dir.path().join("absent.json"))
        .arg("locations");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load building"))
        .stderr(predicate::str::contains("building description not found"));
}

#[test]
fn validate_reports_warnings_but_succeeds() {
    let mut cmd = cli();
    cmd.arg("--building").arg(fixture_path()).arg("validate");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "warning: node node-3-4 transitions to node-2-4 but node-2-4 does not transition back",
        ))
        .stdout(predicate::str::contains("0 error(s), 2 warning(s)"));
}

#[test]
fn validate_fails_on_errors() {
    let dir = tempdir().expect("temp dir");
    let path = write_broken_building(&dir);

    let mut cmd = cli();
    cmd.arg("--building").arg(&path).arg("validate");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains(
            "error: node node-1-1 connects to unknown node node-1-99",
        ))
        .stderr(predicate::str::contains("failed validation with 1 error(s)"));
}

#[test]
fn strict_route_refuses_broken_building() {
    let dir = tempdir().expect("temp dir");
    let path = write_broken_building(&dir);

    let mut lenient = cli();
    lenient
        .arg("--building")
        .arg(&path)
        .arg("route")
        .arg("--to")
        .arg("Board Room");
    lenient.assert().success();

    let mut strict = cli();
    strict
        .arg("--building")
        .arg(&path)
        .arg("route")
        .arg("--to")
        .arg("Board Room")
        .arg("--strict");
    strict
        .assert()
        .failure()
        .stderr(predicate::str::contains("building failed validation"));
}

#[test]
fn fingerprint_json_names_the_building() {
    let mut cmd = cli();
    cmd.arg("--building")
        .arg(fixture_path())
        .arg("--format")
        .arg("json")
        .arg("fingerprint");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["building"], "Tech Innovation Center");
    assert_eq!(value["fingerprint"].as_str().map(str::len), Some(64));
}
