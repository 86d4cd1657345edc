//! Integration tests for the saga-runner binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEST_TOOL: &str = "\
Test
grid_tools
ParameterRaster|GRID|Grid|False
ParameterBoolean|NORM|Normalise|False
OutputRaster|RESULT|Result
";

fn write_description(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tool.txt");
    std::fs::write(&path, TEST_TOOL).unwrap();
    path
}

#[test]
fn test_analyze_prints_identity_and_slots() {
    let dir = TempDir::new().unwrap();
    let description = write_description(&dir);

    Command::cargo_bin("saga-runner")
        .unwrap()
        .arg("analyze")
        .arg(&description)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test (saga:test)"))
        .stdout(predicate::str::contains("grid_tools \"Test\""))
        .stdout(predicate::str::contains("-GRID <raster>"))
        .stdout(predicate::str::contains("-RESULT <Raster>"));
}

#[test]
fn test_analyze_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let description = write_description(&dir);

    let output = Command::cargo_bin("saga-runner")
        .unwrap()
        .args(["analyze", "--json"])
        .arg(&description)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["command_line_name"], "saga:test");
    assert_eq!(parsed["group"], "grid_tools");
}

#[test]
fn test_dry_run_prints_export_then_main_command() {
    let dir = TempDir::new().unwrap();
    let description = write_description(&dir);

    Command::cargo_bin("saga-runner")
        .unwrap()
        .args(["run", "--dry-run", "-p", "GRID=/data/dem.tif", "-p", "NORM=true"])
        .arg(&description)
        .assert()
        .success()
        .stdout(predicate::str::contains("io_gdal 0 -TRANSFORM 1"))
        .stdout(predicate::str::contains("grid_tools \"Test\""))
        .stdout(predicate::str::contains("-NORM true"));
}

#[test]
fn test_unknown_parameter_is_refused() {
    let dir = TempDir::new().unwrap();
    let description = write_description(&dir);

    Command::cargo_bin("saga-runner")
        .unwrap()
        .args(["run", "--dry-run", "-p", "NOPE=1"])
        .arg(&description)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no parameter named NOPE"));
}

#[test]
fn test_missing_description_file_is_a_parse_error() {
    Command::cargo_bin("saga-runner")
        .unwrap()
        .args(["analyze", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
