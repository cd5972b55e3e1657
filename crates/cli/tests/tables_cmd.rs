//! CLI tests for table-set selection: `check-tables`, `--tables` and
//! `--regional`, including JSON error envelopes.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;
use ttaaii_tables::BUNDLED_TABLES_JSON;

fn ttaaii_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ttaaii"))
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

fn assert_error_envelope(output: &std::process::Output, needle: &str) {
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json envelope");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains(needle)),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn check_tables_accepts_bundled_copy() {
    let (_dir, path) = write_temp("tables.json", BUNDLED_TABLES_JSON);
    let output = ttaaii_cmd()
        .args(["check-tables", &path, "--output", "json"])
        .output()
        .expect("run check-tables");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["ok"], true);
    assert_eq!(json["locale"], "en");
}

#[test]
fn check_tables_rejects_duplicate_codes() {
    let mut tables: serde_json::Value =
        serde_json::from_str(BUNDLED_TABLES_JSON).expect("bundled json");
    let entries = tables["tableA"]["entries"]
        .as_array_mut()
        .expect("table A entries");
    let first = entries[0].clone();
    entries.push(first);
    let (_dir, path) = write_temp("dup.json", &tables.to_string());

    let output = ttaaii_cmd()
        .args(["check-tables", &path, "--output", "json"])
        .output()
        .expect("run check-tables");
    assert_error_envelope(&output, "tables file");
}

#[test]
fn missing_tables_path_emits_json_error_envelope() {
    let output = ttaaii_cmd()
        .args(["--tables", "no-such-tables.json", "complete", "S", "--output", "json"])
        .output()
        .expect("run complete");
    assert_error_envelope(&output, "tables file");
}

#[test]
fn missing_regional_file_emits_json_error_envelope() {
    let output = ttaaii_cmd()
        .args(["--regional", "no-such-region.json", "decode", "SA", "--output", "json"])
        .output()
        .expect("run decode");
    assert_error_envelope(&output, "regional file");
}

#[test]
fn regional_extension_is_applied() {
    let regional = r#"{
        "id": "test",
        "name": "Test region",
        "extensions": [
            { "tableId": "B1:N", "entries": [{ "code": "Z", "label": "Regional notice" }] }
        ]
    }"#;
    let (_dir, path) = write_temp("region.json", regional);

    let output = ttaaii_cmd()
        .args(["--regional", &path, "decode", "NZ", "--output", "json"])
        .output()
        .expect("run decode");
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["dataSubtype"]["label"], "Regional notice");
}

#[test]
fn conflicting_regional_code_is_rejected() {
    let regional = r#"{
        "id": "dup",
        "name": "Duplicate",
        "extensions": [
            { "tableId": "A", "entries": [{ "code": "S", "label": "Again" }] }
        ]
    }"#;
    let (_dir, path) = write_temp("region.json", regional);

    let output = ttaaii_cmd()
        .args(["--regional", &path, "complete", "", "--output", "json"])
        .output()
        .expect("run complete");
    assert_error_envelope(&output, "regional config");
}
