//! CLI tests for `complete`, `decode` and `suggest`.

use std::process::Command;

use assert_cmd::cargo;

fn ttaaii_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ttaaii"))
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = ttaaii_cmd()
        .args(args)
        .args(["--output", "json"])
        .output()
        .expect("run command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn complete_empty_lists_table_a() {
    let json = run_json(&["complete"]);
    assert_eq!(json["position"], 0);
    assert_eq!(json["field"], "T1");
    assert_eq!(json["tableId"], "A");
    assert_eq!(json["isComplete"], false);
    assert!(json["items"].as_array().is_some_and(|a| a.len() > 20));
}

#[test]
fn complete_normalizes_case() {
    let json = run_json(&["complete", "sa"]);
    assert_eq!(json["input"], "SA");
    assert_eq!(json["field"], "A1");
    assert_eq!(json["tableId"], "C1/C2");
    assert_eq!(json["context"]["T1"], "S");
}

#[test]
fn complete_groups_by_continent() {
    let json = run_json(&["complete", "FCF", "--group-by", "continent"]);
    let groups = json["groups"].as_array().expect("groups present");
    assert!(groups.iter().any(|g| g["key"] == "EU" && g["label"] == "Europe"));
}

#[test]
fn complete_groups_by_table() {
    let json = run_json(&["complete", "DA", "--group-by", "table"]);
    let keys: Vec<_> = json["groups"]
        .as_array()
        .expect("groups present")
        .iter()
        .map(|g| g["key"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(keys, ["NH", "TR", "SH", "GL"]);
}

#[test]
fn complete_full_heading_is_complete() {
    let json = run_json(&["complete", "ACFR01"]);
    assert_eq!(json["isComplete"], true);
    assert_eq!(json["position"], 6);
}

#[test]
fn decode_reports_each_field() {
    let json = run_json(&["decode", "ACFR01"]);
    assert_eq!(json["dataType"]["label"], "Analyses");
    assert_eq!(json["dataSubtype"]["codeForm"], "[TEXT]");
    assert_eq!(json["areaOrType1"]["code"], "FR");
    assert_eq!(json["level"]["code"], "01");
    assert!(json.get("areaOrTime2").is_none());
}

#[test]
fn decode_pretty_prints_labels() {
    let output = ttaaii_cmd()
        .args(["decode", "SMVA01", "--output", "pretty"])
        .output()
        .expect("run decode");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Mobile ships"), "unexpected output: {stdout}");
}

#[test]
fn suggest_uses_explicit_context() {
    let json = run_json(&["suggest", "A2", "--t1", "S", "--t2", "A", "--a1", "W"]);
    assert_eq!(json["tableId"], "C2");
    let items = json["items"].as_array().expect("items");
    assert!(items.iter().any(|i| i["code"] == "S"));
}

#[test]
fn suggest_lowercase_context_and_field() {
    let json = run_json(&["suggest", "ii", "--t1", "f", "--t2", "a"]);
    assert_eq!(json["tableId"], "D3_FA");
}

#[test]
fn suggest_without_table_is_empty() {
    let json = run_json(&["suggest", "T2", "--t1", "B"]);
    assert!(json.get("tableId").is_none());
    assert_eq!(json["items"].as_array().map(Vec::len), Some(0));
}

#[test]
fn suggest_rejects_unknown_field() {
    let output = ttaaii_cmd()
        .args(["suggest", "T3"])
        .output()
        .expect("run suggest");
    assert!(!output.status.success());
}
