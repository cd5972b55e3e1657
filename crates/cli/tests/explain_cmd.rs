//! CLI tests for `ttaaii explain`.

use std::process::{Command, Output};

use assert_cmd::cargo;
use ttaaii_diagnostics::codes;

fn explain(id: &str, output: &str) -> Output {
    Command::new(cargo::cargo_bin!("ttaaii"))
        .args(["explain", id, "--output", output])
        .output()
        .expect("run explain")
}

#[test]
fn every_declared_code_is_explained() {
    for code in codes::ALL {
        let out = explain(code, "json");
        assert!(out.status.success(), "{code}");
        let json: serde_json::Value =
            serde_json::from_slice(&out.stdout).expect("valid json");
        let text = json["explanation"].as_str().unwrap_or_default();
        assert!(!text.is_empty(), "{code} has no explanation");
        assert_eq!(Some(text), ttaaii_diagnostics::explain(code));
    }
}

#[test]
fn incomplete_heading_is_not_an_error() {
    let out = explain(codes::INCOMPLETE_HEADING, "pretty");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("TTA2001"), "{stdout}");
    assert!(stdout.contains("Incomplete input is not an error"), "{stdout}");
}

#[test]
fn explain_ignores_table_flags() {
    let out = Command::new(cargo::cargo_bin!("ttaaii"))
        .args(["--tables", "/nonexistent/tables.json", "explain", "TTA1003"])
        .args(["--output", "json"])
        .output()
        .expect("run explain");
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert!(
        json["explanation"]
            .as_str()
            .is_some_and(|t| t.contains("digits 0-9"))
    );
}

#[test]
fn unassigned_code_has_no_explanation() {
    let out = explain("TTA3001", "pretty");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("no explanation available"), "{stdout}");
}
