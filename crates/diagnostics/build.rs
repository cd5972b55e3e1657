//! Build script for generating diagnostic code data structures at compile time.
//!
//! This script reads `spec/diagnostics.json` and generates Rust files:
//! - `generated_codes.rs`: public constants mapping diagnostic constant names to their IDs
//! - `generated_explain.rs`: a match expression mapping diagnostic IDs to their descriptions
//! - `generated_severity.rs`: code → default severity lookup
//! - `generated_templates.rs`: (code, variant) → message template lookup

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let spec_path = Path::new("spec/diagnostics.json");
    println!("cargo:rerun-if-changed={}", spec_path.display());

    let raw = fs::read_to_string(spec_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", spec_path.display()));

    let spec: serde_json::Value =
        serde_json::from_str(&raw).expect("failed to parse diagnostics.json");

    let diagnostics = spec["diagnostics"]
        .as_array()
        .expect("diagnostics.json: expected `diagnostics` array");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = Path::new(&out_dir);

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    // ── generated_codes.rs ──────────────────────────────────────────────
    let mut codes = String::from("// Auto-generated from spec/diagnostics.json. DO NOT EDIT.\n\n");

    for (i, entry) in diagnostics.iter().enumerate() {
        let id = entry["id"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] missing `id`"));
        let const_name = entry["constName"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `constName`"));
        let summary = entry["summary"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `summary`"));

        assert!(
            id.len() == 7
                && id.starts_with("TTA")
                && id[3..].bytes().all(|b| b.is_ascii_digit()),
            "diagnostics[{i}]: id '{id}' must look like TTA0000"
        );
        assert!(
            !const_name.is_empty()
                && const_name
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
                && const_name.as_bytes()[0].is_ascii_uppercase(),
            "diagnostics[{i}] (id={id}): constName '{const_name}' is not a valid SCREAMING_SNAKE_CASE identifier"
        );
        assert!(
            seen_ids.insert(id.to_string()),
            "diagnostics[{i}]: duplicate id '{id}'"
        );
        assert!(
            seen_names.insert(const_name.to_string()),
            "diagnostics[{i}] (id={id}): duplicate constName '{const_name}'"
        );

        codes.push_str(&format!("/// {summary}\n"));
        codes.push_str(&format!("pub const {const_name}: &str = \"{id}\";\n\n"));
    }

    codes.push_str("/// Every diagnostic code, in declaration order.\n");
    codes.push_str("pub const ALL: &[&str] = &[\n");
    for entry in diagnostics {
        let name = entry["constName"].as_str().unwrap_or_default();
        codes.push_str(&format!("    {name},\n"));
    }
    codes.push_str("];\n");

    fs::write(out_path.join("generated_codes.rs"), &codes)
        .expect("failed to write generated_codes.rs");

    // ── generated_explain.rs ────────────────────────────────────────────
    let mut explain = String::from("match id {\n");
    for (i, entry) in diagnostics.iter().enumerate() {
        let id = entry["id"].as_str().unwrap_or_default();
        let description = entry["description"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `description`"));
        let escaped = escape_rust_string_literal(description);
        explain.push_str(&format!("    \"{id}\" => Some(\"{escaped}\"),\n"));
    }
    explain.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_explain.rs"), &explain)
        .expect("failed to write generated_explain.rs");

    // ── generated_severity.rs ───────────────────────────────────────────
    let mut severity = String::from("match id {\n");
    for (i, entry) in diagnostics.iter().enumerate() {
        let id = entry["id"].as_str().unwrap_or_default();
        let sev = entry["severity"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `severity`"));
        let sev_rs = match sev {
            "error" => "Severity::Error",
            "info" => "Severity::Info",
            other => panic!("diagnostics[{i}] (id={id}): invalid severity '{other}'"),
        };
        severity.push_str(&format!("    \"{id}\" => Some({sev_rs}),\n"));
    }
    severity.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_severity.rs"), &severity)
        .expect("failed to write generated_severity.rs");

    // ── generated_templates.rs ──────────────────────────────────────────
    let mut templates = String::from("match (id, variant) {\n");
    for (i, entry) in diagnostics.iter().enumerate() {
        let id = entry["id"].as_str().unwrap_or_default();
        let context_keys: HashSet<String> = entry["contextKeys"]
            .as_array()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `contextKeys`"))
            .iter()
            .map(|k| {
                k.as_str().unwrap_or_else(|| {
                    panic!("diagnostics[{i}] (id={id}) contextKeys entries must be strings")
                })
            })
            .map(str::to_string)
            .collect();
        if let Some(map) = entry["messageTemplates"].as_object() {
            for (variant, template) in map {
                let template = template.as_str().unwrap_or_else(|| {
                    panic!("diagnostics[{i}] (id={id}) messageTemplates.{variant} must be a string")
                });
                for placeholder in extract_template_placeholders(template) {
                    assert!(
                        context_keys.contains(&placeholder),
                        "diagnostics[{i}] (id={id}) messageTemplates.{variant} references placeholder '{{{placeholder}}}' not listed in contextKeys"
                    );
                }
                let escaped = escape_rust_string_literal(template);
                templates.push_str(&format!(
                    "    (\"{id}\", \"{variant}\") => Some(\"{escaped}\"),\n"
                ));
            }
        }
    }
    templates.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_templates.rs"), &templates)
        .expect("failed to write generated_templates.rs");
}

fn escape_rust_string_literal(value: &str) -> String {
    value.chars().flat_map(char::escape_default).collect()
}

fn extract_template_placeholders(template: &str) -> HashSet<String> {
    let mut placeholders = HashSet::new();
    let mut scan_from = 0usize;
    while let Some(open_rel) = template[scan_from..].find('{') {
        let open = scan_from + open_rel;
        let after_open = open + 1;
        match template[after_open..].find('}') {
            Some(close_rel) => {
                let close = after_open + close_rel;
                let key = template[after_open..close].trim();
                if !key.is_empty() {
                    placeholders.insert(key.to_string());
                }
                scan_from = close + 1;
            }
            None => break,
        }
    }
    placeholders
}
