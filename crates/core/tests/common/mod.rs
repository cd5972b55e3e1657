//! Shared test helpers for `ttaaii_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::LazyLock;
use ttaaii_core::{CompletionResult, TableDefinition, TtaaiiContext, TtaaiiField, ValidationResult};
use ttaaii_tables::{TtaaiiTables, load_tables_from_path};

/// Tables loaded once per test binary from the bundled data file.
pub static TABLES: LazyLock<TtaaiiTables> = LazyLock::new(|| {
    let path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../tables/data/tables.en.json");
    load_tables_from_path(&path).unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()))
});

/// Context from a literal prefix.
#[allow(dead_code)]
pub fn ctx(prefix: &str) -> TtaaiiContext {
    ttaaii_core::parse_context(prefix)
}

/// Resolve `field` for the context given by `prefix`.
#[allow(dead_code)]
pub fn table(field: TtaaiiField, prefix: &str) -> Option<TableDefinition> {
    ttaaii_core::table_for_field(&TABLES, field, &ctx(prefix))
}

/// Id of the table governing `field` after `prefix`.
#[allow(dead_code)]
pub fn table_id(field: TtaaiiField, prefix: &str) -> Option<String> {
    table(field, prefix).map(|t| t.id)
}

/// Entry codes of a table, in order.
#[allow(dead_code)]
pub fn codes(table: &TableDefinition) -> Vec<&str> {
    table.entries.iter().map(|e| e.code.as_str()).collect()
}

/// Item codes of a completion result, in order.
#[allow(dead_code)]
pub fn item_codes(result: &CompletionResult) -> Vec<&str> {
    result.items.iter().map(|i| i.code.as_str()).collect()
}

/// Diagnostic ids of a validation result, in order.
#[allow(dead_code)]
pub fn error_ids(result: &ValidationResult) -> Vec<&'static str> {
    result.errors.iter().map(|e| e.id).collect()
}
