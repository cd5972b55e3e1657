//! Table-set loading with structural validation.

use crate::{KeyedTable, RangeTable, TableDefinition, TableEntry, TtaaiiTables};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading, validating or extending a table-set.
#[derive(Debug, Error)]
pub enum TablesError {
    /// JSON deserialization failed.
    #[error("invalid table-set JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The table-set file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A table violates a structural rule.
    #[error("invalid table {table}: {reason}")]
    InvalidTable {
        /// Table id (keyed sub-tables as `B1:F`).
        table: String,
        /// A human-readable explanation of the violation.
        reason: String,
    },

    /// A regional extension names a table that does not exist.
    #[error("unknown table id: {0}")]
    UnknownTable(String),

    /// A code appears twice within one table.
    #[error("duplicate code {code:?} in table {table}")]
    DuplicateCode {
        /// Table id.
        table: String,
        /// The repeated code.
        code: String,
    },
}

/// Expected shape of the codes in one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeShape {
    Letter,
    TwoLetters,
    TwoDigits,
}

impl CodeShape {
    fn accepts(self, code: &str) -> bool {
        let b = code.as_bytes();
        match self {
            CodeShape::Letter => b.len() == 1 && b[0].is_ascii_alphanumeric(),
            CodeShape::TwoLetters => b.len() == 2 && b.iter().all(u8::is_ascii_alphanumeric),
            CodeShape::TwoDigits => b.len() == 2 && b.iter().all(u8::is_ascii_digit),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            CodeShape::Letter => "a single uppercase character",
            CodeShape::TwoLetters => "two uppercase characters",
            CodeShape::TwoDigits => "two digits",
        }
    }
}

/// Load and validate a [`TtaaiiTables`] from a JSON string.
///
/// Performs structural validation after deserialization:
/// - every code is 1–2 uppercase ASCII alphanumerics; C1 codes have two
///   characters, D1/D2 codes two digits, every other table one character
/// - codes are unique within each flat table and each keyed sub-table
/// - keyed-table keys are one letter (B1, C7) or two letters (C6)
/// - D3 ranges satisfy `start <= end <= 99` and do not overlap
/// - declared group codes refer to existing entries
pub fn load_tables_from_str(s: &str) -> Result<TtaaiiTables, TablesError> {
    let tables: TtaaiiTables = serde_json::from_str(s)?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Read and validate a table-set file.
pub fn load_tables_from_path(path: &Path) -> Result<TtaaiiTables, TablesError> {
    let text = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_tables_from_str(&text)
}

pub(crate) fn validate_tables(t: &TtaaiiTables) -> Result<(), TablesError> {
    if t.locale.trim().is_empty() {
        return Err(TablesError::InvalidTable {
            table: "locale".into(),
            reason: "must not be empty".into(),
        });
    }

    // -- Flat tables --
    for table in [
        &t.table_a,
        &t.table_b2,
        &t.table_b3,
        &t.table_b4,
        &t.table_b5,
        &t.table_b6,
        &t.table_b7,
        &t.table_c3,
        &t.table_c4,
        &t.table_c5,
        &t.table_c7.t2,
    ] {
        check_definition(table, CodeShape::Letter)?;
    }
    check_definition(&t.table_c1, CodeShape::TwoLetters)?;
    check_definition(&t.table_d1, CodeShape::TwoDigits)?;
    check_definition(&t.table_d2, CodeShape::TwoDigits)?;

    // -- Station table --
    check_entries(
        &format!("{}:stationTypes", t.table_c2.id),
        &t.table_c2.station_types,
        CodeShape::Letter,
    )?;
    check_entries(
        &format!("{}:areas", t.table_c2.id),
        &t.table_c2.areas,
        CodeShape::Letter,
    )?;

    // -- Keyed tables --
    check_keyed(&t.table_b1, 1)?;
    check_keyed(&t.table_c6, 2)?;
    check_keyed(&t.table_c7.a1, 1)?;

    // -- Ranges --
    check_ranges(&t.table_d3_fa)?;
    check_ranges(&t.table_d3_ua)?;

    Ok(())
}

fn check_definition(table: &TableDefinition, shape: CodeShape) -> Result<(), TablesError> {
    check_entries(&table.id, &table.entries, shape)?;
    for group in table.groups.iter().flatten() {
        if let Some(missing) = group.codes.iter().find(|c| !table.contains(c)) {
            return Err(TablesError::InvalidTable {
                table: table.id.clone(),
                reason: format!("group {} lists unknown code {missing:?}", group.key),
            });
        }
    }
    Ok(())
}

pub(crate) fn check_entries(
    table: &str,
    entries: &[TableEntry],
    shape: CodeShape,
) -> Result<(), TablesError> {
    let mut seen = BTreeSet::new();
    for entry in entries {
        if entry.code.bytes().any(|b| b.is_ascii_lowercase()) || !shape.accepts(&entry.code) {
            return Err(TablesError::InvalidTable {
                table: table.to_string(),
                reason: format!("code {:?} must be {}", entry.code, shape.describe()),
            });
        }
        if !seen.insert(entry.code.as_str()) {
            return Err(TablesError::DuplicateCode {
                table: table.to_string(),
                code: entry.code.clone(),
            });
        }
    }
    Ok(())
}

fn check_keyed(table: &KeyedTable, key_len: usize) -> Result<(), TablesError> {
    for (key, entries) in &table.by_key {
        if key.len() != key_len || !key.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(TablesError::InvalidTable {
                table: table.id.clone(),
                reason: format!("key {key:?} must be {key_len} uppercase letter(s)"),
            });
        }
        check_entries(&format!("{}:{key}", table.id), entries, CodeShape::Letter)?;
    }
    if let Some(default) = &table.default {
        check_entries(&format!("{}:default", table.id), default, CodeShape::Letter)?;
    }
    Ok(())
}

fn check_ranges(table: &RangeTable) -> Result<(), TablesError> {
    let mut previous_end: Option<u8> = None;
    for r in &table.ranges {
        if r.start > r.end || r.end > 99 {
            return Err(TablesError::InvalidTable {
                table: table.id.clone(),
                reason: format!("range {}..={} must satisfy start <= end <= 99", r.start, r.end),
            });
        }
        if let Some(end) = previous_end
            && r.start <= end
        {
            return Err(TablesError::InvalidTable {
                table: table.id.clone(),
                reason: format!("range starting at {} overlaps the previous range", r.start),
            });
        }
        previous_end = Some(r.end);
    }
    Ok(())
}

pub(crate) fn shape_for_flat(id: &str) -> CodeShape {
    match id {
        "C1" => CodeShape::TwoLetters,
        "D1" | "D2" => CodeShape::TwoDigits,
        _ => CodeShape::Letter,
    }
}
