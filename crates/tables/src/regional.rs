//! Regional extensions layered on top of a loaded table-set.

use crate::load::{TablesError, check_entries, shape_for_flat, validate_tables};
use crate::{TableEntry, TtaaiiTables};
use serde::{Deserialize, Serialize};

/// Entries a region adds to one table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableExtension {
    /// Flat table id (`A`, `B2`, `C1`, `C7_T2`…) or keyed sub-table (`B1:F`, `C6:IS`, `C7:S`).
    pub table_id: String,
    /// Entries appended to the table.
    pub entries: Vec<TableEntry>,
}

/// A named set of regional table extensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionalConfig {
    /// Region identifier.
    pub id: String,
    /// Region name.
    pub name: String,
    /// Extensions applied in order.
    pub extensions: Vec<TableExtension>,
}

impl RegionalConfig {
    /// Parse a regional configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self, TablesError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl TtaaiiTables {
    /// Return a copy of this table-set with `regional` applied.
    ///
    /// The receiver is left untouched. A keyed sub-table that does not exist
    /// yet is created. Codes already present in the target table are rejected.
    pub fn with_regional(&self, regional: &RegionalConfig) -> Result<TtaaiiTables, TablesError> {
        let mut out = self.clone();
        for ext in &regional.extensions {
            out.apply_extension(ext)?;
        }
        validate_tables(&out)?;
        Ok(out)
    }

    fn apply_extension(&mut self, ext: &TableExtension) -> Result<(), TablesError> {
        if let Some((prefix, key)) = ext.table_id.split_once(':') {
            let keyed = self
                .keyed_table_mut(prefix)
                .ok_or_else(|| TablesError::UnknownTable(ext.table_id.clone()))?;
            let entries = keyed.by_key.entry(key.to_string()).or_default();
            append(&ext.table_id, entries, &ext.entries)?;
            check_entries(&ext.table_id, entries, shape_for_flat(prefix))
        } else {
            let table = self
                .flat_table_mut(&ext.table_id)
                .ok_or_else(|| TablesError::UnknownTable(ext.table_id.clone()))?;
            append(&ext.table_id, &mut table.entries, &ext.entries)?;
            check_entries(&ext.table_id, &table.entries, shape_for_flat(&ext.table_id))
        }
    }
}

fn append(
    table_id: &str,
    target: &mut Vec<TableEntry>,
    entries: &[TableEntry],
) -> Result<(), TablesError> {
    for entry in entries {
        if target.iter().any(|e| e.code == entry.code) {
            return Err(TablesError::DuplicateCode {
                table: table_id.to_string(),
                code: entry.code.clone(),
            });
        }
        target.push(entry.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(exts: &[(&str, &[(&str, &str)])]) -> RegionalConfig {
        RegionalConfig {
            id: "test".into(),
            name: "Test region".into(),
            extensions: exts
                .iter()
                .map(|(id, entries)| TableExtension {
                    table_id: id.to_string(),
                    entries: entries
                        .iter()
                        .map(|(c, l)| TableEntry::new(*c, *l))
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn extends_flat_table() {
        let base = TtaaiiTables::bundled();
        let ext = base
            .with_regional(&config(&[("C1", &[("QQ", "Test territory")])]))
            .expect("extension applies");
        assert!(ext.table_c1.contains("QQ"));
        assert!(!base.table_c1.contains("QQ"), "base must be untouched");
    }

    #[test]
    fn extends_keyed_sub_table() {
        let base = TtaaiiTables::bundled();
        let ext = base
            .with_regional(&config(&[("B1:N", &[("Z", "Regional notice")])]))
            .expect("extension applies");
        let n = ext.table_b1.resolve("N").expect("B1:N");
        assert!(n.contains("Z"));
    }

    #[test]
    fn creates_missing_keyed_sub_table() {
        let base = TtaaiiTables::bundled();
        let ext = base
            .with_regional(&config(&[("C6:IX", &[("A", "Regional BUFR")])]))
            .expect("extension applies");
        assert!(ext.table_c6.resolve("IX").is_some());
    }

    #[test]
    fn unknown_table_rejected() {
        let err = TtaaiiTables::bundled()
            .with_regional(&config(&[("Z9", &[("A", "x")])]))
            .unwrap_err();
        assert!(matches!(err, TablesError::UnknownTable(ref id) if id == "Z9"));
        let err = TtaaiiTables::bundled()
            .with_regional(&config(&[("Q1:A", &[("A", "x")])]))
            .unwrap_err();
        assert!(matches!(err, TablesError::UnknownTable(_)));
    }

    #[test]
    fn existing_code_rejected() {
        let err = TtaaiiTables::bundled()
            .with_regional(&config(&[("A", &[("S", "Duplicate")])]))
            .unwrap_err();
        assert!(matches!(err, TablesError::DuplicateCode { ref code, .. } if code == "S"));
    }

    #[test]
    fn badly_shaped_code_rejected() {
        let err = TtaaiiTables::bundled()
            .with_regional(&config(&[("D2", &[("7", "Seven")])]))
            .unwrap_err();
        assert!(err.to_string().contains("two digits"), "{err}");
    }

    #[test]
    fn parses_camel_case_json() {
        let cfg = RegionalConfig::from_json(
            r#"{"id":"ra6","name":"RA VI","extensions":[{"tableId":"C1","entries":[{"code":"QX","label":"X"}]}]}"#,
        )
        .expect("valid");
        assert_eq!(cfg.extensions[0].table_id, "C1");
    }
}
