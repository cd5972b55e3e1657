//! WMO-386 reference tables for TTAAII abbreviated headings.
//!
//! Defines the table-set data model (Tables A, B1–B7, C1–C7 and D1–D3),
//! the bundled English table-set, loading with structural checks, and
//! regional extensions layered on top of a loaded set.

mod load;
mod regional;

pub use load::{TablesError, load_tables_from_path, load_tables_from_str};
pub use regional::{RegionalConfig, TableExtension};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Raw JSON of the bundled English table-set.
pub const BUNDLED_TABLES_JSON: &str = include_str!("../data/tables.en.json");

/// One valid code for a field in some context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    /// Literal value as it appears in the heading (1–2 characters).
    pub code: String,
    /// Human-readable description.
    pub label: String,
    /// Cross-reference to a WMO code form (e.g. `FM 15 (METAR)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_form: Option<String>,
    /// GTS routing priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Open key/value bag used for grouping (continent, hemisphere, hours…).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl TableEntry {
    /// Create an entry with only a code and a label.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            code_form: None,
            priority: None,
            metadata: None,
        }
    }

    /// Insert a metadata value, creating the bag if needed.
    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// Metadata value for `key` rendered as a string, if present.
    ///
    /// Strings are returned verbatim; other JSON values use their JSON text.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        metadata_str(self.metadata.as_ref(), key)
    }
}

/// Value for `key` in a metadata bag rendered as a string.
///
/// Strings are returned verbatim; other JSON values use their JSON text.
pub fn metadata_str(
    metadata: Option<&BTreeMap<String, serde_json::Value>>,
    key: &str,
) -> Option<String> {
    Some(match metadata?.get(key)? {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Named partition of a table's codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableGroup {
    /// Stable group key (e.g. `NH`).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Codes belonging to the group, in display order.
    pub codes: Vec<String>,
}

/// A flat table, or a table resolved for one field in one context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    /// Underlying WMO table id (`B1`, `C1/C2`, `D3_FA`, `generic_ii`…).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Valid entries.
    pub entries: Vec<TableEntry>,
    /// Optional UI grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<TableGroup>>,
}

impl TableDefinition {
    /// Look up an entry by exact code.
    pub fn entry(&self, code: &str) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Whether any entry carries this code.
    pub fn contains(&self, code: &str) -> bool {
        self.entry(code).is_some()
    }
}

/// A table whose entries depend on a parent value (B1 by T1, C6 by T1T2, C7 by T2).
///
/// `name` and `description` may contain a `{key}` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyedTable {
    /// Table id reported for every resolved sub-table.
    pub id: String,
    /// Name template.
    pub name: String,
    /// Description template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entries per parent key.
    pub by_key: BTreeMap<String, Vec<TableEntry>>,
    /// Entries used when the key is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Vec<TableEntry>>,
}

impl KeyedTable {
    /// Resolve the sub-table for `key`, falling back to `default`.
    pub fn resolve(&self, key: &str) -> Option<TableDefinition> {
        let entries = self.by_key.get(key).or(self.default.as_ref())?;
        Some(TableDefinition {
            id: self.id.clone(),
            name: self.name.replace("{key}", key),
            description: self.description.as_ref().map(|d| d.replace("{key}", key)),
            entries: entries.clone(),
            groups: None,
        })
    }
}

/// Table C2: nature of station (A1) and ocean area (A2) for marine data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationTable {
    /// Table id (`C2`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A1 station-type letters.
    pub station_types: Vec<TableEntry>,
    /// A2 ocean-area letters.
    pub areas: Vec<TableEntry>,
}

impl StationTable {
    /// Station type for an A1 letter.
    pub fn station_type(&self, code: &str) -> Option<&TableEntry> {
        self.station_types.iter().find(|e| e.code == code)
    }

    /// Ocean area for an A2 letter.
    pub fn area(&self, code: &str) -> Option<&TableEntry> {
        self.areas.iter().find(|e| e.code == code)
    }
}

/// Table C7: CREX T2 vocabulary plus A1 keyed by T2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrexTable {
    /// T2 values when T1 = K.
    pub t2: TableDefinition,
    /// A1 values keyed by T2.
    pub a1: KeyedTable,
}

/// One contiguous ii range of Table D3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IiRange {
    /// First number (inclusive).
    pub start: u8,
    /// Last number (inclusive).
    pub end: u8,
    /// Meaning of every number in the range.
    pub label: String,
}

/// Range-generated ii table (FA and UA parts of Table D3).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeTable {
    /// Table id (`D3_FA`, `D3_UA`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ranges in ascending order.
    pub ranges: Vec<IiRange>,
}

/// Templates for labels the resolver synthesizes rather than reads.
///
/// Placeholders are written as `{name}` and filled with [`fill`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SyntheticLabels {
    /// First-letter entry with several countries (`{count}`, `{letter}`).
    pub country_prefix: String,
    /// First-letter entry with one country (`{letter}`).
    pub country_prefix_single: String,
    /// Partial decode of a lone country A1 (`{letter}`).
    pub countries_starting_with: String,
    /// Station area entry in a union A2 table (`{station}`, `{area}`).
    pub station_area: String,
    /// Lone A1 that is both a station type and a country prefix (`{station}`, `{letter}`).
    pub station_or_countries: String,
    /// Name of the generic ii table.
    pub sequence_name: String,
    /// Description of the generic ii table.
    pub sequence_description: String,
    /// Generic ii entry (`{nn}`).
    pub sequence: String,
    /// D3 range entry (`{label}`, `{nn}`).
    pub range_entry: String,
    /// Label of the bucket collecting ungrouped entries.
    pub other_group: String,
    /// Display labels for `continent` metadata values.
    pub continents: BTreeMap<String, String>,
}

impl Default for SyntheticLabels {
    fn default() -> Self {
        let continents = [
            ("EU", "Europe"),
            ("AF", "Africa"),
            ("AS", "Asia"),
            ("NA", "North America"),
            ("SA", "South America"),
            ("CA", "Caribbean and Central America"),
            ("OC", "Oceania"),
            ("AN", "Antarctic"),
            ("AREA", "Area Designators"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            country_prefix: "{count} countries or areas starting with {letter}".into(),
            country_prefix_single: "1 country or area starting with {letter}".into(),
            countries_starting_with: "Countries starting with {letter}".into(),
            station_area: "{station}: {area}".into(),
            station_or_countries: "{station} or countries starting with {letter}".into(),
            sequence_name: "Bulletin number ii".into(),
            sequence_description: "Sequential bulletin number (00-99)".into(),
            sequence: "Bulletin {nn}".into(),
            range_entry: "{label} ({nn})".into(),
            other_group: "Other".into(),
            continents,
        }
    }
}

/// Substitute `{name}` placeholders in `template`.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// A complete table-set for one locale.
///
/// Immutable once loaded; swap the whole value to change locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TtaaiiTables {
    /// Locale tag (e.g. `en`).
    pub locale: String,
    /// Table A: data type designator T1.
    pub table_a: TableDefinition,
    /// Table B1: T2 keyed by T1.
    pub table_b1: KeyedTable,
    /// Table B2: T2 for grid-type data.
    pub table_b2: TableDefinition,
    /// Table B3: T2 for BUFR data.
    pub table_b3: TableDefinition,
    /// Table B4: T2 for oceanographic GRIB.
    pub table_b4: TableDefinition,
    /// Table B5: T2 for satellite imagery.
    pub table_b5: TableDefinition,
    /// Table B6: T2 for pictorial data.
    pub table_b6: TableDefinition,
    /// Table B7: T2 for aviation XML.
    pub table_b7: TableDefinition,
    /// Table C1: two-letter country and area designators.
    pub table_c1: TableDefinition,
    /// Table C2: station types and ocean areas.
    pub table_c2: StationTable,
    /// Table C3: geographical area designator.
    pub table_c3: TableDefinition,
    /// Table C4: reference time designator.
    pub table_c4: TableDefinition,
    /// Table C5: regional reference time designator.
    pub table_c5: TableDefinition,
    /// Table C6: A1 keyed by T1T2 (BUFR).
    pub table_c6: KeyedTable,
    /// Table C7: CREX T2 and A1.
    pub table_c7: CrexTable,
    /// Table D1: ocean depth levels.
    pub table_d1: TableDefinition,
    /// Table D2: pressure levels.
    pub table_d2: TableDefinition,
    /// Table D3 for T1T2 = FA.
    pub table_d3_fa: RangeTable,
    /// Table D3 for T1T2 = UA.
    pub table_d3_ua: RangeTable,
    /// Synthetic label templates.
    #[serde(default)]
    pub labels: SyntheticLabels,
}

impl TtaaiiTables {
    /// The bundled English table-set, parsed on first use.
    ///
    /// # Panics
    /// Panics if the embedded data fails to load, which the crate's tests rule out.
    pub fn bundled() -> &'static TtaaiiTables {
        static BUNDLED: OnceLock<TtaaiiTables> = OnceLock::new();
        BUNDLED.get_or_init(|| match load_tables_from_str(BUNDLED_TABLES_JSON) {
            Ok(tables) => tables,
            Err(e) => panic!("bundled table-set is invalid: {e}"),
        })
    }

    /// Flat tables keyed by the id used in regional extensions.
    pub(crate) fn flat_table_mut(&mut self, id: &str) -> Option<&mut TableDefinition> {
        Some(match id {
            "A" => &mut self.table_a,
            "B2" => &mut self.table_b2,
            "B3" => &mut self.table_b3,
            "B4" => &mut self.table_b4,
            "B5" => &mut self.table_b5,
            "B6" => &mut self.table_b6,
            "B7" => &mut self.table_b7,
            "C1" => &mut self.table_c1,
            "C3" => &mut self.table_c3,
            "C4" => &mut self.table_c4,
            "C5" => &mut self.table_c5,
            "D1" => &mut self.table_d1,
            "D2" => &mut self.table_d2,
            "C7_T2" => &mut self.table_c7.t2,
            _ => return None,
        })
    }

    /// Keyed tables addressed as `<prefix>:<key>` in regional extensions.
    pub(crate) fn keyed_table_mut(&mut self, prefix: &str) -> Option<&mut KeyedTable> {
        match prefix {
            "B1" => Some(&mut self.table_b1),
            "C6" => Some(&mut self.table_c6),
            "C7" => Some(&mut self.table_c7.a1),
            _ => None,
        }
    }
}
