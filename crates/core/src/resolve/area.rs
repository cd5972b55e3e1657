//! A1 and A2: geographical, type and reference-time designators.
//!
//! Country-based fields are synthesized from Table C1: A1 offers one entry
//! per distinct first letter and A2 the second letters of the countries
//! sharing A1. Surface and upper-air data additionally accept the Table C2
//! station types, so those tables are unions. A letter valid under both
//! tables appears once per source, each tagged with `metadata.source`.

use crate::grammar::context::TtaaiiContext;
use crate::grammar::designator::{A1Source, A2Source, grammar_for};
use crate::grammar::tables::{TableDefinition, TableEntry, TtaaiiTables, fill};
use std::collections::BTreeMap;

/// Metadata key naming the table an entry of a union came from.
pub const SOURCE_KEY: &str = "source";

/// A1 vocabulary selected by T1 (and T2 for BUFR and CREX).
pub fn a1_table(tables: &TtaaiiTables, ctx: &TtaaiiContext) -> Option<TableDefinition> {
    let t1 = ctx.t1()?;
    match grammar_for(t1)?.a1 {
        A1Source::CountryPrefix => Some(country_prefix_table(tables)),
        A1Source::CountryPrefixOrStation => Some(country_or_station_table(tables)),
        A1Source::GeographicalArea => Some(tables.table_c3.clone()),
        A1Source::BufrDataType => tables.table_c6.resolve(&ctx.t1t2()?),
        A1Source::CrexDataType => tables.table_c7.a1.resolve(&ctx.t2()?.to_string()),
    }
}

/// A2 vocabulary selected by T1 (and A1 for country-based data).
pub fn a2_table(tables: &TtaaiiTables, ctx: &TtaaiiContext) -> Option<TableDefinition> {
    let t1 = ctx.t1()?;
    match grammar_for(t1)?.a2 {
        A2Source::CountrySuffix => country_suffix_table(tables, ctx.a1()?),
        A2Source::CountrySuffixOrStationArea => {
            let a1 = ctx.a1()?;
            if is_station_type(tables, a1) {
                Some(station_area_table(tables, a1))
            } else {
                country_suffix_table(tables, a1)
            }
        }
        A2Source::GeographicalArea => Some(tables.table_c3.clone()),
        A2Source::ReferenceTime => Some(tables.table_c4.clone()),
        A2Source::RegionalReferenceTime => Some(tables.table_c5.clone()),
    }
}

/// Table C1 entry for a two-letter country code.
pub fn country_entry<'t>(tables: &'t TtaaiiTables, code: &str) -> Option<&'t TableEntry> {
    tables.table_c1.entry(code)
}

/// Whether `a1` is a Table C2 nature-of-station letter.
pub fn is_station_type(tables: &TtaaiiTables, a1: char) -> bool {
    tables.table_c2.station_type(&a1.to_string()).is_some()
}

/// Countries whose code starts with `letter`, in table order.
pub fn countries_starting_with(tables: &TtaaiiTables, letter: char) -> Vec<&TableEntry> {
    tables
        .table_c1
        .entries
        .iter()
        .filter(|e| e.code.starts_with(letter))
        .collect()
}

/// One entry per distinct first letter of the C1 codes, labelled with the
/// number of countries sharing it.
pub fn country_prefix_table(tables: &TtaaiiTables) -> TableDefinition {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for entry in &tables.table_c1.entries {
        if let Some(first) = entry.code.chars().next() {
            *counts.entry(first).or_default() += 1;
        }
    }
    let labels = &tables.labels;
    let entries = counts
        .into_iter()
        .map(|(letter, count)| {
            let letter_s = letter.to_string();
            let label = if count == 1 {
                fill(&labels.country_prefix_single, &[("letter", &letter_s)])
            } else {
                fill(
                    &labels.country_prefix,
                    &[("count", &count.to_string()), ("letter", &letter_s)],
                )
            };
            TableEntry::new(letter_s, label)
                .with_metadata(SOURCE_KEY, tables.table_c1.id.as_str())
                .with_metadata("count", count)
        })
        .collect();
    TableDefinition {
        id: tables.table_c1.id.clone(),
        name: tables.table_c1.name.clone(),
        description: tables.table_c1.description.clone(),
        entries,
        groups: None,
    }
}

fn country_or_station_table(tables: &TtaaiiTables) -> TableDefinition {
    let c1 = country_prefix_table(tables);
    let c2 = &tables.table_c2;
    let mut entries = c1.entries;
    entries.extend(
        c2.station_types
            .iter()
            .map(|e| e.clone().with_metadata(SOURCE_KEY, c2.id.as_str())),
    );
    TableDefinition {
        id: format!("{}/{}", tables.table_c1.id, c2.id),
        name: format!("{} / {}", tables.table_c1.name, c2.name),
        description: c2.description.clone(),
        entries,
        groups: None,
    }
}

fn suffix_entries(tables: &TtaaiiTables, letter: char) -> Vec<TableEntry> {
    countries_starting_with(tables, letter)
        .into_iter()
        .filter_map(|country| {
            let second = country.code.chars().nth(1)?;
            let mut entry = TableEntry::new(second.to_string(), country.label.clone());
            entry.metadata = country.metadata.clone();
            Some(
                entry
                    .with_metadata(SOURCE_KEY, tables.table_c1.id.as_str())
                    .with_metadata("country", country.code.as_str()),
            )
        })
        .collect()
}

fn country_suffix_table(tables: &TtaaiiTables, letter: char) -> Option<TableDefinition> {
    let entries = suffix_entries(tables, letter);
    if entries.is_empty() {
        return None;
    }
    Some(TableDefinition {
        id: tables.table_c1.id.clone(),
        name: tables.table_c1.name.clone(),
        description: tables.table_c1.description.clone(),
        entries,
        groups: None,
    })
}

/// Union of the countries starting with a station-type letter and the C2
/// ocean areas. The table is reported as C2; entries keep their source tag.
fn station_area_table(tables: &TtaaiiTables, a1: char) -> TableDefinition {
    let c2 = &tables.table_c2;
    let station = c2
        .station_type(&a1.to_string())
        .map(|e| e.label.as_str())
        .unwrap_or_default();
    let mut entries = suffix_entries(tables, a1);
    entries.extend(c2.areas.iter().map(|area| {
        let label = fill(
            &tables.labels.station_area,
            &[("station", station), ("area", &area.label)],
        );
        TableEntry {
            label,
            ..area.clone()
        }
        .with_metadata(SOURCE_KEY, c2.id.as_str())
    }));
    TableDefinition {
        id: c2.id.clone(),
        name: c2.name.clone(),
        description: c2.description.clone(),
        entries,
        groups: None,
    }
}
