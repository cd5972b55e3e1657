//! ii: level designators and bulletin numbers.

use crate::grammar::context::TtaaiiContext;
use crate::grammar::designator::{IiSource, grammar_for};
use crate::grammar::tables::{RangeTable, TableDefinition, TableEntry, TtaaiiTables, fill};

/// ii vocabulary selected by T1 and T2.
///
/// FA and UA expand their Table D3 ranges. T1 values with a level table get
/// D1 or D2; everything else, including an absent or unassigned T1, gets the
/// generic 00–99 bulletin series.
pub fn ii_table(tables: &TtaaiiTables, ctx: &TtaaiiContext) -> Option<TableDefinition> {
    match ctx.t1t2().as_deref() {
        Some("FA") => return Some(expand_ranges(tables, &tables.table_d3_fa)),
        Some("UA") => return Some(expand_ranges(tables, &tables.table_d3_ua)),
        _ => {}
    }
    let source = ctx
        .t1()
        .and_then(grammar_for)
        .map_or(IiSource::Sequence, |row| row.ii);
    Some(match source {
        IiSource::OceanDepth => tables.table_d1.clone(),
        IiSource::PressureLevel => tables.table_d2.clone(),
        IiSource::Sequence => generic_ii_table(tables),
    })
}

/// Every two-digit bulletin number.
pub fn generic_ii_table(tables: &TtaaiiTables) -> TableDefinition {
    let labels = &tables.labels;
    TableDefinition {
        id: "generic_ii".into(),
        name: labels.sequence_name.clone(),
        description: Some(labels.sequence_description.clone()),
        entries: (0..=99u8)
            .map(|n| {
                let nn = format!("{n:02}");
                let label = fill(&labels.sequence, &[("nn", &nn)]);
                TableEntry::new(nn, label)
            })
            .collect(),
        groups: None,
    }
}

fn expand_ranges(tables: &TtaaiiTables, ranges: &RangeTable) -> TableDefinition {
    let template = &tables.labels.range_entry;
    let entries = ranges
        .ranges
        .iter()
        .flat_map(|r| {
            (r.start..=r.end).map(move |n| {
                let nn = format!("{n:02}");
                let label = fill(template, &[("label", &r.label), ("nn", &nn)]);
                TableEntry::new(nn, label)
            })
        })
        .collect();
    TableDefinition {
        id: ranges.id.clone(),
        name: ranges.name.clone(),
        description: ranges.description.clone(),
        entries,
        groups: None,
    }
}
