//! Human-readable decoding of a (partial) heading.

use crate::grammar::context::{TtaaiiContext, parse_context};
use crate::grammar::designator::{A1Source, DataType};
use crate::grammar::tables::{TableEntry, TtaaiiTables, fill};
use crate::resolve::{
    a1_table, a2_table, countries_starting_with, country_entry, ii_table, t1_table, t2_table,
};
use serde::Serialize;

/// One decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedField {
    /// Code as it appears in the heading (two characters for countries and ii).
    pub code: String,
    /// Meaning of the code.
    pub label: String,
    /// WMO code form, for T2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_form: Option<String>,
    /// GTS priority, for T1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl DecodedField {
    fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            code_form: None,
            priority: None,
        }
    }

    fn from_entry(e: &TableEntry) -> Self {
        Self::new(e.code.clone(), e.label.clone())
    }
}

/// Decoded heading; fields that cannot be decoded are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTtaaii {
    /// Normalized input.
    pub input: String,
    /// T1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DecodedField>,
    /// T2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_subtype: Option<DecodedField>,
    /// A1, or A1A2 jointly for country codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_or_type1: Option<DecodedField>,
    /// A2 when decoded separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_or_time2: Option<DecodedField>,
    /// ii.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<DecodedField>,
}

/// Decode `input` field by field.
pub fn decode(tables: &TtaaiiTables, input: &str) -> DecodedTtaaii {
    let input = input.to_uppercase();
    let ctx = parse_context(&input);
    let mut out = DecodedTtaaii {
        input,
        ..DecodedTtaaii::default()
    };

    let Some(t1) = ctx.t1() else {
        return out;
    };
    out.data_type = t1_table(tables)
        .entry(&t1.to_string())
        .map(|e| DecodedField {
            priority: e.priority,
            ..DecodedField::from_entry(e)
        });

    let Some(t2) = ctx.t2() else {
        return out;
    };
    out.data_subtype = t2_table(tables, &ctx).and_then(|table| {
        table.entry(&t2.to_string()).map(|e| DecodedField {
            code_form: e.code_form.clone(),
            ..DecodedField::from_entry(e)
        })
    });

    if let Some(a1) = ctx.a1() {
        let row = DataType::from_code(t1).and_then(DataType::grammar);
        match row.map(|r| r.a1) {
            Some(source @ (A1Source::CountryPrefix | A1Source::CountryPrefixOrStation)) => {
                decode_country_area(
                    tables,
                    &ctx,
                    a1,
                    source == A1Source::CountryPrefixOrStation,
                    &mut out,
                );
            }
            _ => decode_separate_area(tables, &ctx, a1, &mut out),
        }
    }

    if let Some(ii) = ctx.ii() {
        out.level = ii_table(tables, &ctx)
            .and_then(|table| table.entry(ii).map(DecodedField::from_entry));
    }
    out
}

fn decode_country_area(
    tables: &TtaaiiTables,
    ctx: &TtaaiiContext,
    a1: char,
    with_stations: bool,
    out: &mut DecodedTtaaii,
) {
    let station = if with_stations {
        tables.table_c2.station_type(&a1.to_string())
    } else {
        None
    };
    let letter = a1.to_string();

    let Some(a2) = ctx.a2() else {
        let has_countries = !countries_starting_with(tables, a1).is_empty();
        let labels = &tables.labels;
        let label = match station {
            Some(st) if has_countries => fill(
                &labels.station_or_countries,
                &[("station", &st.label), ("letter", &letter)],
            ),
            Some(st) => st.label.clone(),
            None => fill(&labels.countries_starting_with, &[("letter", &letter)]),
        };
        out.area_or_type1 = Some(DecodedField::new(letter, label));
        return;
    };

    let code: String = [a1, a2].iter().collect();
    if let Some(country) = country_entry(tables, &code) {
        out.area_or_type1 = Some(DecodedField::new(code, country.label.clone()));
    } else if let Some(st) = station {
        out.area_or_type1 = Some(DecodedField::from_entry(st));
        out.area_or_time2 = tables
            .table_c2
            .area(&a2.to_string())
            .map(DecodedField::from_entry);
    }
}

fn decode_separate_area(tables: &TtaaiiTables, ctx: &TtaaiiContext, a1: char, out: &mut DecodedTtaaii) {
    out.area_or_type1 = a1_table(tables, ctx)
        .and_then(|table| table.entry(&a1.to_string()).map(DecodedField::from_entry));
    if let Some(a2) = ctx.a2() {
        out.area_or_time2 = a2_table(tables, ctx)
            .and_then(|table| table.entry(&a2.to_string()).map(DecodedField::from_entry));
    }
}
