//! Every Table A letter resolves each field to the expected table family.

mod common;

use common::{TABLES, table_id};
use ttaaii_core::{DataType, TtaaiiField as F};

/// (T1, sample T2, sample A1, T2 table, A1 table, A2 table, ii table)
const ROWS: &[(char, char, char, &str, &str, &str, &str)] = &[
    ('A', 'C', 'F', "B1", "C1", "C1", "generic_ii"),
    ('C', 'S', 'F', "B1", "C1", "C1", "generic_ii"),
    ('D', 'A', 'A', "B2", "C3", "C4", "D2"),
    ('E', 'C', 'F', "B5", "C1", "C1", "generic_ii"),
    ('F', 'C', 'F', "B1", "C1", "C1", "generic_ii"),
    ('G', 'A', 'A', "B2", "C3", "C4", "D2"),
    ('H', 'A', 'A', "B2", "C3", "C4", "D2"),
    ('I', 'S', 'A', "B3", "C6", "C3", "generic_ii"),
    ('J', 'S', 'A', "B3", "C6", "C4", "D2"),
    ('K', 'S', 'A', "C7_T2", "C7", "C3", "generic_ii"),
    ('L', 'T', 'F', "B7", "C1", "C1", "generic_ii"),
    ('N', 'O', 'F', "B1", "C1", "C1", "generic_ii"),
    ('O', 'D', 'A', "B4", "C3", "C4", "D1"),
    ('P', 'A', 'A', "B6", "C3", "C4", "D2"),
    ('Q', 'A', 'A', "B6", "C3", "C5", "D2"),
    ('S', 'M', 'F', "B1", "C1/C2", "C2", "generic_ii"),
    ('T', 'B', 'A', "B1", "C3", "C4", "generic_ii"),
    ('U', 'S', 'F', "B1", "C1/C2", "C2", "generic_ii"),
    ('V', 'A', 'F', "B2", "C1", "C1", "generic_ii"),
    ('W', 'W', 'F', "B1", "C1", "C1", "generic_ii"),
    ('X', 'A', 'A', "B2", "C3", "C5", "D2"),
    ('Y', 'A', 'A', "B2", "C3", "C5", "D2"),
];

#[test]
fn every_assigned_letter_has_a_row() {
    let listed: String = ROWS.iter().map(|r| r.0).collect();
    let table_a: String = TABLES
        .table_a
        .entries
        .iter()
        .filter_map(|e| e.code.chars().next())
        .filter(|&c| c != 'B')
        .collect();
    assert_eq!(listed, table_a);
}

#[test]
fn rows_resolve_to_expected_tables() {
    for &(t1, t2, a1, t2_id, a1_id, a2_id, ii_id) in ROWS {
        let p1 = t1.to_string();
        let p2 = format!("{t1}{t2}");
        let p3 = format!("{t1}{t2}{a1}");
        let p4 = format!("{p3}A");
        assert_eq!(table_id(F::T2, &p1).as_deref(), Some(t2_id), "T2 after {p1}");
        assert_eq!(table_id(F::A1, &p2).as_deref(), Some(a1_id), "A1 after {p2}");
        assert_eq!(table_id(F::A2, &p3).as_deref(), Some(a2_id), "A2 after {p3}");
        if !matches!(p2.as_str(), "FA" | "UA") {
            assert_eq!(table_id(F::Ii, &p4).as_deref(), Some(ii_id), "ii after {p4}");
        }
    }
}

#[test]
fn sample_codes_are_valid_in_their_tables() {
    for &(t1, t2, a1, ..) in ROWS {
        let heading = format!("{t1}{t2}{a1}");
        let result = ttaaii_core::validate(&TABLES, &heading);
        assert!(result.valid, "{heading}: {:?}", result.errors);
    }
}

#[test]
fn addressed_message_stops_after_t1() {
    assert!(DataType::from_code('B').is_some());
    for field in [F::T2, F::A1, F::A2] {
        assert_eq!(table_id(field, "BM"), None, "{field}");
    }
    assert_eq!(table_id(F::Ii, "BMAA").as_deref(), Some("generic_ii"));
}
