//! T1 and T2: data type and data subtype.

use crate::grammar::context::TtaaiiContext;
use crate::grammar::designator::{T2Source, grammar_for};
use crate::grammar::tables::{TableDefinition, TtaaiiTables};

/// Table A, verbatim.
pub fn t1_table(tables: &TtaaiiTables) -> TableDefinition {
    tables.table_a.clone()
}

/// T2 vocabulary selected by T1.
///
/// `None` when T1 is absent, unassigned, or an addressed message.
pub fn t2_table(tables: &TtaaiiTables, ctx: &TtaaiiContext) -> Option<TableDefinition> {
    let t1 = ctx.t1()?;
    let source = grammar_for(t1)?.t2;
    match source {
        T2Source::B1 => tables.table_b1.resolve(&t1.to_string()),
        T2Source::B2 => Some(tables.table_b2.clone()),
        T2Source::B3 => Some(tables.table_b3.clone()),
        T2Source::B4 => Some(tables.table_b4.clone()),
        T2Source::B5 => Some(tables.table_b5.clone()),
        T2Source::B6 => Some(tables.table_b6.clone()),
        T2Source::B7 => Some(tables.table_b7.clone()),
        T2Source::CrexT2 => Some(tables.table_c7.t2.clone()),
    }
}
