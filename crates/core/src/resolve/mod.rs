//! Table resolution: which table governs each field in a given context.

mod area;
mod kind;
mod level;

pub use area::{
    SOURCE_KEY, a1_table, a2_table, countries_starting_with, country_entry,
    country_prefix_table, is_station_type,
};
pub use kind::{t1_table, t2_table};
pub use level::{generic_ii_table, ii_table};

use crate::grammar::context::{TtaaiiContext, parse_input};
use crate::grammar::diag::{codes, render_message};
use crate::grammar::field::{HEADING_LEN, TtaaiiField, field_at_position};
use crate::grammar::tables::{TableDefinition, TtaaiiTables};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Table resolved for the next position of an input.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTable {
    /// Character count of the input; the position being completed.
    pub position: usize,
    /// Field at `position`.
    pub field: TtaaiiField,
    /// Governing table, or `None` when the context admits no values.
    pub table: Option<TableDefinition>,
    /// Fields committed by the input.
    pub context: TtaaiiContext,
}

/// Table for `field` in `ctx`.
pub fn table_for_field(
    tables: &TtaaiiTables,
    field: TtaaiiField,
    ctx: &TtaaiiContext,
) -> Option<TableDefinition> {
    let table = match field {
        TtaaiiField::T1 => Some(t1_table(tables)),
        TtaaiiField::T2 => t2_table(tables, ctx),
        TtaaiiField::A1 => a1_table(tables, ctx),
        TtaaiiField::A2 => a2_table(tables, ctx),
        TtaaiiField::Ii => ii_table(tables, ctx),
    };
    match &table {
        Some(t) => debug!(
            field = %field,
            table = %t.id,
            entries = t.entries.len(),
            "resolved table"
        ),
        None => debug!(field = %field, "no table in context"),
    }
    table
}

/// Parse `input` and resolve the table for the position after it.
///
/// The input is used as given; callers normalize case.
pub fn resolve_table(tables: &TtaaiiTables, input: &str) -> ResolvedTable {
    let position = input.chars().count();
    let field = field_at_position(position);
    let context = parse_input(input).context;
    let table = table_for_field(tables, field, &context);
    ResolvedTable {
        position,
        field,
        table,
        context,
    }
}

/// Why a character was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterError {
    /// Diagnostic code (see [`codes`]).
    pub id: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl CharacterError {
    fn new(id: &'static str, ctx: &BTreeMap<String, String>) -> Self {
        Self {
            id,
            message: render_message(id, ctx),
        }
    }
}

/// Check one character against the table governing `position` in `ctx`.
///
/// `ii` is checked two characters at a time: the first digit only has to be
/// numeric, and the second completes `pending_ii` into a code looked up in
/// the ii table. Positions past the heading are always rejected.
pub fn validate_character(
    tables: &TtaaiiTables,
    ch: char,
    position: usize,
    ctx: &TtaaiiContext,
    pending_ii: Option<char>,
) -> Result<(), CharacterError> {
    let field = field_at_position(position);
    let mut diag_ctx = BTreeMap::from([
        ("field".to_string(), field.to_string()),
        ("character".to_string(), ch.to_string()),
        ("position".to_string(), position.to_string()),
    ]);
    trace!(%field, %ch, position, "validating character");

    if position >= HEADING_LEN {
        return Err(CharacterError::new(codes::INPUT_TOO_LONG, &diag_ctx));
    }

    if field == TtaaiiField::Ii {
        if !ch.is_ascii_digit() {
            return Err(CharacterError::new(codes::NON_NUMERIC_II, &diag_ctx));
        }
        let Some(first) = pending_ii.filter(|_| position == HEADING_LEN - 1) else {
            return Ok(());
        };
        if !first.is_ascii_digit() {
            // already reported at the first ii position
            return Ok(());
        }
        let Some(table) = ii_table(tables, ctx) else {
            return Err(CharacterError::new(codes::UNRESOLVABLE_FIELD, &diag_ctx));
        };
        let code: String = [first, ch].iter().collect();
        if table.contains(&code) {
            return Ok(());
        }
        diag_ctx.insert("code".into(), code);
        diag_ctx.insert("table".into(), table.id);
        return Err(CharacterError::new(codes::INVALID_II, &diag_ctx));
    }

    let Some(table) = table_for_field(tables, field, ctx) else {
        return Err(CharacterError::new(codes::UNRESOLVABLE_FIELD, &diag_ctx));
    };
    if table.contains(&ch.to_string()) {
        Ok(())
    } else {
        diag_ctx.insert("table".into(), table.id);
        Err(CharacterError::new(codes::INVALID_CHARACTER, &diag_ctx))
    }
}
