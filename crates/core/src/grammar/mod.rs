/// Parsed heading context and the positional parser.
pub mod context;
/// Table A data types and their table-family rows.
pub mod designator;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// TTAAII fields and positions.
pub mod field;
/// Re-exports of the table data model.
pub mod tables;
