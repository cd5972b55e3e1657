//! TTAAII core library.
//!
//! Decodes and auto-completes WMO-386 abbreviated headings (`T1 T2 A1 A2 ii`).
//! The main entry points are [`complete`], [`validate`], [`decode`] and
//! [`get_field_suggestions`]; each takes the table-set to resolve against.

#![warn(missing_docs)]

/// Heading grammar: fields, context parsing and the Table A mapping.
pub mod grammar;
/// Completion, validation and decoding queries.
pub mod provider;
/// Per-field table resolution.
pub mod resolve;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Grammar
pub use grammar::context::{ContextError, ParsedInput, TtaaiiContext, parse_context, parse_input};
pub use grammar::designator::{A1Source, A2Source, DataType, GrammarRow, IiSource, T2Source};
pub use grammar::field::{HEADING_LEN, TtaaiiField, field_at_position};

// Resolver
pub use resolve::{CharacterError, ResolvedTable, resolve_table, table_for_field, validate_character};

// Provider
pub use provider::{
    CompletionGroup, CompletionItem, CompletionOptions, CompletionResult, DecodedField,
    DecodedTtaaii, FieldSuggestions, GroupBy, ValidationError, ValidationResult, complete, decode,
    get_field_suggestions, validate,
};

// Diagnostics and tables (re-exported from their crates)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};
pub use grammar::tables::{TableDefinition, TableEntry, TtaaiiTables};
