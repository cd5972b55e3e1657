//! The consumer-facing queries: complete, validate, decode and field
//! suggestions. Every query is a pure function of a table-set and its input.

mod decode;
mod group;

pub use decode::{DecodedField, DecodedTtaaii, decode};
pub use group::{OTHER_GROUP, group_items};

use crate::grammar::context::{TtaaiiContext, parse_context};
use crate::grammar::diag::{Diagnostic, Span, codes};
use crate::grammar::field::{HEADING_LEN, TtaaiiField};
use crate::grammar::tables::{TableDefinition, TableEntry, TtaaiiTables, metadata_str};
use crate::resolve::{resolve_table, table_for_field, validate_character};
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

/// How completion items are partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupBy {
    /// By the value of a metadata key (e.g. `continent`).
    Metadata(String),
    /// By the groups the resolved table declares.
    Table,
}

impl FromStr for GroupBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "table" | "tableGroups" => GroupBy::Table,
            other => GroupBy::Metadata(other.to_string()),
        })
    }
}

/// Options for [`complete`] and [`get_field_suggestions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Partition items when set.
    pub group_by: Option<GroupBy>,
}

impl CompletionOptions {
    /// Options grouping by `group_by`.
    pub fn grouped(group_by: GroupBy) -> Self {
        Self {
            group_by: Some(group_by),
        }
    }
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Code to insert.
    pub code: String,
    /// Human-readable description.
    pub label: String,
    /// WMO code form reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_form: Option<String>,
    /// GTS priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Metadata carried over from the table entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl CompletionItem {
    /// Metadata value rendered as a string.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        metadata_str(self.metadata.as_ref(), key)
    }
}

impl From<&TableEntry> for CompletionItem {
    fn from(e: &TableEntry) -> Self {
        Self {
            code: e.code.clone(),
            label: e.label.clone(),
            code_form: e.code_form.clone(),
            priority: e.priority,
            metadata: e.metadata.clone(),
        }
    }
}

/// A named partition of completion items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionGroup {
    /// Group key (`EU`, `NH`, `OTHER`…).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Items in the group.
    pub items: Vec<CompletionItem>,
}

/// Result of [`complete`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    /// Position being completed (input length).
    pub position: usize,
    /// Field being completed.
    pub field: TtaaiiField,
    /// Id of the governing table, absent when nothing is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Flat list of suggestions.
    pub items: Vec<CompletionItem>,
    /// Grouped suggestions, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<CompletionGroup>>,
    /// Whether the input already has six characters.
    pub is_complete: bool,
    /// Normalized input.
    pub input: String,
    /// Parsed context.
    pub context: TtaaiiContext,
}

/// Suggestions for an explicitly chosen field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSuggestions {
    /// Id of the governing table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Flat list of suggestions.
    pub items: Vec<CompletionItem>,
    /// Grouped suggestions, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<CompletionGroup>>,
}

/// One invalid character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Diagnostic code.
    pub id: &'static str,
    /// Character position (0-based).
    pub position: usize,
    /// Field at `position`.
    pub field: TtaaiiField,
    /// Offending character.
    pub character: char,
    /// Human-readable message.
    pub message: String,
    /// Byte span of the character in the normalized input.
    #[serde(skip)]
    pub span: Span,
}

impl ValidationError {
    /// Convert to a [`Diagnostic`] spanning the offending character.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.id, self.message.clone(), Some(self.span)).with_context(
            BTreeMap::from([
                ("field".to_string(), self.field.to_string()),
                ("character".to_string(), self.character.to_string()),
                ("position".to_string(), self.position.to_string()),
            ]),
        )
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// No character was rejected.
    pub valid: bool,
    /// Valid and exactly six characters long.
    pub complete: bool,
    /// One entry per rejected position.
    pub errors: Vec<ValidationError>,
    /// Number of characters checked, after normalization.
    pub length: usize,
    /// Parsed context of the whole input.
    pub context: TtaaiiContext,
}

impl ValidationResult {
    /// All findings as diagnostics, plus an info note when the heading is
    /// valid but short.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out: Vec<Diagnostic> = self.errors.iter().map(ValidationError::to_diagnostic).collect();
        if self.valid && !self.complete {
            out.push(Diagnostic::from_code(
                codes::INCOMPLETE_HEADING,
                Some(Span::empty(self.length)),
                BTreeMap::from([("length".to_string(), self.length.to_string())]),
            ));
        }
        out
    }
}

fn normalize(input: &str) -> String {
    input.to_uppercase()
}

fn to_items(table: &TableDefinition) -> Vec<CompletionItem> {
    table.entries.iter().map(CompletionItem::from).collect()
}

/// What can come next after `input`.
///
/// Items are not filtered by a pending first ii digit.
pub fn complete(tables: &TtaaiiTables, input: &str, options: &CompletionOptions) -> CompletionResult {
    let input = normalize(input);
    let resolved = resolve_table(tables, &input);
    let items = resolved.table.as_ref().map(to_items).unwrap_or_default();
    let groups = match (&resolved.table, &options.group_by) {
        (Some(table), Some(group_by)) => Some(group_items(tables, table, &items, group_by)),
        _ => None,
    };
    debug!(input = %input, field = %resolved.field, items = items.len(), "completed");
    CompletionResult {
        position: resolved.position,
        field: resolved.field,
        table_id: resolved.table.map(|t| t.id),
        items,
        groups,
        is_complete: input.chars().count() >= HEADING_LEN,
        input,
        context: resolved.context,
    }
}

/// Check every character of `input` against the context before it.
pub fn validate(tables: &TtaaiiTables, input: &str) -> ValidationResult {
    let input = normalize(input);
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut errors = Vec::new();
    for (i, &(offset, ch)) in chars.iter().enumerate() {
        let ctx = parse_context(&input[..offset]);
        let pending = if i == HEADING_LEN - 1 {
            Some(chars[HEADING_LEN - 2].1)
        } else {
            None
        };
        if let Err(e) = validate_character(tables, ch, i, &ctx, pending) {
            errors.push(ValidationError {
                id: e.id,
                position: i,
                field: TtaaiiField::at_position(i),
                character: ch,
                message: e.message,
                span: Span::new(offset, offset + ch.len_utf8()),
            });
        }
    }
    let valid = errors.is_empty();
    debug!(input = %input, errors = errors.len(), "validated");
    ValidationResult {
        valid,
        complete: valid && chars.len() == HEADING_LEN,
        errors,
        length: chars.len(),
        context: parse_context(&input),
    }
}

/// Suggestions for `field` given an explicit context.
pub fn get_field_suggestions(
    tables: &TtaaiiTables,
    field: TtaaiiField,
    ctx: &TtaaiiContext,
    options: &CompletionOptions,
) -> FieldSuggestions {
    let Some(table) = table_for_field(tables, field, ctx) else {
        return FieldSuggestions::default();
    };
    let items = to_items(&table);
    let groups = options
        .group_by
        .as_ref()
        .map(|g| group_items(tables, &table, &items, g));
    FieldSuggestions {
        table_id: Some(table.id),
        items,
        groups,
    }
}
