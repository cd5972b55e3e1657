//! `ttaaii`: complete, validate and decode WMO TTAAII headings.

mod render;

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ttaaii_core::{
    CompletionOptions, GroupBy, TtaaiiContext, TtaaiiField, ValidationResult, complete, decode,
    get_field_suggestions, validate,
};
use ttaaii_diagnostics::{self as diag, Diagnostic, Severity};
use ttaaii_tables::{RegionalConfig, TtaaiiTables, load_tables_from_path};

use crate::render::{Format, print_decoded, print_items, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ttaaii",
    version,
    about = "Complete, validate and decode WMO TTAAII abbreviated headings"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Table-set JSON to use instead of the bundled English tables.
    #[arg(long, global = true)]
    tables: Option<String>,

    /// Regional extension JSON applied on top of the table-set.
    #[arg(long, global = true)]
    regional: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Queries ─────────────────────────────────────────────────────
    /// List what can follow a partial heading.
    Complete {
        /// Partial heading (may be empty).
        #[arg(default_value = "")]
        input: String,
        /// Group items by a metadata key (e.g. "continent") or "table".
        #[arg(long)]
        group_by: Option<GroupBy>,
    },

    /// Check headings character by character.
    Validate {
        /// Headings to check.
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Describe every field of a heading.
    Decode { input: String },

    /// List the values of one field for an explicit context.
    Suggest {
        /// Field to suggest: T1, T2, A1, A2 or ii.
        #[arg(value_parser = parse_field)]
        field: TtaaiiField,
        #[arg(long)]
        t1: Option<char>,
        #[arg(long)]
        t2: Option<char>,
        #[arg(long)]
        a1: Option<char>,
        #[arg(long)]
        a2: Option<char>,
        /// Group items by a metadata key (e.g. "continent") or "table".
        #[arg(long)]
        group_by: Option<GroupBy>,
    },

    // ── Reference / informational ───────────────────────────────────
    /// Load and structurally check a table-set file.
    CheckTables { path: String },

    /// Explain a diagnostic ID (e.g. TTA1002).
    Explain { id: String },
}

fn parse_field(s: &str) -> Result<TtaaiiField, String> {
    TtaaiiField::parse(s).ok_or_else(|| format!("unknown field '{s}' (expected T1, T2, A1, A2 or ii)"))
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{out:#}");
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: Cli, format: Format) -> Result<()> {
    match &cli.cmd {
        Cmd::CheckTables { path } => return cmd_check_tables(path, format),
        Cmd::Explain { id } => return cmd_explain(id, format),
        _ => {}
    }

    let tables = load_tables(cli.tables.as_deref(), cli.regional.as_deref())?;
    match cli.cmd {
        Cmd::Complete { input, group_by } => cmd_complete(&tables, &input, group_by, format),
        Cmd::Validate { inputs } => cmd_validate(&tables, &inputs, format),
        Cmd::Decode { input } => cmd_decode(&tables, &input, format),
        Cmd::Suggest {
            field,
            t1,
            t2,
            a1,
            a2,
            group_by,
        } => {
            let ctx = TtaaiiContext::from_fields(
                t1.map(|c| c.to_ascii_uppercase()),
                t2.map(|c| c.to_ascii_uppercase()),
                a1.map(|c| c.to_ascii_uppercase()),
                a2.map(|c| c.to_ascii_uppercase()),
                None,
            )
            .context("invalid suggestion context")?;
            cmd_suggest(&tables, field, &ctx, group_by, format)
        }
        Cmd::CheckTables { .. } | Cmd::Explain { .. } => Ok(()),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_complete(
    tables: &TtaaiiTables,
    input: &str,
    group_by: Option<GroupBy>,
    format: Format,
) -> Result<()> {
    let result = complete(tables, input, &CompletionOptions { group_by });

    match format {
        Format::Json => print_json(&result)?,
        Format::Pretty => {
            let table = result.table_id.as_deref().unwrap_or("none");
            eprintln!(
                "{} at position {} (table {table})",
                result.field, result.position
            );
            if result.is_complete {
                eprintln!("heading complete");
            }
            print_items(&result.items, result.groups.as_deref());
        }
    }
    Ok(())
}

/// One validated heading in JSON output.
#[derive(Serialize)]
struct ValidateReport<'a> {
    input: &'a str,
    #[serde(flatten)]
    result: ValidationResult,
    diagnostics: Vec<Diagnostic>,
}

fn cmd_validate(tables: &TtaaiiTables, inputs: &[String], format: Format) -> Result<()> {
    let reports: Vec<ValidateReport<'_>> = inputs
        .iter()
        .map(|input| {
            let result = validate(tables, input);
            let diagnostics = result.diagnostics();
            ValidateReport {
                input,
                result,
                diagnostics,
            }
        })
        .collect();
    let ok = reports.iter().all(|r| r.result.valid);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "results": reports,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for report in &reports {
                render_diagnostics(&report.input.to_uppercase(), &report.diagnostics);
                if report.result.complete {
                    eprintln!("{}: valid", report.input);
                }
            }
            let all: Vec<Diagnostic> = reports
                .iter()
                .flat_map(|r| r.diagnostics.iter().cloned())
                .collect();
            print_summary(&all);
        }
    }

    let failed = reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .any(|d| matches!(d.severity, Severity::Error));
    if failed {
        process::exit(1);
    }
    Ok(())
}

fn cmd_decode(tables: &TtaaiiTables, input: &str, format: Format) -> Result<()> {
    let decoded = decode(tables, input);
    match format {
        Format::Json => print_json(&decoded)?,
        Format::Pretty => print_decoded(&decoded),
    }
    Ok(())
}

fn cmd_suggest(
    tables: &TtaaiiTables,
    field: TtaaiiField,
    ctx: &TtaaiiContext,
    group_by: Option<GroupBy>,
    format: Format,
) -> Result<()> {
    let suggestions = get_field_suggestions(tables, field, ctx, &CompletionOptions { group_by });
    match format {
        Format::Json => print_json(&suggestions)?,
        Format::Pretty => {
            let table = suggestions.table_id.as_deref().unwrap_or("none");
            eprintln!("{field} (table {table})");
            print_items(&suggestions.items, suggestions.groups.as_deref());
        }
    }
    Ok(())
}

fn cmd_check_tables(path: &str, format: Format) -> Result<()> {
    let tables = load_tables_from_path(Path::new(path))
        .with_context(|| format!("failed to load tables file '{path}'"))?;
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "path": path,
                "locale": tables.locale,
                "countries": tables.table_c1.entries.len(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            eprintln!(
                "tables ok: {path} (locale {}, {} countries)",
                tables.locale,
                tables.table_c1.entries.len()
            );
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve the table-set from (in priority order):
///   1. Explicit `--tables` path
///   2. The bundled English tables
///
/// then apply `--regional` on top when given.
fn load_tables(
    tables_path: Option<&str>,
    regional_path: Option<&str>,
) -> Result<Cow<'static, TtaaiiTables>> {
    let base = match tables_path {
        Some(path) => Cow::Owned(
            load_tables_from_path(Path::new(path))
                .with_context(|| format!("failed to load tables file '{path}'"))?,
        ),
        None => Cow::Borrowed(TtaaiiTables::bundled()),
    };

    let Some(path) = regional_path else {
        return Ok(base);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read regional file '{path}'"))?;
    let regional = RegionalConfig::from_json(&text)
        .with_context(|| format!("failed to parse regional file '{path}'"))?;
    debug!(
        region = %regional.id,
        extensions = regional.extensions.len(),
        "applying regional extensions"
    );
    let extended = base
        .with_regional(&regional)
        .with_context(|| format!("failed to apply regional config '{}'", regional.id))?;
    Ok(Cow::Owned(extended))
}
