//! Terminal rendering: ariadne reports for diagnostics, plain listings for
//! completion items and decoded headings.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use ttaaii_core::{CompletionGroup, CompletionItem, DecodedField, DecodedTtaaii};
use ttaaii_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, human-readable output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON when piped.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Info => Color::Blue,
    }
}

// ── Diagnostics ─────────────────────────────────────────────────────────

/// Render diagnostics against the heading they refer to, on stderr.
///
/// The heading is the ariadne source; spanned diagnostics underline the
/// offending character. An empty heading has nothing to underline, so its
/// diagnostics are printed as standalone lines.
pub(crate) fn render_diagnostics(heading: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let name = if heading.is_empty() { "<empty>" } else { heading };
    let mut cache = (name, Source::from(heading));

    for diag in diagnostics {
        let span = diag.span.filter(|_| !heading.is_empty());
        if let Some(span) = span {
            let start = span.start.min(heading.len());
            let end = span.end.min(heading.len()).max(start);

            let mut builder = Report::build(report_kind(&diag.severity), (name, start..end))
                .with_code(diag.id.as_ref())
                .with_message(&diag.message)
                .with_config(config);

            builder = builder.with_label(
                Label::new((name, start..end))
                    .with_message(label_message(diag))
                    .with_color(severity_color(&diag.severity)),
            );

            if let Some(explanation) = diag.explain() {
                builder = builder.with_help(explanation);
            }

            builder.finish().eprint(&mut cache).ok();
        } else {
            let kind_str = match diag.severity {
                Severity::Error => "error",
                Severity::Info => "info",
            };
            eprintln!("{kind_str}[{}]: {}", diag.id, diag.message);
        }
    }
}

/// `field=A1, character=9` style label from the diagnostic context.
fn label_message(diag: &Diagnostic) -> String {
    match &diag.context {
        Some(ctx) if !ctx.is_empty() => ctx
            .iter()
            .filter(|(k, _)| k.as_str() != "position")
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => diag.message.clone(),
    }
}

/// Print a coloured summary line, e.g. `2 errors, 1 info`.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let infos = diagnostics.len() - errors;

    if diagnostics.is_empty() {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if infos > 0 {
        parts.push(format!("{}", format!("{infos} info").fg(Color::Blue)));
    }
    eprintln!("{}", parts.join(", "));
}

// ── Listings ────────────────────────────────────────────────────────────

fn print_item(item: &CompletionItem, indent: &str) {
    let mut line = format!("{indent}{:<3} {}", item.code.as_str().fg(Color::Cyan), item.label);
    if let Some(form) = &item.code_form {
        line.push_str(&format!("  [{form}]"));
    }
    if let Some(p) = item.priority {
        line.push_str(&format!("  (priority {p})"));
    }
    println!("{line}");
}

/// Print suggestions flat, or under group headings when grouped.
pub(crate) fn print_items(items: &[CompletionItem], groups: Option<&[CompletionGroup]>) {
    match groups {
        Some(groups) => {
            for group in groups {
                println!(
                    "{} ({})",
                    group.label.as_str().fg(Color::Yellow),
                    group.key
                );
                for item in &group.items {
                    print_item(item, "  ");
                }
            }
        }
        None => {
            for item in items {
                print_item(item, "");
            }
        }
    }
}

fn print_decoded_field(name: &str, field: Option<&DecodedField>) {
    let Some(f) = field else {
        return;
    };
    let mut line = format!("{:<3} {:<3} {}", name, f.code.as_str().fg(Color::Cyan), f.label);
    if let Some(form) = &f.code_form {
        line.push_str(&format!("  [{form}]"));
    }
    if let Some(p) = f.priority {
        line.push_str(&format!("  (priority {p})"));
    }
    println!("{line}");
}

/// One line per decoded field.
pub(crate) fn print_decoded(decoded: &DecodedTtaaii) {
    println!("{}", decoded.input.as_str().fg(Color::Green));
    print_decoded_field("T1", decoded.data_type.as_ref());
    print_decoded_field("T2", decoded.data_subtype.as_ref());
    print_decoded_field("A1", decoded.area_or_type1.as_ref());
    print_decoded_field("A2", decoded.area_or_time2.as_ref());
    print_decoded_field("ii", decoded.level.as_ref());
}
