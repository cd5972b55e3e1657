pub use ttaaii_diagnostics::{Diagnostic, Severity, Span, codes, explain, render_message};
