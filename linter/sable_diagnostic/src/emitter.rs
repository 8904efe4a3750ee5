//! Terminal rendering for diagnostics.
//!
//! One human-readable format, suitable for embedding in a host's output.
//! Machine formats are the host's concern; the engine only ever hands it
//! structured [`Diagnostic`](crate::Diagnostic) values.

use std::fmt::Write;

use sable_ir::LineTable;

use crate::Diagnostic;

/// Render diagnostics as rustc-style text.
///
/// Columns are displayed 1-based, matching editor conventions.
pub fn render(diagnostics: &[Diagnostic], file_name: &str, source: &str) -> String {
    let lines = LineTable::build(source);
    let mut out = String::new();

    for diag in diagnostics {
        let _ = writeln!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);
        if let Some(span) = diag.primary_span() {
            let (line, col) = lines.line_col_of(source, span.start);
            let _ = writeln!(out, "  --> {file_name}:{line}:{}", col + 1);
        }
        for label in diag.labels.iter().filter(|label| !label.is_primary) {
            let (line, col) = lines.line_col_of(source, label.span.start);
            let _ = writeln!(
                out,
                "  note: {} ({file_name}:{line}:{})",
                label.message,
                col + 1
            );
        }
        for suggestion in &diag.suggestions {
            let _ = writeln!(out, "  = fix: {}", suggestion.message);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, LintCode, Suggestion};
    use pretty_assertions::assert_eq;
    use sable_ir::Span;

    #[test]
    fn renders_location_and_fix() {
        let source = "if (x) {\ny = 1;\n}\n";
        let diag = Diagnostic::warning(LintCode::L1001)
            .with_message("expected indentation of 2 spaces but found no indentation")
            .with_label(Span::point(9), "wrong indentation")
            .with_suggestion(Suggestion::machine_applicable(
                "re-indent this line",
                Span::point(9),
                "  ",
            ));

        let text = render(&[diag], "demo.sbl", source);
        assert_eq!(
            text,
            "warning[L1001]: expected indentation of 2 spaces but found no indentation\n\
             \x20 --> demo.sbl:2:1\n\
             \x20 = fix: re-indent this line\n"
        );
    }

    #[test]
    fn renders_nothing_for_empty_input() {
        assert_eq!(render(&[], "demo.sbl", ""), "");
    }
}
