//! The validator/reporter.
//!
//! Compares each line's physical leading whitespace against the resolved
//! expected indent and produces diagnostics with machine-applicable fixes.
//! The two diagnostic kinds are mutually exclusive per line: a width
//! mismatch produces one whole-span report, and character mismatches are
//! only reported when the width is already correct.

use sable_diagnostic::{Diagnostic, LintCode, Suggestion};
use sable_ir::{SourceFile, Span, TokenId};
use tracing::debug;

use crate::graph::OffsetGraph;
use crate::ignore::IgnoreSet;
use crate::options::IndentOptions;
use crate::resolver::Resolver;
use crate::walker::line_groups;

pub(crate) fn validate(
    src: &SourceFile,
    options: &IndentOptions,
    graph: &mut OffsetGraph,
    ignored: &IgnoreSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut resolver = Resolver::new(graph, options.unit.size());

    for group in line_groups(src) {
        // An ignored token anywhere in the resolved set skips the whole line.
        if group
            .tokens
            .iter()
            .chain(&group.comments)
            .any(|&token| ignored.contains(token))
        {
            continue;
        }

        let Some(expected) = resolver.resolve_group(src, &group) else {
            continue;
        };
        // Deferred comment lines precede the code line in the file; validate
        // them first so diagnostics stay in source order.
        for &comment in &group.comments {
            check_line(src, options, comment, expected, &mut diagnostics);
        }
        let Some(&first) = group.tokens.first() else {
            continue;
        };
        if starts_its_line(src, first, group.prev) {
            check_line(src, options, first, expected, &mut diagnostics);
        }
    }

    diagnostics
}

/// A token is validated only when it starts a new physical line relative to
/// the previous token or comment.
fn starts_its_line(src: &SourceFile, token: TokenId, prev: Option<TokenId>) -> bool {
    match prev {
        Some(prev) => src.line_of(token) > src.end_line_of(prev),
        None => true,
    }
}

fn check_line(
    src: &SourceFile,
    options: &IndentOptions,
    token: TokenId,
    expected: u32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let line = src.line_of(token);
    let Some(line_start) = src.lines().line_start_offset(line) else {
        return;
    };
    let start = src.token(token).span.start;
    let leading = &src.text()[line_start as usize..start as usize];

    // Anything but spaces and tabs in the leading region means the token is
    // not the line head (or the "indentation" is packed with other text).
    if leading.chars().any(|c| !matches!(c, ' ' | '\t')) {
        return;
    }

    let actual = u32::try_from(leading.chars().count()).unwrap_or(u32::MAX);
    let span = Span::new(line_start, start);
    let unit_char = options.unit.ch();

    if actual != expected {
        debug!(line, expected, actual, "indentation width mismatch");
        let replacement = String::from(unit_char).repeat(expected as usize);
        diagnostics.push(
            Diagnostic::warning(LintCode::L1001)
                .with_message(format!(
                    "expected indentation of {} but found {}",
                    pluralize(expected, options.unit.unit_name()),
                    describe_found(leading),
                ))
                .with_label(span, "wrong indentation")
                .with_suggestion(Suggestion::machine_applicable(
                    "re-indent this line",
                    span,
                    replacement,
                )),
        );
        // Width and character reports are mutually exclusive per line.
        return;
    }

    let mut offset = line_start as usize;
    for ch in leading.chars() {
        if ch != unit_char {
            let char_span = Span::from_range(offset..offset + ch.len_utf8());
            debug!(line, column = offset - line_start as usize, "indentation character mismatch");
            diagnostics.push(
                Diagnostic::warning(LintCode::L1002)
                    .with_message(format!(
                        "expected {} character but found {} character",
                        char_name(unit_char),
                        char_name(ch),
                    ))
                    .with_label(char_span, "wrong indentation character")
                    .with_suggestion(Suggestion::machine_applicable(
                        "replace this character",
                        char_span,
                        String::from(unit_char),
                    )),
            );
        }
        offset += ch.len_utf8();
    }
}

fn pluralize(count: u32, name: &str) -> String {
    if count == 1 {
        format!("{count} {name}")
    } else {
        format!("{count} {name}s")
    }
}

fn describe_found(leading: &str) -> String {
    if leading.is_empty() {
        return "no indentation".to_string();
    }
    let count = u32::try_from(leading.chars().count()).unwrap_or(u32::MAX);
    if leading.chars().all(|c| c == ' ') {
        pluralize(count, "space")
    } else if leading.chars().all(|c| c == '\t') {
        pluralize(count, "tab")
    } else {
        format!("{count} mixed spaces and tabs")
    }
}

fn char_name(ch: char) -> &'static str {
    if ch == '\t' {
        "a tab"
    } else {
        "a space"
    }
}
