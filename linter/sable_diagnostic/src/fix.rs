//! Fix application.
//!
//! The engine only describes edits; this module is the reference application
//! step. Edits are applied back-to-front so earlier spans stay valid, and
//! overlapping edits are rejected rather than guessed at.

use std::fmt;

use crate::{Diagnostic, TextEdit};

/// Error applying a set of edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    /// Two edits overlap; applying both would corrupt the text.
    Overlap { first: usize, second: usize },
    /// An edit's span lies outside the source text.
    OutOfBounds { index: usize },
}

impl fmt::Display for FixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixError::Overlap { first, second } => {
                write!(f, "edits {first} and {second} overlap")
            }
            FixError::OutOfBounds { index } => {
                write!(f, "edit {index} is out of bounds")
            }
        }
    }
}

impl std::error::Error for FixError {}

/// Apply non-overlapping edits to `source`, returning the new text.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| (edits[i].span.start, edits[i].span.end));

    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if edits[a].span.end > edits[b].span.start {
            return Err(FixError::Overlap { first: a, second: b });
        }
    }

    let mut result = source.to_string();
    for &i in order.iter().rev() {
        let edit = &edits[i];
        if edit.span.end as usize > source.len() {
            return Err(FixError::OutOfBounds { index: i });
        }
        result.replace_range(edit.span.to_range(), &edit.replacement);
    }
    Ok(result)
}

/// Collect the edits of every machine-applicable suggestion.
///
/// This is what a `--fix` pass applies: suggestions the engine is certain
/// about, in diagnostic order.
pub fn machine_applicable_edits(diagnostics: &[Diagnostic]) -> Vec<TextEdit> {
    diagnostics
        .iter()
        .flat_map(|diag| &diag.suggestions)
        .filter(|suggestion| suggestion.applicability.is_machine_applicable())
        .flat_map(|suggestion| suggestion.edits.iter().cloned())
        .collect()
}
