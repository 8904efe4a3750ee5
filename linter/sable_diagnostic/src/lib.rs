//! Diagnostic system for lint reporting.
//!
//! Follows the house principles for diagnostics:
//! - Lint codes for searchability
//! - Clear messages (what is wrong)
//! - Primary span (where it is wrong)
//! - Structured suggestions with exact text edits (how to fix it)
//!
//! The lint engine never mutates source text; it describes edits and the
//! host applies them. [`apply_edits`] is the reference application step,
//! also used by test suites to verify fix idempotence.

mod code;
mod diagnostic;
mod emitter;
mod fix;

pub use code::LintCode;
pub use diagnostic::{Applicability, Diagnostic, Label, Severity, Suggestion, TextEdit};
pub use emitter::render;
pub use fix::{apply_edits, machine_applicable_edits, FixError};
