//! Sable Indentation Lint Engine
//!
//! Computes the correct indentation for every line of a Sable template file
//! and reports lines whose physical indentation disagrees, with
//! machine-applicable fixes.
//!
//! # Architecture
//!
//! One analysis is a single traversal followed by a single validation pass:
//!
//! 1. **Visitor phase**: the host drives a depth-first traversal, calling
//!    [`IndentAnalysis::enter_node`] / [`IndentAnalysis::leave_node`]. Rules
//!    for both grammars populate the offset graph — a constraint per token,
//!    relative to an anchor token or to an absolute baseline. Kinds no rule
//!    claims get their subtree ignored on exit, so unknown constructs can
//!    never produce false positives.
//! 2. **Validation phase**: [`IndentAnalysis::finish`] groups the token
//!    stream into physical lines, resolves each line's expected indent
//!    through the graph (memoized, cycle-guarded), and compares it against
//!    the leading whitespace as written.
//!
//! All state is scoped to one file's analysis; nothing is shared across
//! files or runs. No path in the engine aborts the host's traversal —
//! every abnormal condition degrades to "no diagnostic for that line".
//!
//! # Modules
//!
//! - [`graph`]: the offset graph and expected-indent memo table
//! - [`walker`]: per-line token grouping with comment deferral
//! - [`resolver`]: graph resolution to expected indents
//! - [`ignore`]: ignored tokens and user ignore selectors
//! - [`options`]: rule configuration

pub mod graph;
pub mod ignore;
pub mod options;
pub mod resolver;
mod rules;
mod validator;
pub mod walker;

use std::fmt;

use sable_diagnostic::Diagnostic;
use sable_ir::{NodeId, SourceFile};

use crate::graph::OffsetGraph;
use crate::ignore::{IgnoreSet, IgnoredSelectors};
use crate::rules::RuleCtx;

pub use crate::ignore::SelectorError;
pub use crate::options::{IndentOptions, IndentUnit, OptionsError};

/// Error constructing an analysis from configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The options failed validation.
    Options(OptionsError),
    /// An ignore selector failed to compile.
    Selector(SelectorError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Options(e) => e.fmt(f),
            ConfigError::Selector(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Options(e) => Some(e),
            ConfigError::Selector(e) => Some(e),
        }
    }
}

impl From<OptionsError> for ConfigError {
    fn from(e: OptionsError) -> Self {
        ConfigError::Options(e)
    }
}

impl From<SelectorError> for ConfigError {
    fn from(e: SelectorError) -> Self {
        ConfigError::Selector(e)
    }
}

/// One file's indentation analysis.
///
/// The host owns the traversal: it calls [`enter_node`](Self::enter_node)
/// and [`leave_node`](Self::leave_node) for every node in depth-first order
/// and [`finish`](Self::finish) when the traversal is done. Hosts holding a
/// materialized [`SyntaxTree`](sable_ir::SyntaxTree) can use [`analyze`]
/// instead.
pub struct IndentAnalysis<'src> {
    src: &'src SourceFile,
    options: IndentOptions,
    selectors: IgnoredSelectors,
    graph: OffsetGraph,
    ignored: IgnoreSet,
}

impl<'src> IndentAnalysis<'src> {
    /// Set up an analysis for one file.
    pub fn new(src: &'src SourceFile, options: IndentOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let selectors = IgnoredSelectors::compile(&options.ignored_patterns)?;
        Ok(IndentAnalysis {
            src,
            options,
            selectors,
            graph: OffsetGraph::new(),
            ignored: IgnoreSet::new(),
        })
    }

    /// Node-entry callback: runs the node through both rule tables.
    pub fn enter_node(&mut self, node: NodeId) {
        let mut ctx = RuleCtx {
            src: self.src,
            graph: &mut self.graph,
            ignored: &mut self.ignored,
            options: &self.options,
        };
        rules::enter(&mut ctx, node);
    }

    /// Node-exit callback: defensive and user-configured ignores.
    pub fn leave_node(&mut self, node: NodeId) {
        let src = self.src;
        let kind = &src.tree().node(node).kind;
        if !rules::claimed(kind) || self.selectors.matches(kind.name()) {
            self.ignored.ignore_node(src, node);
        }
    }

    /// Traversal-finished callback: validate every line and report.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        validator::validate(self.src, &self.options, &mut self.graph, &self.ignored)
    }
}

/// Analyze a file whose syntax tree is materialized in the source model.
///
/// Drives the depth-first traversal [`IndentAnalysis`] expects from a host.
pub fn analyze(src: &SourceFile, options: IndentOptions) -> Result<Vec<Diagnostic>, ConfigError> {
    let mut analysis = IndentAnalysis::new(src, options)?;
    if let Some(root) = src.tree().root() {
        walk(&mut analysis, src, root);
    }
    Ok(analysis.finish())
}

fn walk(analysis: &mut IndentAnalysis<'_>, src: &SourceFile, node: NodeId) {
    analysis.enter_node(node);
    for &child in src.tree().children(node) {
        walk(analysis, src, child);
    }
    analysis.leave_node(node);
}
