//! The ignore registry and user ignore selectors.
//!
//! Tokens land here two ways: defensively, when a node's type is claimed by
//! neither rule set, and explicitly, when a configured selector matches a
//! node's kind name. Membership is monotonic for the lifetime of one
//! analysis pass — tokens are only ever added.

use std::fmt;

use regex::Regex;
use rustc_hash::FxHashSet;
use sable_ir::{NodeId, SourceFile, TokenId};

/// Tokens excluded from validation.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    tokens: FxHashSet<TokenId>,
}

impl IgnoreSet {
    /// Create an empty set.
    pub fn new() -> Self {
        IgnoreSet::default()
    }

    /// Mark every token in the node's span (comments included) as ignored.
    pub fn ignore_node(&mut self, src: &SourceFile, node: NodeId) {
        for token in src.tokens_of_with_comments(node) {
            self.tokens.insert(token);
        }
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, token: TokenId) -> bool {
        self.tokens.contains(&token)
    }

    /// Number of ignored tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Compiled user ignore patterns.
///
/// Each pattern matches node-kind names; `*` matches any run of characters,
/// everything else is literal. `"SwitchStatement"` exempts switches,
/// `"*Expression"` exempts every expression kind.
#[derive(Debug, Default)]
pub struct IgnoredSelectors {
    selectors: Vec<Regex>,
}

impl IgnoredSelectors {
    /// Compile a pattern list.
    pub fn compile(patterns: &[String]) -> Result<Self, SelectorError> {
        let mut selectors = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let mut regex_src = String::from("^");
            for (i, part) in pattern.split('*').enumerate() {
                if i > 0 {
                    regex_src.push_str(".*");
                }
                regex_src.push_str(&regex::escape(part));
            }
            regex_src.push('$');
            let regex = Regex::new(&regex_src).map_err(|source| SelectorError {
                pattern: pattern.clone(),
                source,
            })?;
            selectors.push(regex);
        }
        Ok(IgnoredSelectors { selectors })
    }

    /// Check whether any pattern matches the kind name.
    pub fn matches(&self, kind_name: &str) -> bool {
        self.selectors
            .iter()
            .any(|selector| selector.is_match(kind_name))
    }

    /// Check if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Error compiling an ignore selector pattern.
#[derive(Debug)]
pub struct SelectorError {
    pattern: String,
    source: regex::Error,
}

impl SelectorError {
    /// The offending pattern as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ignore selector {:?}: {}", self.pattern, self.source)
    }
}

impl std::error::Error for SelectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
