//! The offset graph.
//!
//! A mapping from token to either a relative constraint (base token plus an
//! integer multiplier) or an absolute baseline. Visitor rules populate it
//! during traversal; the resolver consumes it afterwards. The relative
//! entries over a whole file form a forest rooted at baseline entries.
//!
//! Expected indents are memoized in an explicit first-write-wins table keyed
//! by token identity. The one invalidation is [`set_offset_baseline`]: a
//! baseline redefines a token's indent outright, so any previously cached
//! value for that token is dropped.
//!
//! [`set_offset_baseline`]: OffsetGraph::set_offset_baseline

use rustc_hash::FxHashMap;
use sable_ir::TokenId;

/// One token's constraint.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OffsetEntry {
    /// Indent is `resolve(base) + multiplier × unit`.
    Relative { base: TokenId, multiplier: i32 },
    /// Indent is `multiplier × unit`, independent of any other token.
    Baseline { multiplier: i32 },
}

/// Constraint entries and the expected-indent memo table.
#[derive(Debug, Default)]
pub struct OffsetGraph {
    entries: FxHashMap<TokenId, OffsetEntry>,
    expected: FxHashMap<TokenId, u32>,
}

impl OffsetGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        OffsetGraph::default()
    }

    /// Install a relative entry for each target.
    ///
    /// A target equal to `base` is silently skipped: a node's anchor is
    /// never made relative to itself.
    pub fn set_offset<I>(&mut self, targets: I, multiplier: i32, base: TokenId)
    where
        I: IntoIterator<Item = TokenId>,
    {
        for target in targets {
            if target == base {
                continue;
            }
            self.entries
                .insert(target, OffsetEntry::Relative { base, multiplier });
        }
    }

    /// Copy `source`'s current entry onto each target, preserving its kind.
    ///
    /// No-op when `source` has no entry. A copy that would make a target
    /// relative to itself is skipped.
    pub fn copy_offset<I>(&mut self, targets: I, source: TokenId)
    where
        I: IntoIterator<Item = TokenId>,
    {
        let Some(entry) = self.entries.get(&source).copied() else {
            return;
        };
        for target in targets {
            if let OffsetEntry::Relative { base, .. } = entry {
                if base == target {
                    continue;
                }
            }
            self.entries.insert(target, entry);
        }
    }

    /// Install a baseline entry for each target, resetting any cached
    /// expected indent.
    pub fn set_offset_baseline<I>(&mut self, targets: I, multiplier: i32)
    where
        I: IntoIterator<Item = TokenId>,
    {
        for target in targets {
            self.entries
                .insert(target, OffsetEntry::Baseline { multiplier });
            self.expected.remove(&target);
        }
    }

    /// The token's entry, if any.
    #[inline]
    pub fn entry(&self, token: TokenId) -> Option<OffsetEntry> {
        self.entries.get(&token).copied()
    }

    /// Check whether a token has an entry.
    #[inline]
    pub fn has_entry(&self, token: TokenId) -> bool {
        self.entries.contains_key(&token)
    }

    /// Cached expected indent, if already computed.
    #[inline]
    pub fn expected(&self, token: TokenId) -> Option<u32> {
        self.expected.get(&token).copied()
    }

    /// Memoize an expected indent. First write wins; later writes are
    /// ignored for the rest of the pass.
    pub fn cache_expected(&mut self, token: TokenId, value: u32) {
        self.expected.entry(token).or_insert(value);
    }
}
