//! The indent resolver.
//!
//! Walks the offset graph from a token to a baseline, summing
//! multiplier × unit at each edge, memoizing every token it touches. The
//! graph carries no cycle protection of its own, so the resolver keeps a
//! visited set per top-level resolution: revisiting a token aborts that
//! resolution instead of recursing forever, and the affected line degrades
//! to "skipped" like any other unresolvable line.

use rustc_hash::FxHashSet;
use sable_ir::{SourceFile, TokenId};
use tracing::trace;

use crate::graph::{OffsetEntry, OffsetGraph};
use crate::walker::LineGroup;

/// Resolves expected indents against one file's offset graph.
pub struct Resolver<'a> {
    graph: &'a mut OffsetGraph,
    unit_size: u32,
}

impl<'a> Resolver<'a> {
    /// Create a resolver using the given indentation unit size.
    pub fn new(graph: &'a mut OffsetGraph, unit_size: u32) -> Self {
        Resolver { graph, unit_size }
    }

    /// Expected indent of a token, or `None` when no baseline is reachable.
    pub fn resolve(&mut self, token: TokenId) -> Option<u32> {
        let mut visited = FxHashSet::default();
        self.resolve_guarded(token, &mut visited)
    }

    fn resolve_guarded(
        &mut self,
        token: TokenId,
        visited: &mut FxHashSet<TokenId>,
    ) -> Option<u32> {
        if let Some(cached) = self.graph.expected(token) {
            return Some(cached);
        }
        if !visited.insert(token) {
            trace!(?token, "offset cycle detected, treating as unresolved");
            return None;
        }
        let value = match self.graph.entry(token)? {
            OffsetEntry::Baseline { multiplier } => scaled(0, multiplier, self.unit_size),
            OffsetEntry::Relative { base, multiplier } => {
                let base_value = self.resolve_guarded(base, visited)?;
                scaled(base_value, multiplier, self.unit_size)
            }
        };
        self.graph.cache_expected(token, value);
        Some(value)
    }

    /// Expected indent for a line group.
    ///
    /// Tries each token of the line, then each deferred comment, until one
    /// resolves. On success the value is written back onto every group token
    /// holding a graph entry, so every token sharing the line reports the
    /// same expected indent. On failure the group's tokens are seeded with
    /// their actual columns: the line's layout as written becomes
    /// authoritative for anything resolving through it later.
    pub fn resolve_group(&mut self, src: &SourceFile, group: &LineGroup) -> Option<u32> {
        for &token in group.tokens.iter().chain(&group.comments) {
            let Some(value) = self.resolve(token) else {
                continue;
            };
            for &member in &group.tokens {
                if self.graph.has_entry(member) {
                    self.graph.cache_expected(member, value);
                }
            }
            return Some(value);
        }
        trace!(first = ?group.tokens.first(), "line unresolved, seeding actual columns");
        for &token in group.tokens.iter().chain(&group.comments) {
            self.graph.cache_expected(token, src.col_of(token));
        }
        None
    }
}

fn scaled(base: u32, multiplier: i32, unit_size: u32) -> u32 {
    let value = i64::from(base) + i64::from(multiplier) * i64::from(unit_size);
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::fixture;

    fn t(index: u32) -> TokenId {
        TokenId::new(index)
    }

    #[test]
    fn baseline_resolves_to_scaled_multiplier() {
        let mut graph = OffsetGraph::new();
        graph.set_offset_baseline(Some(t(0)), 2);
        let mut resolver = Resolver::new(&mut graph, 4);
        assert_eq!(resolver.resolve(t(0)), Some(8));
    }

    #[test]
    fn relative_chain_sums_multipliers() {
        let mut graph = OffsetGraph::new();
        graph.set_offset_baseline(Some(t(0)), 0);
        graph.set_offset(Some(t(1)), 1, t(0));
        graph.set_offset(Some(t(2)), 1, t(1));
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve(t(2)), Some(4));
        // intermediate links were memoized along the way
        assert_eq!(graph.expected(t(1)), Some(2));
    }

    #[test]
    fn missing_entry_is_unresolved() {
        let mut graph = OffsetGraph::new();
        graph.set_offset(Some(t(1)), 1, t(0));
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve(t(1)), None);
        assert_eq!(resolver.resolve(t(5)), None);
    }

    #[test]
    fn cached_value_short_circuits_missing_entry() {
        let mut graph = OffsetGraph::new();
        graph.cache_expected(t(0), 6);
        graph.set_offset(Some(t(1)), 1, t(0));
        let mut resolver = Resolver::new(&mut graph, 2);
        // t(0) has no entry, but a seeded actual column
        assert_eq!(resolver.resolve(t(1)), Some(8));
    }

    #[test]
    fn negative_multiplier_saturates_at_zero() {
        let mut graph = OffsetGraph::new();
        graph.set_offset_baseline(Some(t(0)), 0);
        graph.set_offset(Some(t(1)), -3, t(0));
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve(t(1)), Some(0));
    }

    #[test]
    fn mutual_cycle_terminates_unresolved() {
        let mut graph = OffsetGraph::new();
        graph.set_offset(Some(t(0)), 1, t(1));
        graph.set_offset(Some(t(1)), 1, t(0));
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve(t(0)), None);
        assert_eq!(resolver.resolve(t(1)), None);
    }

    #[test]
    fn group_success_writes_back_to_line_members() {
        // `if (x) {` — every token on the line shares the group's expected 0
        let src = fixture::parse("if (x) {\n  y = 1;\n}\n");
        let mut graph = OffsetGraph::new();
        graph.set_offset_baseline(Some(t(0)), 0);
        graph.set_offset(vec![t(1), t(2), t(3), t(4)], 1, t(0));
        let group = LineGroup {
            tokens: vec![t(0), t(1), t(2), t(3), t(4)],
            comments: Vec::new(),
            prev: None,
        };
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve_group(&src, &group), Some(0));
        // write-back overrides the chain value the entry alone would give
        assert_eq!(graph.expected(t(4)), Some(0));
    }

    #[test]
    fn group_failure_seeds_actual_columns() {
        let src = fixture::parse("if (x) {\n  y = 1;\n}\n");
        let mut graph = OffsetGraph::new();
        let group = LineGroup {
            tokens: vec![t(5), t(6)], // `y`, `=` at columns 2 and 4
            comments: Vec::new(),
            prev: None,
        };
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve_group(&src, &group), None);
        assert_eq!(graph.expected(t(5)), Some(2));
        // a later dependent resolves through the seeded column
        graph.set_offset(Some(t(9)), 1, t(5));
        let mut resolver = Resolver::new(&mut graph, 2);
        assert_eq!(resolver.resolve(t(9)), Some(4));
    }
}
