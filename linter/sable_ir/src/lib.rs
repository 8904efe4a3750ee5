//! Sable IR - Source Model Types
//!
//! This crate contains the data structures shared between the Sable lint
//! engine and its tree/token producers:
//! - Spans for source locations
//! - `LineTable` for line/column math
//! - Tokens and `TokenList` for the producer's token stream
//! - `SyntaxTree` with a closed `NodeKind` covering both grammars
//! - `SourceFile` as the per-file query facade
//!
//! # Design Philosophy
//!
//! - **Flatten everything**: no boxed nodes, `NodeId(u32)`/`TokenId(u32)`
//!   indices into arenas
//! - **The producer owns the text**: token and node contents are read back
//!   through spans, never copied
//! - **Closed node vocabulary**: unrecognized producer node types are carried
//!   as `NodeKind::Unknown` so consumers can degrade instead of failing
//!
//! The `test-support` feature exposes [`fixture`], a producer for a small
//! subset of the Sable format used by downstream test suites.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

#[cfg(feature = "test-support")]
pub mod fixture;
mod line_table;
mod source;
mod span;
mod token;
mod tree;

pub use line_table::LineTable;
pub use source::SourceFile;
pub use span::Span;
pub use token::{CommentStyle, Token, TokenId, TokenKind, TokenList};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree};
