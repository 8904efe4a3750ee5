//! Token types for the producer's token stream.
//!
//! The engine never lexes; it consumes a `TokenList` built by an external
//! producer. Comments are kept inline in the list, in source order, so a
//! single forward scan sees code and comments interleaved exactly as they
//! appear in the file.

use std::fmt;

use crate::Span;

/// Identity of a token within its file's [`TokenList`].
///
/// All engine-side state (offset graph, expected-indent cache, ignore set)
/// is keyed by `TokenId`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TokenId(index)
    }

    /// Create from a `usize` index.
    ///
    /// # Panics
    /// Panics if the index exceeds `u32::MAX`.
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        let Ok(raw) = u32::try_from(index) else {
            panic!("token index {index} exceeds u32::MAX")
        };
        TokenId(raw)
    }

    /// Index into the owning [`TokenList`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Comment flavor, as produced by the host grammar.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentStyle {
    /// `// ...` to end of line.
    Line,
    /// `/* ... */`, possibly spanning lines.
    Block,
    /// `<!-- ... -->` in markup content.
    Markup,
}

/// Token kinds, reduced to what an indentation engine inspects.
///
/// The engine distinguishes code tokens from comments and otherwise reads
/// token *text* through spans, so the code kinds are coarse.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier, keyword, tag-content text chunk.
    Word,
    /// Numeric literal.
    Number,
    /// String literal (quotes included in the span).
    Str,
    /// Punctuation or operator, including composite tag tokens such as
    /// `<div`, `</div`, `{{`.
    Punct,
    /// A comment of the given style.
    Comment(CommentStyle),
}

impl TokenKind {
    /// Check if this is a comment of any style.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }
}

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// The file's token stream: code tokens and comments in source order.
///
/// Invariant: tokens are pushed in ascending span order. Span queries rely
/// on it for binary search.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty list.
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Append a token, returning its id.
    ///
    /// Tokens must arrive in source order.
    pub fn push(&mut self, token: Token) -> TokenId {
        debug_assert!(
            self.tokens
                .last()
                .map_or(true, |prev| prev.span.start <= token.span.start),
            "tokens must be pushed in source order"
        );
        let id = TokenId::from_usize(self.tokens.len());
        self.tokens.push(token);
        id
    }

    /// Get a token by id.
    ///
    /// # Panics
    /// Panics if the id belongs to a different file's list.
    #[inline]
    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Number of tokens (comments included).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate all tokens with their ids, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (TokenId::from_usize(i), t))
    }

    /// Ids of all tokens whose span starts inside `span`, in source order.
    pub fn in_span(&self, span: Span) -> impl Iterator<Item = TokenId> + '_ {
        let lo = self.tokens.partition_point(|t| t.span.start < span.start);
        let hi = self.tokens.partition_point(|t| t.span.start < span.end);
        (lo..hi).map(TokenId::from_usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list() -> TokenList {
        let mut list = TokenList::new();
        list.push(Token::new(TokenKind::Word, Span::new(0, 2)));
        list.push(Token::new(TokenKind::Punct, Span::new(3, 4)));
        list.push(Token::new(
            TokenKind::Comment(CommentStyle::Line),
            Span::new(5, 10),
        ));
        list.push(Token::new(TokenKind::Number, Span::new(11, 13)));
        list
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let list = list();
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(TokenId::new(1)).kind, TokenKind::Punct);
    }

    #[test]
    fn in_span_selects_by_start() {
        let list = list();
        let ids: Vec<_> = list.in_span(Span::new(3, 11)).collect();
        assert_eq!(ids, vec![TokenId::new(1), TokenId::new(2)]);
    }

    #[test]
    fn in_span_empty_range() {
        let list = list();
        assert_eq!(list.in_span(Span::new(20, 30)).count(), 0);
    }

    #[test]
    fn comment_detection() {
        assert!(TokenKind::Comment(CommentStyle::Block).is_comment());
        assert!(!TokenKind::Punct.is_comment());
    }

    #[test]
    fn token_id_debug_is_compact() {
        assert_eq!(format!("{:?}", TokenId::new(7)), "t7");
    }
}
