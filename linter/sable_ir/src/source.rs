//! Per-file query facade.
//!
//! `SourceFile` bundles the text, token stream, syntax tree, and line table
//! of one file and exposes the queries the lint engine is specified against:
//! tokens of a node, first/last token, neighbor tokens, token text, and
//! line/column translation. Nothing here mutates; a `SourceFile` is built
//! once by a producer and read for the duration of one analysis.

use crate::{LineTable, NodeId, Span, SyntaxTree, Token, TokenId, TokenList};

/// One analyzed file: text, tokens, tree, line table.
#[derive(Debug)]
pub struct SourceFile {
    text: String,
    tokens: TokenList,
    tree: SyntaxTree,
    lines: LineTable,
}

impl SourceFile {
    /// Bundle producer output into a query facade.
    pub fn new(text: String, tokens: TokenList, tree: SyntaxTree) -> Self {
        let lines = LineTable::build(&text);
        SourceFile {
            text,
            tokens,
            tree,
            lines,
        }
    }

    /// The raw file text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token stream (comments included).
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// The syntax tree.
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The line table.
    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    /// Get a token by id.
    #[inline]
    pub fn token(&self, id: TokenId) -> &Token {
        self.tokens.get(id)
    }

    /// The token's source text.
    #[inline]
    pub fn token_text(&self, id: TokenId) -> &str {
        &self.text[self.token(id).span.to_range()]
    }

    /// Code tokens of a node (comments excluded), in source order.
    pub fn tokens_of(&self, node: NodeId) -> impl Iterator<Item = TokenId> + '_ {
        let span = self.tree.node(node).span;
        self.tokens
            .in_span(span)
            .filter(|id| !self.token(*id).kind.is_comment())
    }

    /// All tokens of a node, comments included.
    pub fn tokens_of_with_comments(&self, node: NodeId) -> impl Iterator<Item = TokenId> + '_ {
        let span = self.tree.node(node).span;
        self.tokens.in_span(span)
    }

    /// First code token of a node.
    pub fn first_token_of(&self, node: NodeId) -> Option<TokenId> {
        self.tokens_of(node).next()
    }

    /// Last code token of a node.
    pub fn last_token_of(&self, node: NodeId) -> Option<TokenId> {
        self.tokens_of(node).last()
    }

    /// The code token immediately after `id`, skipping comments.
    pub fn token_after(&self, id: TokenId) -> Option<TokenId> {
        let mut index = id.index() + 1;
        while index < self.tokens.len() {
            let candidate = TokenId::from_usize(index);
            if !self.token(candidate).kind.is_comment() {
                return Some(candidate);
            }
            index += 1;
        }
        None
    }

    /// The code token immediately before `id`, skipping comments.
    pub fn token_before(&self, id: TokenId) -> Option<TokenId> {
        let mut index = id.index();
        while index > 0 {
            index -= 1;
            let candidate = TokenId::from_usize(index);
            if !self.token(candidate).kind.is_comment() {
                return Some(candidate);
            }
        }
        None
    }

    /// 1-based line on which the token starts.
    #[inline]
    pub fn line_of(&self, id: TokenId) -> u32 {
        self.lines.line_of(self.token(id).span.start)
    }

    /// 1-based line on which the token ends.
    #[inline]
    pub fn end_line_of(&self, id: TokenId) -> u32 {
        let span = self.token(id).span;
        self.lines.line_of(span.end.saturating_sub(1).max(span.start))
    }

    /// 0-based character column of the token start.
    #[inline]
    pub fn col_of(&self, id: TokenId) -> u32 {
        self.lines.line_col_of(&self.text, self.token(id).span.start).1
    }

    /// Translate (1-based line, 0-based column) to a byte offset.
    pub fn offset_at(&self, line: u32, col: u32) -> Option<u32> {
        self.lines.offset_of(&self.text, line, col)
    }

    /// Byte span of a node.
    #[inline]
    pub fn span_of(&self, node: NodeId) -> Span {
        self.tree.node(node).span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommentStyle, NodeKind, TokenKind};
    use pretty_assertions::assert_eq;

    /// `x = 1; /* c */ y;` with a node over `y;`
    fn file() -> (SourceFile, NodeId) {
        let text = "x = 1; /* c */ y;".to_string();
        let mut tokens = TokenList::new();
        tokens.push(Token::new(TokenKind::Word, Span::new(0, 1)));
        tokens.push(Token::new(TokenKind::Punct, Span::new(2, 3)));
        tokens.push(Token::new(TokenKind::Number, Span::new(4, 5)));
        tokens.push(Token::new(TokenKind::Punct, Span::new(5, 6)));
        tokens.push(Token::new(
            TokenKind::Comment(CommentStyle::Block),
            Span::new(7, 14),
        ));
        tokens.push(Token::new(TokenKind::Word, Span::new(15, 16)));
        tokens.push(Token::new(TokenKind::Punct, Span::new(16, 17)));

        let mut tree = SyntaxTree::new();
        let root = tree.push(NodeKind::Program, Span::new(0, 17));
        let stmt = tree.push(NodeKind::ExpressionStatement, Span::new(15, 17));
        tree.attach(root, stmt);
        tree.set_root(root);

        (SourceFile::new(text, tokens, tree), stmt)
    }

    #[test]
    fn tokens_of_excludes_comments() {
        let (file, stmt) = file();
        let Some(root) = file.tree().root() else {
            panic!("no root")
        };
        assert_eq!(file.tokens_of(root).count(), 6);
        assert_eq!(file.tokens_of_with_comments(root).count(), 7);
        assert_eq!(file.first_token_of(stmt), Some(TokenId::new(5)));
        assert_eq!(file.last_token_of(stmt), Some(TokenId::new(6)));
    }

    #[test]
    fn neighbors_skip_comments() {
        let (file, _) = file();
        // token after `;` (index 3) skips the block comment to `y`
        assert_eq!(file.token_after(TokenId::new(3)), Some(TokenId::new(5)));
        // token before `y` skips the comment back to `;`
        assert_eq!(file.token_before(TokenId::new(5)), Some(TokenId::new(3)));
        assert_eq!(file.token_before(TokenId::new(0)), None);
        assert_eq!(file.token_after(TokenId::new(6)), None);
    }

    #[test]
    fn positions() {
        let (file, _) = file();
        assert_eq!(file.line_of(TokenId::new(5)), 1);
        assert_eq!(file.col_of(TokenId::new(5)), 15);
        assert_eq!(file.token_text(TokenId::new(5)), "y");
        assert_eq!(file.offset_at(1, 15), Some(15));
    }
}
