//! Fixture producer for tests.
//!
//! Builds a [`SourceFile`] from a small but real subset of the Sable format,
//! so downstream test suites can write sources as plain strings instead of
//! hand-assembling token lists and trees. This module is test tooling: it is
//! only compiled under the `test-support` feature, is not part of the shipped
//! producer interface, and panics on malformed input.
//!
//! # Supported subset
//!
//! - Markup: elements, attributes (plain and `:`/`@`-prefixed, values as
//!   single string tokens), `{{ ... }}` interpolations, text chunks,
//!   `<!-- -->` comments, self-closing tags.
//! - Script (top-level files and `<script>` element content): blocks,
//!   `if`/`else`, `while`, `for (let x in y)`, `switch`/`case`/`default`,
//!   `return`/`break`/`continue`, `let`/`const`, expression statements;
//!   expressions with assignment, ternary, binary operators, unary
//!   operators, calls, member access, arrays, objects, parens, and arrow
//!   functions.
//! - An interpolation's expression must not contain the characters `}}`
//!   without intervening space; `<script>` content must not contain the
//!   text `</script` outside of its closing tag.

use logos::Logos;

use crate::{
    CommentStyle, NodeId, NodeKind, SourceFile, Span, SyntaxTree, Token, TokenKind, TokenList,
};

/// Parse fixture source into a [`SourceFile`].
///
/// # Panics
/// Panics on input outside the supported subset.
pub fn parse(source: &str) -> SourceFile {
    let tokens = Lexer::new(source).lex();
    let tree = Parser::new(source, &tokens).parse_file();
    let mut list = TokenList::new();
    for token in &tokens {
        list.push(*token);
    }
    SourceFile::new(source.to_string(), list, tree)
}

// Lexing

/// Raw script token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum ScriptToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    /// Identifiers and keywords; the parser tells them apart by text.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Str,

    #[token("===")]
    #[token("!==")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("=>")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[regex(r"[()\[\]{};,.:?=<>+\-*/%!&|]")]
    Punct,
}

fn script_token_kind(token: ScriptToken) -> TokenKind {
    match token {
        ScriptToken::LineComment => TokenKind::Comment(CommentStyle::Line),
        ScriptToken::BlockComment => TokenKind::Comment(CommentStyle::Block),
        ScriptToken::Ident => TokenKind::Word,
        ScriptToken::Number => TokenKind::Number,
        ScriptToken::Str => TokenKind::Str,
        ScriptToken::Punct => TokenKind::Punct,
    }
}

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Lexer {
            src,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self
            .rest()
            .trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
        self.pos = self.src.len() - trimmed.len();
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token::new(kind, Span::from_range(start..end)));
    }

    fn lex(mut self) -> Vec<Token> {
        self.skip_ws();
        if self.rest().starts_with('<') {
            self.lex_markup();
        } else {
            self.lex_script_range(self.pos, self.src.len());
        }
        self.tokens
    }

    fn lex_markup(&mut self) {
        loop {
            self.skip_ws();
            if self.pos >= self.src.len() {
                break;
            }
            let rest = self.rest();
            if rest.starts_with("<!--") {
                let Some(rel) = rest.find("-->") else {
                    panic!("fixture: unterminated markup comment at byte {}", self.pos)
                };
                let end = self.pos + rel + 3;
                self.push(TokenKind::Comment(CommentStyle::Markup), self.pos, end);
                self.pos = end;
            } else if rest.starts_with("</") {
                self.lex_end_tag();
            } else if rest.starts_with('<') {
                self.lex_start_tag();
            } else if rest.starts_with("{{") {
                self.lex_interpolation();
            } else {
                self.lex_text_chunk();
            }
        }
    }

    /// Advance over a tag or attribute name: `[A-Za-z0-9_-]*`.
    fn scan_name(&mut self) {
        let trimmed = self
            .rest()
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        self.pos = self.src.len() - trimmed.len();
    }

    fn lex_end_tag(&mut self) {
        let start = self.pos;
        self.pos += 2; // `</`
        self.scan_name();
        self.push(TokenKind::Punct, start, self.pos);
        self.skip_ws();
        if self.rest().starts_with('>') {
            let s = self.pos;
            self.pos += 1;
            self.push(TokenKind::Punct, s, self.pos);
        } else {
            panic!("fixture: expected `>` to close end tag at byte {}", self.pos);
        }
    }

    fn lex_start_tag(&mut self) {
        let src = self.src;
        let start = self.pos;
        self.pos += 1; // `<`
        let name_start = self.pos;
        self.scan_name();
        let name = &src[name_start..self.pos];
        self.push(TokenKind::Punct, start, self.pos);
        let self_closing = self.lex_attrs();
        if !self_closing && name == "script" {
            let content_start = self.pos;
            let Some(rel) = self.rest().find("</script") else {
                panic!("fixture: missing </script> for tag at byte {start}")
            };
            self.lex_script_range(content_start, content_start + rel);
            self.pos = content_start + rel;
        }
    }

    /// Lex attributes up to and including `>` or `/>`; returns true for `/>`.
    fn lex_attrs(&mut self) -> bool {
        loop {
            self.skip_ws();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.push(TokenKind::Punct, self.pos, self.pos + 2);
                self.pos += 2;
                return true;
            }
            if rest.starts_with('>') {
                self.push(TokenKind::Punct, self.pos, self.pos + 1);
                self.pos += 1;
                return false;
            }
            let Some(c) = rest.chars().next() else {
                panic!("fixture: unterminated start tag")
            };
            if c == '=' {
                self.push(TokenKind::Punct, self.pos, self.pos + 1);
                self.pos += 1;
            } else if c == '"' {
                let Some(rel) = rest[1..].find('"') else {
                    panic!("fixture: unterminated attribute value at byte {}", self.pos)
                };
                let end = self.pos + rel + 2;
                self.push(TokenKind::Str, self.pos, end);
                self.pos = end;
            } else if c == ':' || c == '@' || c.is_ascii_alphabetic() {
                let start = self.pos;
                if c == ':' || c == '@' {
                    self.pos += 1;
                }
                self.scan_name();
                self.push(TokenKind::Word, start, self.pos);
            } else {
                panic!("fixture: unexpected {c:?} in start tag at byte {}", self.pos);
            }
        }
    }

    fn lex_interpolation(&mut self) {
        let start = self.pos;
        self.pos += 2;
        self.push(TokenKind::Punct, start, self.pos); // `{{`
        let inner_start = self.pos;
        let Some(rel) = self.rest().find("}}") else {
            panic!("fixture: unterminated interpolation at byte {start}")
        };
        self.lex_script_range(inner_start, inner_start + rel);
        let close = inner_start + rel;
        self.pos = close + 2;
        self.push(TokenKind::Punct, close, self.pos); // `}}`
    }

    fn lex_text_chunk(&mut self) {
        let start = self.pos;
        for (i, ch) in self.rest().char_indices() {
            let at_mustache = ch == '{' && self.src[self.pos + i..].starts_with("{{");
            if ch.is_whitespace() || ch == '<' || at_mustache {
                break;
            }
            self.pos = start + i + ch.len_utf8();
        }
        if self.pos == start {
            panic!("fixture: stuck on {:?} at byte {start}", self.rest().chars().next());
        }
        self.push(TokenKind::Word, start, self.pos);
    }

    fn lex_script_range(&mut self, start: usize, end: usize) {
        let mut lexer = ScriptToken::lexer(&self.src[start..end]);
        loop {
            let Some(result) = lexer.next() else { break };
            let span = lexer.span();
            match result {
                Ok(token) => {
                    self.push(script_token_kind(token), start + span.start, start + span.end);
                }
                Err(()) => panic!(
                    "fixture: unexpected script character at byte {}",
                    start + span.start
                ),
            }
        }
    }
}

// Parsing

struct Parser<'s> {
    src: &'s str,
    tokens: &'s [Token],
    tree: SyntaxTree,
    pos: usize,
    last_end: u32,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str, tokens: &'s [Token]) -> Self {
        Parser {
            src,
            tokens,
            tree: SyntaxTree::new(),
            pos: 0,
            last_end: 0,
        }
    }

    fn text_at(&self, index: usize) -> &'s str {
        &self.src[self.tokens[index].span.to_range()]
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind.is_comment())
        {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<&'s str> {
        self.skip_trivia();
        (self.pos < self.tokens.len()).then(|| self.text_at(self.pos))
    }

    /// Text of the code token after the next one.
    fn peek2(&mut self) -> Option<&'s str> {
        self.skip_trivia();
        let mut index = self.pos + 1;
        while self
            .tokens
            .get(index)
            .is_some_and(|t| t.kind.is_comment())
        {
            index += 1;
        }
        (index < self.tokens.len()).then(|| self.text_at(index))
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.skip_trivia();
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&mut self, text: &str) -> bool {
        self.peek() == Some(text)
    }

    fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    fn bump(&mut self) -> usize {
        self.skip_trivia();
        if self.pos >= self.tokens.len() {
            panic!("fixture: unexpected end of input");
        }
        let index = self.pos;
        self.pos += 1;
        self.last_end = self.tokens[index].span.end;
        index
    }

    fn expect(&mut self, text: &str) -> usize {
        let found = self.peek();
        if found == Some(text) {
            self.bump()
        } else {
            panic!("fixture: expected {text:?}, found {found:?}")
        }
    }

    /// Start offset of the next code token.
    fn start_span(&mut self) -> u32 {
        self.skip_trivia();
        let Some(token) = self.tokens.get(self.pos) else {
            panic!("fixture: unexpected end of input")
        };
        token.span.start
    }

    fn finish(&mut self, node: NodeId, start: u32) {
        self.tree.set_span(node, Span::new(start, self.last_end));
    }

    fn parse_file(mut self) -> SyntaxTree {
        if self.at_end() {
            let root = self.tree.push(NodeKind::Program, Span::point(0));
            self.tree.set_root(root);
            return self.tree;
        }
        let markup = self.peek().is_some_and(|t| t.starts_with('<'));
        let start = self.start_span();
        let root = if markup {
            let doc = self.tree.push(NodeKind::Document, Span::point(start));
            while !self.at_end() {
                let child = self.parse_markup_node();
                self.tree.attach(doc, child);
            }
            self.finish(doc, start);
            doc
        } else {
            let prog = self.tree.push(NodeKind::Program, Span::point(start));
            while !self.at_end() {
                let stmt = self.parse_statement();
                self.tree.attach(prog, stmt);
            }
            self.finish(prog, start);
            prog
        };
        self.tree.set_root(root);
        self.tree
    }

    // Markup

    fn parse_markup_node(&mut self) -> NodeId {
        let Some(text) = self.peek() else {
            panic!("fixture: expected markup content")
        };
        if text.starts_with("</") {
            panic!("fixture: unmatched end tag {text:?}");
        }
        if text.starts_with('<') {
            self.parse_element()
        } else if text == "{{" {
            self.parse_interpolation()
        } else {
            let index = self.bump();
            self.tree.push(NodeKind::Text, self.tokens[index].span)
        }
    }

    fn parse_element(&mut self) -> NodeId {
        let start = self.start_span();
        let open = self.bump(); // `<name`
        let name = &self.text_at(open)[1..];
        let element = self.tree.push(NodeKind::Element, Span::point(start));
        let start_tag = self.tree.push(NodeKind::StartTag, Span::point(start));
        self.tree.attach(element, start_tag);

        loop {
            let Some(text) = self.peek() else {
                panic!("fixture: unterminated start tag for <{name}>")
            };
            match text {
                "/>" => {
                    self.bump();
                    self.finish(start_tag, start);
                    self.finish(element, start);
                    return element;
                }
                ">" => {
                    self.bump();
                    break;
                }
                _ => {
                    let attr = self.parse_attribute();
                    self.tree.attach(start_tag, attr);
                }
            }
        }
        self.finish(start_tag, start);

        if name == "script" {
            let program = self.parse_script_contents();
            self.tree.attach(element, program);
        } else {
            loop {
                let Some(text) = self.peek() else {
                    panic!("fixture: missing </{name}>")
                };
                if text.starts_with("</") {
                    break;
                }
                let child = self.parse_markup_node();
                self.tree.attach(element, child);
            }
        }

        let end_start = self.start_span();
        let end_tag = self.tree.push(NodeKind::EndTag, Span::point(end_start));
        self.bump(); // `</name`
        self.expect(">");
        self.finish(end_tag, end_start);
        self.tree.attach(element, end_tag);
        self.finish(element, start);
        element
    }

    fn parse_attribute(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::Attribute, Span::point(start));
        self.bump(); // name
        if self.at("=") {
            self.bump();
            self.bump(); // value string
        }
        self.finish(node, start);
        node
    }

    fn parse_interpolation(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::Interpolation, Span::point(start));
        self.expect("{{");
        let expr = self.parse_expr();
        self.tree.attach(node, expr);
        self.expect("}}");
        self.finish(node, start);
        node
    }

    fn parse_script_contents(&mut self) -> NodeId {
        let start = self.start_span();
        let program = self.tree.push(NodeKind::Program, Span::point(start));
        let mut any = false;
        while !self.peek().map_or(true, |t| t.starts_with("</")) {
            let stmt = self.parse_statement();
            self.tree.attach(program, stmt);
            any = true;
        }
        if any {
            self.finish(program, start);
        }
        program
    }

    // Statements

    fn parse_statement(&mut self) -> NodeId {
        let Some(text) = self.peek() else {
            panic!("fixture: expected statement")
        };
        match text {
            "{" => self.parse_block(),
            "if" => self.parse_if(),
            "for" => self.parse_for(),
            "while" => self.parse_while(),
            "switch" => self.parse_switch(),
            "return" => self.parse_return(),
            "break" | "continue" => self.parse_jump(text == "break"),
            "let" | "const" => self.parse_var_decl(),
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_block(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::BlockStatement, Span::point(start));
        self.expect("{");
        while !self.at("}") {
            let stmt = self.parse_statement();
            self.tree.attach(node, stmt);
        }
        self.expect("}");
        self.finish(node, start);
        node
    }

    fn parse_if(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::IfStatement, Span::point(start));
        self.expect("if");
        self.expect("(");
        let cond = self.parse_expr();
        self.tree.attach(node, cond);
        self.expect(")");
        let consequent = self.parse_statement();
        self.tree.attach(node, consequent);
        if self.at("else") {
            self.bump();
            let alternate = self.parse_statement();
            self.tree.attach(node, alternate);
        }
        self.finish(node, start);
        node
    }

    fn parse_while(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::WhileStatement, Span::point(start));
        self.expect("while");
        self.expect("(");
        let cond = self.parse_expr();
        self.tree.attach(node, cond);
        self.expect(")");
        let body = self.parse_statement();
        self.tree.attach(node, body);
        self.finish(node, start);
        node
    }

    fn parse_for(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::ForStatement, Span::point(start));
        self.expect("for");
        self.expect("(");
        if self.at("let") || self.at("const") {
            let decl_start = self.start_span();
            let decl = self
                .tree
                .push(NodeKind::VariableDeclaration, Span::point(decl_start));
            self.bump();
            let name = self.bump();
            let ident = self.tree.push(NodeKind::Identifier, self.tokens[name].span);
            self.tree.attach(decl, ident);
            self.finish(decl, decl_start);
            self.tree.attach(node, decl);
        } else {
            let init = self.parse_expr();
            self.tree.attach(node, init);
        }
        self.expect("in");
        let object = self.parse_expr();
        self.tree.attach(node, object);
        self.expect(")");
        let body = self.parse_statement();
        self.tree.attach(node, body);
        self.finish(node, start);
        node
    }

    fn parse_switch(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::SwitchStatement, Span::point(start));
        self.expect("switch");
        self.expect("(");
        let disc = self.parse_expr();
        self.tree.attach(node, disc);
        self.expect(")");
        self.expect("{");
        while self.at("case") || self.at("default") {
            let case_start = self.start_span();
            let case = self.tree.push(NodeKind::SwitchCase, Span::point(case_start));
            if self.at("case") {
                self.bump();
                let test = self.parse_expr();
                self.tree.attach(case, test);
            } else {
                self.bump(); // default
            }
            self.expect(":");
            while !(self.at("case") || self.at("default") || self.at("}")) {
                let stmt = self.parse_statement();
                self.tree.attach(case, stmt);
            }
            self.finish(case, case_start);
            self.tree.attach(node, case);
        }
        self.expect("}");
        self.finish(node, start);
        node
    }

    fn parse_return(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::ReturnStatement, Span::point(start));
        self.expect("return");
        let terminated = self
            .peek()
            .map_or(true, |t| t == ";" || t == "}" || t.starts_with("</"));
        if !terminated {
            let argument = self.parse_expr();
            self.tree.attach(node, argument);
        }
        if self.at(";") {
            self.bump();
        }
        self.finish(node, start);
        node
    }

    fn parse_jump(&mut self, is_break: bool) -> NodeId {
        let start = self.start_span();
        let kind = if is_break {
            NodeKind::BreakStatement
        } else {
            NodeKind::ContinueStatement
        };
        let node = self.tree.push(kind, Span::point(start));
        self.bump();
        if self.at(";") {
            self.bump();
        }
        self.finish(node, start);
        node
    }

    fn parse_var_decl(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self
            .tree
            .push(NodeKind::VariableDeclaration, Span::point(start));
        self.bump(); // let / const
        loop {
            let name = self.bump();
            let ident = self.tree.push(NodeKind::Identifier, self.tokens[name].span);
            self.tree.attach(node, ident);
            if self.at("=") {
                self.bump();
                let init = self.parse_assign();
                self.tree.attach(node, init);
            }
            if self.at(",") {
                self.bump();
            } else {
                break;
            }
        }
        if self.at(";") {
            self.bump();
        }
        self.finish(node, start);
        node
    }

    fn parse_expr_statement(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self
            .tree
            .push(NodeKind::ExpressionStatement, Span::point(start));
        let expr = self.parse_expr();
        self.tree.attach(node, expr);
        if self.at(";") {
            self.bump();
        }
        self.finish(node, start);
        node
    }

    // Expressions

    fn parse_expr(&mut self) -> NodeId {
        self.parse_assign()
    }

    fn parse_assign(&mut self) -> NodeId {
        let start = self.start_span();
        let left = self.parse_ternary();
        if matches!(self.peek(), Some("=" | "+=" | "-=" | "*=" | "/=")) {
            let node = self
                .tree
                .push(NodeKind::AssignmentExpression, Span::point(start));
            self.tree.attach(node, left);
            self.bump();
            let right = self.parse_assign();
            self.tree.attach(node, right);
            self.finish(node, start);
            return node;
        }
        left
    }

    fn parse_ternary(&mut self) -> NodeId {
        let start = self.start_span();
        let test = self.parse_binary(0);
        if self.at("?") {
            let node = self
                .tree
                .push(NodeKind::ConditionalExpression, Span::point(start));
            self.tree.attach(node, test);
            self.bump();
            let consequent = self.parse_assign();
            self.tree.attach(node, consequent);
            self.expect(":");
            let alternate = self.parse_assign();
            self.tree.attach(node, alternate);
            self.finish(node, start);
            return node;
        }
        test
    }

    fn parse_binary(&mut self, min_prec: u8) -> NodeId {
        let start = self.start_span();
        let mut left = self.parse_unary();
        while let Some(prec) = self.peek().and_then(binary_prec) {
            if prec < min_prec {
                break;
            }
            let node = self
                .tree
                .push(NodeKind::BinaryExpression, Span::point(start));
            self.tree.attach(node, left);
            self.bump();
            let right = self.parse_binary(prec + 1);
            self.tree.attach(node, right);
            self.finish(node, start);
            left = node;
        }
        left
    }

    fn parse_unary(&mut self) -> NodeId {
        if matches!(self.peek(), Some("!" | "-" | "+")) {
            let start = self.start_span();
            let node = self.tree.push(NodeKind::UnaryExpression, Span::point(start));
            self.bump();
            let operand = self.parse_unary();
            self.tree.attach(node, operand);
            self.finish(node, start);
            return node;
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> NodeId {
        let start = self.start_span();
        let mut expr = self.parse_primary();
        loop {
            match self.peek() {
                Some(".") => {
                    let node = self
                        .tree
                        .push(NodeKind::MemberExpression, Span::point(start));
                    self.tree.attach(node, expr);
                    self.bump();
                    let name = self.bump();
                    let prop = self.tree.push(NodeKind::Identifier, self.tokens[name].span);
                    self.tree.attach(node, prop);
                    self.finish(node, start);
                    expr = node;
                }
                Some("(") => {
                    let node = self.tree.push(NodeKind::CallExpression, Span::point(start));
                    self.tree.attach(node, expr);
                    self.bump();
                    while !self.at(")") {
                        let arg = self.parse_assign();
                        self.tree.attach(node, arg);
                        if self.at(",") {
                            self.bump();
                        }
                    }
                    self.expect(")");
                    self.finish(node, start);
                    expr = node;
                }
                Some("[") => {
                    let node = self
                        .tree
                        .push(NodeKind::MemberExpression, Span::point(start));
                    self.tree.attach(node, expr);
                    self.bump();
                    let index = self.parse_expr();
                    self.tree.attach(node, index);
                    self.expect("]");
                    self.finish(node, start);
                    expr = node;
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> NodeId {
        let Some(text) = self.peek() else {
            panic!("fixture: expected expression")
        };
        match text {
            "(" => {
                if self.arrow_ahead() {
                    self.parse_paren_arrow()
                } else {
                    let start = self.start_span();
                    let node = self.tree.push(NodeKind::ParenExpression, Span::point(start));
                    self.bump();
                    let inner = self.parse_expr();
                    self.tree.attach(node, inner);
                    self.expect(")");
                    self.finish(node, start);
                    node
                }
            }
            "[" => self.parse_array(),
            "{" => self.parse_object(),
            "true" | "false" | "null" => {
                let index = self.bump();
                self.tree.push(NodeKind::Literal, self.tokens[index].span)
            }
            _ => match self.peek_kind() {
                Some(TokenKind::Number | TokenKind::Str) => {
                    let index = self.bump();
                    self.tree.push(NodeKind::Literal, self.tokens[index].span)
                }
                Some(TokenKind::Word) => {
                    if self.peek2() == Some("=>") {
                        self.parse_ident_arrow()
                    } else {
                        let index = self.bump();
                        self.tree.push(NodeKind::Identifier, self.tokens[index].span)
                    }
                }
                other => panic!("fixture: unexpected token {text:?} ({other:?})"),
            },
        }
    }

    fn parse_array(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::ArrayExpression, Span::point(start));
        self.expect("[");
        while !self.at("]") {
            let element = self.parse_assign();
            self.tree.attach(node, element);
            if self.at(",") {
                self.bump();
            }
        }
        self.expect("]");
        self.finish(node, start);
        node
    }

    fn parse_object(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self
            .tree
            .push(NodeKind::ObjectExpression, Span::point(start));
        self.expect("{");
        while !self.at("}") {
            let prop_start = self.start_span();
            let prop = self.tree.push(NodeKind::Property, Span::point(prop_start));
            let key_index = self.bump();
            let key_kind = if self.tokens[key_index].kind == TokenKind::Str {
                NodeKind::Literal
            } else {
                NodeKind::Identifier
            };
            let key = self.tree.push(key_kind, self.tokens[key_index].span);
            self.tree.attach(prop, key);
            self.expect(":");
            let value = self.parse_assign();
            self.tree.attach(prop, value);
            self.finish(prop, prop_start);
            self.tree.attach(node, prop);
            if self.at(",") {
                self.bump();
            }
        }
        self.expect("}");
        self.finish(node, start);
        node
    }

    fn parse_ident_arrow(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::ArrowFunction, Span::point(start));
        let name = self.bump();
        let param = self.tree.push(NodeKind::Identifier, self.tokens[name].span);
        self.tree.attach(node, param);
        self.expect("=>");
        let body = if self.at("{") {
            self.parse_block()
        } else {
            self.parse_assign()
        };
        self.tree.attach(node, body);
        self.finish(node, start);
        node
    }

    fn parse_paren_arrow(&mut self) -> NodeId {
        let start = self.start_span();
        let node = self.tree.push(NodeKind::ArrowFunction, Span::point(start));
        self.expect("(");
        while !self.at(")") {
            let name = self.bump();
            let param = self.tree.push(NodeKind::Identifier, self.tokens[name].span);
            self.tree.attach(node, param);
            if self.at(",") {
                self.bump();
            }
        }
        self.expect(")");
        self.expect("=>");
        let body = if self.at("{") {
            self.parse_block()
        } else {
            self.parse_assign()
        };
        self.tree.attach(node, body);
        self.finish(node, start);
        node
    }

    /// From a `(`, check whether the matching `)` is followed by `=>`.
    fn arrow_ahead(&mut self) -> bool {
        self.skip_trivia();
        let mut depth = 0usize;
        let mut index = self.pos;
        while index < self.tokens.len() {
            if self.tokens[index].kind.is_comment() {
                index += 1;
                continue;
            }
            match self.text_at(index) {
                "(" => depth += 1,
                ")" => {
                    depth -= 1;
                    if depth == 0 {
                        let mut next = index + 1;
                        while self
                            .tokens
                            .get(next)
                            .is_some_and(|t| t.kind.is_comment())
                        {
                            next += 1;
                        }
                        return next < self.tokens.len() && self.text_at(next) == "=>";
                    }
                }
                _ => {}
            }
            index += 1;
        }
        false
    }
}

fn binary_prec(op: &str) -> Option<u8> {
    Some(match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "===" | "!==" => 3,
        "<" | ">" | "<=" | ">=" => 4,
        "+" | "-" => 5,
        "*" | "/" | "%" => 6,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(file: &SourceFile) -> Vec<TokenKind> {
        file.tokens().iter().map(|(_, t)| t.kind).collect()
    }

    fn texts(file: &SourceFile) -> Vec<&str> {
        file.tokens()
            .iter()
            .map(|(id, _)| file.token_text(id))
            .collect()
    }

    #[test]
    fn lexes_script_file() {
        let file = parse("if (x) {\n  y = 1;\n}\n");
        assert_eq!(
            texts(&file),
            vec!["if", "(", "x", ")", "{", "y", "=", "1", ";", "}"]
        );
        assert_eq!(kinds(&file)[7], TokenKind::Number);
    }

    #[test]
    fn lexes_markup_file() {
        let file = parse("<div class=\"a\">\n  {{ msg }}\n</div>\n");
        assert_eq!(
            texts(&file),
            vec!["<div", "class", "=", "\"a\"", ">", "{{", "msg", "}}", "</div", ">"]
        );
    }

    #[test]
    fn script_root_shape() {
        let file = parse("if (x) {\n  y = 1;\n}\n");
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        assert_eq!(tree.node(root).kind, NodeKind::Program);
        let [stmt] = tree.children(root) else {
            panic!("expected one statement")
        };
        assert_eq!(tree.node(*stmt).kind, NodeKind::IfStatement);
        let children = tree.children(*stmt);
        assert_eq!(tree.node(children[0]).kind, NodeKind::Identifier);
        assert_eq!(tree.node(children[1]).kind, NodeKind::BlockStatement);
    }

    #[test]
    fn markup_root_shape() {
        let file = parse("<div>\n  <span a=\"1\"/>\n</div>\n");
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        assert_eq!(tree.node(root).kind, NodeKind::Document);
        let [element] = tree.children(root) else {
            panic!("expected one element")
        };
        let children = tree.children(*element);
        assert_eq!(tree.node(children[0]).kind, NodeKind::StartTag);
        assert_eq!(tree.node(children[1]).kind, NodeKind::Element);
        assert_eq!(tree.node(children[2]).kind, NodeKind::EndTag);
        // the inner element is self-closing: start tag only
        let inner = tree.children(children[1]);
        assert_eq!(inner.len(), 1);
        let attrs = tree.children(inner[0]);
        assert_eq!(attrs.len(), 1);
        assert_eq!(tree.node(attrs[0]).kind, NodeKind::Attribute);
    }

    #[test]
    fn script_element_contains_program() {
        let file = parse("<script>\nlet x = 1;\n</script>\n");
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        let [element] = tree.children(root) else {
            panic!("expected one element")
        };
        let children = tree.children(*element);
        assert_eq!(tree.node(children[1]).kind, NodeKind::Program);
        let [decl] = tree.children(children[1]) else {
            panic!("expected one declaration")
        };
        assert_eq!(tree.node(*decl).kind, NodeKind::VariableDeclaration);
    }

    #[test]
    fn comments_are_tokens_not_nodes() {
        let file = parse("// note\nx = 1;\n");
        let comment_count = file
            .tokens()
            .iter()
            .filter(|(_, t)| t.kind.is_comment())
            .count();
        assert_eq!(comment_count, 1);
        let Some(root) = file.tree().root() else {
            panic!("no root")
        };
        assert_eq!(file.tree().node(root).kind, NodeKind::Program);
    }

    #[test]
    fn member_call_chain_shape() {
        let file = parse("a.b(c)[d];\n");
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        let [stmt] = tree.children(root) else {
            panic!("expected one statement")
        };
        let [expr] = tree.children(*stmt) else {
            panic!("expected one expression")
        };
        // outermost is the computed member access
        assert_eq!(tree.node(*expr).kind, NodeKind::MemberExpression);
        let children = tree.children(*expr);
        assert_eq!(tree.node(children[0]).kind, NodeKind::CallExpression);
    }

    #[test]
    fn arrow_function_shapes() {
        let file = parse("f(x => x + 1);\ng((a, b) => { return a; });\n");
        let arrows = (0..file.tree().len())
            .filter(|i| file.tree().node(NodeId::from_usize(*i)).kind == NodeKind::ArrowFunction)
            .count();
        assert_eq!(arrows, 2);
    }

    #[test]
    fn switch_shape() {
        let file = parse("switch (x) {\ncase 1:\n  break;\ndefault:\n  y = 2;\n}\n");
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        let [stmt] = tree.children(root) else {
            panic!("expected one statement")
        };
        let children = tree.children(*stmt);
        // discriminant + two cases
        assert_eq!(children.len(), 3);
        assert_eq!(tree.node(children[1]).kind, NodeKind::SwitchCase);
        assert_eq!(tree.node(children[2]).kind, NodeKind::SwitchCase);
    }

    #[test]
    fn spans_cover_constructs() {
        let src = "while (a) { b(); }\n";
        let file = parse(src);
        let tree = file.tree();
        let Some(root) = tree.root() else {
            panic!("no root")
        };
        let [stmt] = tree.children(root) else {
            panic!("expected one statement")
        };
        assert_eq!(tree.node(*stmt).span.to_range(), 0..18);
    }
}
