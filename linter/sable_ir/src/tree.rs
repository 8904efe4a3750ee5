//! Syntax tree with a closed node vocabulary.
//!
//! Producers hand the engine an arena-allocated tree of typed nodes. The
//! node vocabulary is a closed enum covering both Sable grammars — markup
//! and embedded script — plus [`NodeKind::Unknown`] for producer node types
//! this version does not recognize. Consumers dispatch with a single match
//! and a default arm, so an unknown type can never make dispatch fail.

use std::fmt;

use crate::Span;

/// Identity of a node within its [`SyntaxTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Create from a `usize` index.
    ///
    /// # Panics
    /// Panics if the index exceeds `u32::MAX`.
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        let Ok(raw) = u32::try_from(index) else {
            panic!("node index {index} exceeds u32::MAX")
        };
        NodeId(raw)
    }

    /// Index into the owning [`SyntaxTree`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Node types of both Sable grammars.
///
/// Markup kinds first, then script kinds. `Unknown` carries the producer's
/// raw type name for diagnostics and selector matching.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    // Markup grammar
    /// Whole-file root when the file is markup-led.
    Document,
    /// An element: start tag, content, optional end tag.
    Element,
    /// `<name attr="v" ...>` or `<name ... />`.
    StartTag,
    /// `</name>`.
    EndTag,
    /// A single attribute inside a start tag.
    Attribute,
    /// `{{ expression }}` in element content.
    Interpolation,
    /// A run of literal text in element content.
    Text,

    // Script grammar
    /// A statement sequence: whole-file root of a script-led file, or the
    /// contents of a `<script>` element.
    Program,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    SwitchStatement,
    SwitchCase,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    VariableDeclaration,
    CallExpression,
    MemberExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    BinaryExpression,
    UnaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    ParenExpression,
    ArrowFunction,
    Identifier,
    Literal,

    /// A producer node type this vocabulary does not cover.
    Unknown(Box<str>),
}

impl NodeKind {
    /// The node-type name, as used by ignore selectors.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Element => "Element",
            NodeKind::StartTag => "StartTag",
            NodeKind::EndTag => "EndTag",
            NodeKind::Attribute => "Attribute",
            NodeKind::Interpolation => "Interpolation",
            NodeKind::Text => "Text",
            NodeKind::Program => "Program",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::ConditionalExpression => "ConditionalExpression",
            NodeKind::ParenExpression => "ParenExpression",
            NodeKind::ArrowFunction => "ArrowFunction",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::Unknown(name) => name,
        }
    }
}

/// A tree node.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Child nodes in source order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-allocated syntax tree.
///
/// Producers build it with [`push`](SyntaxTree::push) / [`attach`](SyntaxTree::attach) /
/// [`set_span`](SyntaxTree::set_span) and finally [`set_root`](SyntaxTree::set_root);
/// consumers only read.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        SyntaxTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Allocate a detached node.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Attach `child` as the next child of `parent`.
    ///
    /// Children must be attached in source order; a node is attached at most
    /// once.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.index()].parent.is_none(),
            "node attached twice"
        );
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Update a node's span (producers finalize spans after parsing children).
    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    /// Declare the root node.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// The root node, if the tree is non-empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by id.
    ///
    /// # Panics
    /// Panics if the id belongs to a different tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Child nodes of `id` in source order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
