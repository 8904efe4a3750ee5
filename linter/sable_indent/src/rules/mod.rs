//! Node visitor rules.
//!
//! Two independently maintained rule sets, one per grammar: [`markup`] for
//! elements, attributes, and interpolations, [`script`] for the embedded
//! statement/expression grammar. Each is a single closed match over
//! [`NodeKind`]; a kind neither set claims falls through to the engine's
//! defensive ignore on node exit.
//!
//! Every nesting behavior of the language is one arm here — block bodies,
//! tag attributes, case labels, member chains, interpolation bodies — not
//! logic scattered around the engine. Rules see exactly one collaborator:
//! [`RuleCtx`], which exposes the offset-graph mutations and the ignore
//! operation and nothing else.

mod markup;
mod script;

use sable_ir::{NodeId, NodeKind, SourceFile, TokenId};

use crate::graph::OffsetGraph;
use crate::ignore::IgnoreSet;
use crate::options::IndentOptions;

/// The one collaborator rules mutate through.
pub(crate) struct RuleCtx<'a> {
    pub(crate) src: &'a SourceFile,
    pub(crate) graph: &'a mut OffsetGraph,
    pub(crate) ignored: &'a mut IgnoreSet,
    pub(crate) options: &'a IndentOptions,
}

impl RuleCtx<'_> {
    fn set_offset<I>(&mut self, targets: I, multiplier: i32, base: TokenId)
    where
        I: IntoIterator<Item = TokenId>,
    {
        self.graph.set_offset(targets, multiplier, base);
    }

    fn copy_offset<I>(&mut self, targets: I, source: TokenId)
    where
        I: IntoIterator<Item = TokenId>,
    {
        self.graph.copy_offset(targets, source);
    }

    fn set_offset_baseline<I>(&mut self, targets: I, multiplier: i32)
    where
        I: IntoIterator<Item = TokenId>,
    {
        self.graph.set_offset_baseline(targets, multiplier);
    }

    fn ignore(&mut self, node: NodeId) {
        self.ignored.ignore_node(self.src, node);
    }
}

/// Run the entering node through both rule sets.
///
/// Returns whether either grammar claims the node's kind.
pub(crate) fn enter(ctx: &mut RuleCtx<'_>, node: NodeId) -> bool {
    markup::enter(ctx, node) || script::enter(ctx, node)
}

/// Check whether a kind has a rule in either table.
///
/// The engine consults this on node exit; unclaimed kinds get their whole
/// subtree ignored so they can never produce false positives.
pub(crate) fn claimed(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Document
        | NodeKind::Element
        | NodeKind::StartTag
        | NodeKind::EndTag
        | NodeKind::Attribute
        | NodeKind::Interpolation
        | NodeKind::Text
        | NodeKind::Program
        | NodeKind::BlockStatement
        | NodeKind::ExpressionStatement
        | NodeKind::IfStatement
        | NodeKind::ForStatement
        | NodeKind::WhileStatement
        | NodeKind::SwitchStatement
        | NodeKind::SwitchCase
        | NodeKind::BreakStatement
        | NodeKind::ContinueStatement
        | NodeKind::ReturnStatement
        | NodeKind::VariableDeclaration
        | NodeKind::CallExpression
        | NodeKind::MemberExpression
        | NodeKind::ArrayExpression
        | NodeKind::ObjectExpression
        | NodeKind::Property
        | NodeKind::BinaryExpression
        | NodeKind::UnaryExpression
        | NodeKind::AssignmentExpression
        | NodeKind::ConditionalExpression
        | NodeKind::ParenExpression
        | NodeKind::ArrowFunction
        | NodeKind::Identifier
        | NodeKind::Literal => true,
        NodeKind::Unknown(_) => false,
    }
}
