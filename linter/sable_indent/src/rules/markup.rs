//! Rules for the markup grammar.
//!
//! Anchors are start-tag open tokens (`<name`) and interpolation openers
//! (`{{`). Element content sits one level under the start tag; end tags and
//! closing delimiters sit flush with their openers. `<pre>` content is
//! exempt from validation — its layout is the document's payload.

use sable_ir::{NodeId, NodeKind, TokenId};

use super::RuleCtx;

pub(super) fn enter(ctx: &mut RuleCtx<'_>, node: NodeId) -> bool {
    let src = ctx.src;
    match &src.tree().node(node).kind {
        NodeKind::Document => {
            document(ctx, node);
            true
        }
        NodeKind::Element => {
            element(ctx, node);
            true
        }
        NodeKind::StartTag => {
            start_tag(ctx, node);
            true
        }
        NodeKind::Attribute => {
            attribute(ctx, node);
            true
        }
        NodeKind::Interpolation => {
            interpolation(ctx, node);
            true
        }
        // Leaves anchored entirely by their parents.
        NodeKind::Text | NodeKind::EndTag => true,
        _ => false,
    }
}

/// Top-level children start at the left margin.
fn document(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let firsts: Vec<TokenId> = src
        .tree()
        .children(node)
        .iter()
        .filter_map(|&child| src.first_token_of(child))
        .collect();
    ctx.set_offset_baseline(firsts, 0);
}

/// Content one level under the start tag; end tag flush with it.
fn element(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    let preformatted = src.token_text(open) == "<pre";
    for &child in src.tree().children(node) {
        match src.tree().node(child).kind {
            NodeKind::StartTag => {}
            NodeKind::EndTag => {
                let end_tokens: Vec<TokenId> = src.tokens_of(child).collect();
                ctx.set_offset(end_tokens, 0, open);
            }
            _ => {
                if preformatted {
                    ctx.ignore(child);
                } else {
                    ctx.set_offset(src.first_token_of(child), 1, open);
                }
            }
        }
    }
}

/// Attributes one level under `<name`; the closing `>`/`/>` flush with it.
fn start_tag(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    for &attr in src.tree().children(node) {
        ctx.set_offset(src.first_token_of(attr), 1, open);
    }
    let Some(close) = src.last_token_of(node) else {
        return;
    };
    ctx.set_offset(Some(close), 0, open);
}

/// `=` and the value track the attribute name's own anchor.
fn attribute(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(name) = src.first_token_of(node) else {
        return;
    };
    let rest: Vec<TokenId> = src.tokens_of(node).skip(1).collect();
    ctx.copy_offset(rest, name);
}

/// Expression one level under `{{`; `}}` flush with it.
fn interpolation(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    for &child in src.tree().children(node) {
        ctx.set_offset(src.first_token_of(child), 1, open);
    }
    let Some(close) = src.last_token_of(node) else {
        return;
    };
    ctx.set_offset(Some(close), 0, open);
}
