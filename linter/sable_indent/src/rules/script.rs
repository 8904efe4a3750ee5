//! Rules for the embedded script grammar.
//!
//! Statement keywords and expression heads are the anchors. Block bodies and
//! parenthesized contents sit one level under their opener; closing
//! delimiters sit flush with it. Statements that own a block keep the brace
//! flush with the statement keyword, so `if (x) {` and its `}` line up.

use sable_ir::{NodeId, NodeKind, TokenId};

use super::RuleCtx;

pub(super) fn enter(ctx: &mut RuleCtx<'_>, node: NodeId) -> bool {
    let src = ctx.src;
    match &src.tree().node(node).kind {
        NodeKind::Program => {
            program(ctx, node);
            true
        }
        NodeKind::BlockStatement => {
            block_statement(ctx, node);
            true
        }
        NodeKind::ExpressionStatement => {
            expression_statement(ctx, node);
            true
        }
        NodeKind::IfStatement => {
            if_statement(ctx, node);
            true
        }
        NodeKind::WhileStatement => {
            while_statement(ctx, node);
            true
        }
        NodeKind::ForStatement => {
            for_statement(ctx, node);
            true
        }
        NodeKind::SwitchStatement => {
            switch_statement(ctx, node);
            true
        }
        NodeKind::SwitchCase => {
            switch_case(ctx, node);
            true
        }
        NodeKind::ReturnStatement => {
            return_statement(ctx, node);
            true
        }
        NodeKind::BreakStatement | NodeKind::ContinueStatement => {
            jump_statement(ctx, node);
            true
        }
        NodeKind::VariableDeclaration => {
            variable_declaration(ctx, node);
            true
        }
        NodeKind::CallExpression => {
            call_expression(ctx, node);
            true
        }
        NodeKind::MemberExpression => {
            member_expression(ctx, node);
            true
        }
        NodeKind::ArrayExpression => {
            bracketed_list(ctx, node);
            true
        }
        NodeKind::ObjectExpression => {
            bracketed_list(ctx, node);
            true
        }
        NodeKind::Property => {
            property(ctx, node);
            true
        }
        NodeKind::BinaryExpression | NodeKind::AssignmentExpression => {
            left_anchored_pair(ctx, node);
            true
        }
        NodeKind::UnaryExpression => {
            unary_expression(ctx, node);
            true
        }
        NodeKind::ConditionalExpression => {
            conditional_expression(ctx, node);
            true
        }
        NodeKind::ParenExpression => {
            paren_expression(ctx, node);
            true
        }
        NodeKind::ArrowFunction => {
            arrow_function(ctx, node);
            true
        }
        // Leaves anchored entirely by their parents.
        NodeKind::Identifier | NodeKind::Literal => true,
        _ => false,
    }
}

/// Whether a statement is a block, for the flush-brace layout.
fn is_block(ctx: &RuleCtx<'_>, node: NodeId) -> bool {
    matches!(ctx.src.tree().node(node).kind, NodeKind::BlockStatement)
}

/// Top-level statements start at the left margin, including inside a
/// `<script>` element.
fn program(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let firsts: Vec<TokenId> = src
        .tree()
        .children(node)
        .iter()
        .filter_map(|&child| src.first_token_of(child))
        .collect();
    ctx.set_offset_baseline(firsts, 0);
}

fn block_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    for &stmt in src.tree().children(node) {
        ctx.set_offset(src.first_token_of(stmt), 1, open);
    }
    let Some(close) = src.last_token_of(node) else {
        return;
    };
    ctx.set_offset(Some(close), 0, open);
}

fn expression_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(first) = src.first_token_of(node) else {
        return;
    };
    let Some(last) = src.last_token_of(node) else {
        return;
    };
    if src.token_text(last) == ";" {
        ctx.set_offset(Some(last), 0, first);
    }
}

/// Lay out a keyword-led condition: `kw ( condition )`.
///
/// The left paren hangs one level under the keyword, the condition one level
/// under the paren, and the right paren flush with the left.
fn condition_parens(ctx: &mut RuleCtx<'_>, keyword: TokenId, condition: NodeId) {
    let src = ctx.src;
    let Some(lparen) = src.token_after(keyword) else {
        return;
    };
    if src.token_text(lparen) != "(" {
        return;
    }
    ctx.set_offset(Some(lparen), 1, keyword);
    ctx.set_offset(src.first_token_of(condition), 1, lparen);
    let rparen = src
        .last_token_of(condition)
        .and_then(|last| src.token_after(last));
    if let Some(rparen) = rparen {
        if src.token_text(rparen) == ")" {
            ctx.set_offset(Some(rparen), 0, lparen);
        }
    }
}

fn if_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(if_token) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    let (Some(&condition), Some(&consequent)) = (children.first(), children.get(1)) else {
        return;
    };
    condition_parens(ctx, if_token, condition);

    let step = i32::from(!is_block(ctx, consequent));
    ctx.set_offset(ctx.src.first_token_of(consequent), step, if_token);

    if let Some(&alternate) = children.get(2) {
        let else_token = src
            .last_token_of(consequent)
            .and_then(|last| src.token_after(last));
        let Some(else_token) = else_token else {
            return;
        };
        if src.token_text(else_token) != "else" {
            return;
        }
        ctx.set_offset(Some(else_token), 0, if_token);
        let chained = matches!(
            src.tree().node(alternate).kind,
            NodeKind::BlockStatement | NodeKind::IfStatement
        );
        let step = i32::from(!chained);
        ctx.set_offset(ctx.src.first_token_of(alternate), step, else_token);
    }
}

fn while_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(while_token) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    let (Some(&condition), Some(&body)) = (children.first(), children.get(1)) else {
        return;
    };
    condition_parens(ctx, while_token, condition);
    let step = i32::from(!is_block(ctx, body));
    ctx.set_offset(ctx.src.first_token_of(body), step, while_token);
}

fn for_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(for_token) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    if children.len() < 2 {
        return;
    }
    let Some(lparen) = src.token_after(for_token) else {
        return;
    };
    if src.token_text(lparen) != "(" {
        return;
    }
    ctx.set_offset(Some(lparen), 1, for_token);

    let Some((&body, header)) = children.split_last() else {
        return;
    };
    for &part in header {
        ctx.set_offset(src.first_token_of(part), 1, lparen);
    }
    // the `in` keyword between binding and iterated expression
    if let Some(&binding) = header.first() {
        let in_token = src
            .last_token_of(binding)
            .and_then(|last| src.token_after(last));
        if let Some(in_token) = in_token {
            if src.token_text(in_token) == "in" {
                ctx.set_offset(Some(in_token), 1, lparen);
            }
        }
    }
    let rparen = src
        .first_token_of(body)
        .and_then(|first| src.token_before(first));
    if let Some(rparen) = rparen {
        if src.token_text(rparen) == ")" {
            ctx.set_offset(Some(rparen), 0, lparen);
        }
    }
    let step = i32::from(!is_block(ctx, body));
    ctx.set_offset(ctx.src.first_token_of(body), step, for_token);
}

fn switch_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(switch_token) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    let Some(&discriminant) = children.first() else {
        return;
    };
    condition_parens(ctx, switch_token, discriminant);

    let open_brace = src
        .last_token_of(discriminant)
        .and_then(|last| src.token_after(last))
        .and_then(|rparen| src.token_after(rparen));
    let Some(open_brace) = open_brace else {
        return;
    };
    if src.token_text(open_brace) != "{" {
        return;
    }
    ctx.set_offset(Some(open_brace), 0, switch_token);

    let case_step = ctx.options.switch_case;
    let cases: Vec<TokenId> = children[1..]
        .iter()
        .filter_map(|&case| src.first_token_of(case))
        .collect();
    ctx.set_offset(cases, case_step, open_brace);

    if let Some(close_brace) = src.last_token_of(node) {
        if src.token_text(close_brace) == "}" {
            ctx.set_offset(Some(close_brace), 0, open_brace);
        }
    }
}

fn switch_case(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(keyword) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    let is_case = src.token_text(keyword) == "case";

    let (test, statements) = if is_case {
        match children.split_first() {
            Some((&test, rest)) => (Some(test), rest),
            None => (None, children),
        }
    } else {
        (None, children)
    };

    let colon = match test {
        Some(test) => {
            ctx.set_offset(src.first_token_of(test), 1, keyword);
            ctx.src
                .last_token_of(test)
                .and_then(|last| ctx.src.token_after(last))
        }
        None => src.token_after(keyword),
    };
    if let Some(colon) = colon {
        if ctx.src.token_text(colon) == ":" {
            ctx.set_offset(Some(colon), 1, keyword);
        }
    }
    for &stmt in statements {
        ctx.set_offset(ctx.src.first_token_of(stmt), 1, keyword);
    }
}

fn return_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(keyword) = src.first_token_of(node) else {
        return;
    };
    if let Some(&argument) = src.tree().children(node).first() {
        ctx.set_offset(src.first_token_of(argument), 1, keyword);
    }
    if let Some(last) = src.last_token_of(node) {
        if src.token_text(last) == ";" {
            ctx.set_offset(Some(last), 0, keyword);
        }
    }
}

fn jump_statement(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(keyword) = src.first_token_of(node) else {
        return;
    };
    if let Some(last) = src.last_token_of(node) {
        if src.token_text(last) == ";" {
            ctx.set_offset(Some(last), 0, keyword);
        }
    }
}

/// Everything after the declaration keyword hangs one level under it; the
/// declarator internals refine their own tokens when their nodes enter.
fn variable_declaration(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(keyword) = src.first_token_of(node) else {
        return;
    };
    let rest: Vec<TokenId> = src.tokens_of(node).skip(1).collect();
    ctx.set_offset(rest, 1, keyword);
}

fn call_expression(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let children = src.tree().children(node);
    let Some(&callee) = children.first() else {
        return;
    };
    let Some(anchor) = src.first_token_of(node) else {
        return;
    };
    let lparen = src
        .last_token_of(callee)
        .and_then(|last| src.token_after(last));
    let Some(lparen) = lparen else {
        return;
    };
    if src.token_text(lparen) != "(" {
        return;
    }
    ctx.set_offset(Some(lparen), 1, anchor);
    for &argument in &children[1..] {
        ctx.set_offset(ctx.src.first_token_of(argument), 1, lparen);
    }
    if let Some(rparen) = ctx.src.last_token_of(node) {
        if ctx.src.token_text(rparen) == ")" {
            ctx.set_offset(Some(rparen), 0, lparen);
        }
    }
}

fn member_expression(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let children = src.tree().children(node);
    let Some(&object) = children.first() else {
        return;
    };
    let Some(object_first) = src.first_token_of(object) else {
        return;
    };
    let separator = src
        .last_token_of(object)
        .and_then(|last| src.token_after(last));
    let Some(separator) = separator else {
        return;
    };
    match src.token_text(separator) {
        "." => {
            ctx.set_offset(Some(separator), 1, object_first);
            if let Some(&property) = children.get(1) {
                ctx.set_offset(ctx.src.first_token_of(property), 1, object_first);
            }
        }
        "[" => {
            ctx.set_offset(Some(separator), 1, object_first);
            if let Some(&property) = children.get(1) {
                ctx.set_offset(ctx.src.first_token_of(property), 1, separator);
            }
            if let Some(close) = ctx.src.last_token_of(node) {
                if ctx.src.token_text(close) == "]" {
                    ctx.set_offset(Some(close), 0, separator);
                }
            }
        }
        _ => {}
    }
}

/// Arrays and objects: elements one level under the opener, trailing commas
/// tracking the element they follow, closer flush with the opener.
fn bracketed_list(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    for &element in src.tree().children(node) {
        let element_first = src.first_token_of(element);
        ctx.set_offset(element_first, 1, open);
        let comma = src
            .last_token_of(element)
            .and_then(|last| src.token_after(last));
        if let (Some(comma), Some(element_first)) = (comma, element_first) {
            if ctx.src.token_text(comma) == "," {
                ctx.copy_offset(Some(comma), element_first);
            }
        }
    }
    let Some(close) = src.last_token_of(node) else {
        return;
    };
    ctx.set_offset(Some(close), 0, open);
}

fn property(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(key) = src.first_token_of(node) else {
        return;
    };
    let rest: Vec<TokenId> = src.tokens_of(node).skip(1).collect();
    ctx.set_offset(rest, 1, key);
}

/// Binary and assignment expressions: the operator and the right-hand side
/// hang one level under the left-hand side's first token.
fn left_anchored_pair(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let children = src.tree().children(node);
    let Some(&left) = children.first() else {
        return;
    };
    let Some(left_first) = src.first_token_of(left) else {
        return;
    };
    let operator = src
        .last_token_of(left)
        .and_then(|last| src.token_after(last));
    if let Some(operator) = operator {
        ctx.set_offset(Some(operator), 1, left_first);
    }
    if let Some(&right) = children.get(1) {
        ctx.set_offset(ctx.src.first_token_of(right), 1, left_first);
    }
}

fn unary_expression(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(operator) = src.first_token_of(node) else {
        return;
    };
    if let Some(&operand) = src.tree().children(node).first() {
        ctx.set_offset(src.first_token_of(operand), 1, operator);
    }
}

fn conditional_expression(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let children = src.tree().children(node);
    let Some(&test) = children.first() else {
        return;
    };
    let Some(test_first) = src.first_token_of(test) else {
        return;
    };
    let question = src
        .last_token_of(test)
        .and_then(|last| src.token_after(last));
    if let Some(question) = question {
        ctx.set_offset(Some(question), 1, test_first);
    }
    if let Some(&consequent) = children.get(1) {
        ctx.set_offset(ctx.src.first_token_of(consequent), 1, test_first);
        let colon = ctx
            .src
            .last_token_of(consequent)
            .and_then(|last| ctx.src.token_after(last));
        if let Some(colon) = colon {
            ctx.set_offset(Some(colon), 1, test_first);
        }
    }
    if let Some(&alternate) = children.get(2) {
        ctx.set_offset(ctx.src.first_token_of(alternate), 1, test_first);
    }
}

fn paren_expression(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(open) = src.first_token_of(node) else {
        return;
    };
    if let Some(&inner) = src.tree().children(node).first() {
        ctx.set_offset(src.first_token_of(inner), 1, open);
    }
    if let Some(close) = ctx.src.last_token_of(node) {
        ctx.set_offset(Some(close), 0, open);
    }
}

fn arrow_function(ctx: &mut RuleCtx<'_>, node: NodeId) {
    let src = ctx.src;
    let Some(head) = src.first_token_of(node) else {
        return;
    };
    let children = src.tree().children(node);
    let Some((&body, params)) = children.split_last() else {
        return;
    };

    if src.token_text(head) == "(" {
        for &param in params {
            ctx.set_offset(src.first_token_of(param), 1, head);
        }
        let rparen = params
            .last()
            .and_then(|&param| src.last_token_of(param))
            .and_then(|last| src.token_after(last))
            .or_else(|| src.token_after(head));
        if let Some(rparen) = rparen {
            if src.token_text(rparen) == ")" {
                ctx.set_offset(Some(rparen), 0, head);
                if let Some(arrow) = src.token_after(rparen) {
                    if src.token_text(arrow) == "=>" {
                        ctx.set_offset(Some(arrow), 1, head);
                    }
                }
            }
        }
    } else if let Some(arrow) = src.token_after(head) {
        if src.token_text(arrow) == "=>" {
            ctx.set_offset(Some(arrow), 1, head);
        }
    }

    let step = i32::from(!is_block(ctx, body));
    ctx.set_offset(ctx.src.first_token_of(body), step, head);
}
