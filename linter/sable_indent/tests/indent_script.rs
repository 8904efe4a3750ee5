//! Engine behavior on the script grammar.

use pretty_assertions::assert_eq;
use sable_diagnostic::{apply_edits, machine_applicable_edits, Diagnostic, LintCode};
use sable_indent::{analyze, IndentOptions, IndentUnit};
use sable_ir::fixture;
use sable_ir::{NodeKind, SourceFile, Span, SyntaxTree, Token, TokenKind, TokenList};

fn run(source: &str) -> Vec<Diagnostic> {
    run_with(source, IndentOptions::default())
}

fn run_with(source: &str, options: IndentOptions) -> Vec<Diagnostic> {
    let src = fixture::parse(source);
    match analyze(&src, options) {
        Ok(diagnostics) => diagnostics,
        Err(e) => panic!("analysis failed: {e}"),
    }
}

fn fix_with(source: &str, options: IndentOptions) -> String {
    let diagnostics = run_with(source, options);
    let edits = machine_applicable_edits(&diagnostics);
    match apply_edits(source, &edits) {
        Ok(fixed) => fixed,
        Err(e) => panic!("fix application failed: {e}"),
    }
}

#[test]
fn under_indented_block_body_reports_one_width_mismatch() {
    let diagnostics = run("if (x) {\ny = 1;\n}\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 2 spaces but found no indentation"
    );
    // the fix inserts two spaces at the start of line 2
    let edits = machine_applicable_edits(&diagnostics);
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].span, Span::new(9, 9));
    assert_eq!(edits[0].replacement, "  ");
}

#[test]
fn fixed_output_is_clean() {
    let fixed = fix_with("if (x) {\ny = 1;\n}\n", IndentOptions::default());
    assert_eq!(fixed, "if (x) {\n  y = 1;\n}\n");
    assert!(run(&fixed).is_empty());
}

#[test]
fn correctly_indented_block_is_clean() {
    assert!(run("if (x) {\n  y = 1;\n}\n").is_empty());
}

#[test]
fn over_indent_reports_found_count() {
    let diagnostics = run("if (x) {\n      y = 1;\n}\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 2 spaces but found 6 spaces"
    );
}

#[test]
fn tab_of_matching_width_reports_character_mismatch() {
    let options = IndentOptions {
        unit: IndentUnit::Spaces(1),
        ..IndentOptions::default()
    };
    let diagnostics = run_with("if (x) {\n\ty = 1;\n}\n", options.clone());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1002);
    assert_eq!(
        diagnostics[0].message,
        "expected a space character but found a tab character"
    );

    let fixed = fix_with("if (x) {\n\ty = 1;\n}\n", options.clone());
    assert_eq!(fixed, "if (x) {\n y = 1;\n}\n");
    assert!(run_with(&fixed, options).is_empty());
}

#[test]
fn mixed_characters_at_correct_width_report_per_character() {
    // width 2 matches the expectation; only the tab position is reported
    let diagnostics = run("if (x) {\n \ty = 1;\n}\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1002);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(10, 11)));
}

#[test]
fn width_and_character_reports_are_exclusive() {
    // one tab where two spaces are expected: wrong width, so only the
    // width diagnostic fires
    let diagnostics = run("if (x) {\n\ty = 1;\n}\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 2 spaces but found 1 tab"
    );
}

#[test]
fn tab_unit_accepts_tab_indentation() {
    let options = IndentOptions {
        unit: IndentUnit::Tab,
        ..IndentOptions::default()
    };
    assert!(run_with("if (x) {\n\ty = 1;\n}\n", options).is_empty());
}

#[test]
fn tab_unit_rejects_space_indentation() {
    let options = IndentOptions {
        unit: IndentUnit::Tab,
        ..IndentOptions::default()
    };
    let diagnostics = run_with("if (x) {\n  y = 1;\n}\n", options.clone());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 1 tab but found 2 spaces"
    );
    let fixed = fix_with("if (x) {\n  y = 1;\n}\n", options.clone());
    assert_eq!(fixed, "if (x) {\n\ty = 1;\n}\n");
    assert!(run_with(&fixed, options).is_empty());
}

#[test]
fn switch_case_multiplier_zero_keeps_labels_flush() {
    let source = "switch (x) {\ncase 1:\n  break;\ndefault:\n  y = 2;\n}\n";
    let options = IndentOptions {
        switch_case: 0,
        ..IndentOptions::default()
    };
    assert!(run_with(source, options).is_empty());
}

#[test]
fn default_switch_case_multiplier_indents_labels() {
    // same source as above: under the default multiplier of 1 the labels
    // and their bodies are all one level short
    let source = "switch (x) {\ncase 1:\n  break;\ndefault:\n  y = 2;\n}\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 4);
    assert!(diagnostics.iter().all(|d| d.code == LintCode::L1001));

    let fixed = fix_with(source, IndentOptions::default());
    assert_eq!(
        fixed,
        "switch (x) {\n  case 1:\n    break;\n  default:\n    y = 2;\n}\n"
    );
    assert!(run(&fixed).is_empty());
}

#[test]
fn comment_lines_take_the_next_code_lines_indent() {
    assert!(run("if (x) {\n  // note\n  y = 1;\n}\n").is_empty());
}

#[test]
fn misplaced_comment_line_is_reported_and_fixed() {
    let source = "if (x) {\n// note\n  y = 1;\n}\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);

    let fixed = fix_with(source, IndentOptions::default());
    assert_eq!(fixed, "if (x) {\n  // note\n  y = 1;\n}\n");
    assert!(run(&fixed).is_empty());
}

#[test]
fn trailing_comments_are_never_reported() {
    assert!(run("y = 1;\n      // strangely indented trailer\n").is_empty());
}

#[test]
fn tokens_after_the_first_on_a_line_are_not_validated() {
    assert!(run("if (x) { y = 1; }\n").is_empty());
}

#[test]
fn call_continuation_one_level_deep_is_clean() {
    assert!(run("x = foo(a,\n  b);\n").is_empty());
}

#[test]
fn unknown_node_kinds_are_never_reported() {
    // a producer construct this engine does not know, with wild layout
    let text = "widget do\n      x\n  y\n".to_string();
    let mut tokens = TokenList::new();
    tokens.push(Token::new(TokenKind::Word, Span::new(0, 6)));
    tokens.push(Token::new(TokenKind::Word, Span::new(7, 9)));
    tokens.push(Token::new(TokenKind::Word, Span::new(16, 17)));
    tokens.push(Token::new(TokenKind::Word, Span::new(20, 21)));
    let mut tree = SyntaxTree::new();
    let root = tree.push(NodeKind::Program, Span::new(0, 21));
    let unknown = tree.push(NodeKind::Unknown("WidgetDirective".into()), Span::new(0, 21));
    tree.attach(root, unknown);
    tree.set_root(root);
    let src = SourceFile::new(text, tokens, tree);

    let Ok(diagnostics) = analyze(&src, IndentOptions::default()) else {
        panic!("analysis failed")
    };
    assert!(diagnostics.is_empty());
}

#[test]
fn siblings_of_an_unknown_subtree_are_still_validated() {
    let text = "widget\n   x\n  z;\n".to_string();
    let mut tokens = TokenList::new();
    tokens.push(Token::new(TokenKind::Word, Span::new(0, 6)));
    tokens.push(Token::new(TokenKind::Word, Span::new(10, 11)));
    tokens.push(Token::new(TokenKind::Word, Span::new(14, 15)));
    tokens.push(Token::new(TokenKind::Punct, Span::new(15, 16)));
    let mut tree = SyntaxTree::new();
    let root = tree.push(NodeKind::Program, Span::new(0, 16));
    let unknown = tree.push(NodeKind::Unknown("WidgetDirective".into()), Span::new(0, 11));
    tree.attach(root, unknown);
    let stmt = tree.push(NodeKind::ExpressionStatement, Span::new(14, 16));
    tree.attach(root, stmt);
    let ident = tree.push(NodeKind::Identifier, Span::new(14, 15));
    tree.attach(stmt, ident);
    tree.set_root(root);
    let src = SourceFile::new(text, tokens, tree);

    let Ok(diagnostics) = analyze(&src, IndentOptions::default()) else {
        panic!("analysis failed")
    };
    // the unknown construct's lines are exempt; `z;` is still checked
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 0 spaces but found 2 spaces"
    );
}

#[test]
fn ignored_selector_suppresses_a_subtree() {
    let source = "switch (x) {\ncase 1:\n  break;\ndefault:\n  y = 2;\n}\n";
    let options = IndentOptions {
        ignored_patterns: vec!["SwitchStatement".to_string()],
        ..IndentOptions::default()
    };
    assert!(run_with(source, options).is_empty());
}

#[test]
fn ignored_selector_wildcard_matches_kind_names() {
    let options = IndentOptions {
        ignored_patterns: vec!["*Statement".to_string()],
        ..IndentOptions::default()
    };
    assert!(run_with("if (x) {\ny = 1;\n}\n", options).is_empty());
}

#[test]
fn analysis_is_deterministic() {
    let source = "switch (x) {\ncase 1:\n  break;\ndefault:\n  y = 2;\n}\n";
    assert_eq!(run(source), run(source));
}
