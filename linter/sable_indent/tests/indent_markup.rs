//! Engine behavior on the markup grammar.

use pretty_assertions::assert_eq;
use sable_diagnostic::{apply_edits, machine_applicable_edits, Diagnostic, LintCode};
use sable_indent::{analyze, IndentOptions};
use sable_ir::fixture;

fn run(source: &str) -> Vec<Diagnostic> {
    let src = fixture::parse(source);
    match analyze(&src, IndentOptions::default()) {
        Ok(diagnostics) => diagnostics,
        Err(e) => panic!("analysis failed: {e}"),
    }
}

fn fix(source: &str) -> String {
    let diagnostics = run(source);
    let edits = machine_applicable_edits(&diagnostics);
    match apply_edits(source, &edits) {
        Ok(fixed) => fixed,
        Err(e) => panic!("fix application failed: {e}"),
    }
}

#[test]
fn attributes_one_level_under_the_tag_are_clean() {
    let source = "<div class=\"a\"\n  :title=\"x\">\n  {{ msg }}\n</div>\n";
    assert!(run(source).is_empty());
}

#[test]
fn misindented_attribute_is_reported_and_fixed() {
    let source = "<div class=\"a\"\n      :title=\"x\">\n</div>\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);

    let fixed = fix(source);
    assert_eq!(fixed, "<div class=\"a\"\n  :title=\"x\">\n</div>\n");
    assert!(run(&fixed).is_empty());
}

#[test]
fn element_content_and_end_tag_anchor_on_the_start_tag() {
    let source = "<div>\n<span/>\n  </div>\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.code == LintCode::L1001));

    let fixed = fix(source);
    assert_eq!(fixed, "<div>\n  <span/>\n</div>\n");
    assert!(run(&fixed).is_empty());
}

#[test]
fn multiline_interpolation_is_validated_per_line() {
    let source = "<div>\n  {{\n    msg\n  }}\n</div>\n";
    assert!(run(source).is_empty());
}

#[test]
fn misindented_interpolation_body_is_reported() {
    let source = "<div>\n  {{\nmsg\n  }}\n</div>\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "expected indentation of 4 spaces but found no indentation"
    );
}

#[test]
fn preformatted_content_is_exempt() {
    let source = "<pre>\n      weird\n   layout\n</pre>\n";
    assert!(run(source).is_empty());
}

#[test]
fn preformatted_tags_themselves_are_still_validated() {
    let source = "<div>\n      <pre>\n   x\n      </pre>\n</div>\n";
    let diagnostics = run(source);
    // both tag lines are wrong; the content line is exempt
    assert_eq!(diagnostics.len(), 2);

    let fixed = fix(source);
    assert_eq!(fixed, "<div>\n  <pre>\n   x\n  </pre>\n</div>\n");
    assert!(run(&fixed).is_empty());
}

#[test]
fn script_block_statements_start_at_the_margin() {
    let source = "<div>\n  <script>\nlet x = 1;\n  </script>\n</div>\n";
    assert!(run(source).is_empty());
}

#[test]
fn nested_script_block_bodies_nest_from_their_own_braces() {
    let source = "<script>\nif (x) {\n  y = 1;\n}\n</script>\n";
    assert!(run(source).is_empty());
}

#[test]
fn markup_comments_take_the_next_lines_indent() {
    let source = "<div>\n  <!-- note -->\n  <span/>\n</div>\n";
    assert!(run(source).is_empty());
}

#[test]
fn misplaced_markup_comment_is_reported() {
    let source = "<div>\n        <!-- note -->\n  <span/>\n</div>\n";
    let diagnostics = run(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, LintCode::L1001);
    let fixed = fix(source);
    assert_eq!(fixed, "<div>\n  <!-- note -->\n  <span/>\n</div>\n");
}

#[test]
fn sibling_elements_share_the_document_baseline() {
    let source = "<header/>\n  <main>\n  x\n</main>\n";
    let diagnostics = run(source);
    // `<main>` belongs at the margin; its text child belongs one level in,
    // which it already is
    assert_eq!(diagnostics.len(), 1);
    let fixed = fix(source);
    assert_eq!(fixed, "<header/>\n<main>\n  x\n</main>\n");
    assert!(run(&fixed).is_empty());
}
