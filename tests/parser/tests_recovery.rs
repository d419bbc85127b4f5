//! Syntax errors stay local: the tree around them is still complete.

#![allow(clippy::unwrap_used)]

use objc_syntax::parser::{ErrorCode, SyntaxKind, SyntaxNode};
use objc_syntax::{LineIndex, parse};

use crate::helpers::parse_helpers::{error_codes, field_text, first_of_kind, nodes_of_kind};

fn has_error_node(node: &SyntaxNode) -> bool {
    node.descendants().any(|n| n.kind() == SyntaxKind::ERROR)
}

// ============================================================================
// Error locality
// ============================================================================

#[test]
fn test_bad_member_in_interface_body() {
    let source = "@interface Foo\n- (void)a;\n42;\n- (void)b;\n@end\n";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0302]);

    let error = &result.errors()[0];
    assert_eq!(&source[error.range], "42;");
    let span = error.span(&LineIndex::new(source));
    assert_eq!((span.start.line, span.start.column), (2, 0));

    let root = result.syntax();
    let methods = nodes_of_kind(&root, SyntaxKind::INSTANCE_METHOD_DECLARATION);
    assert_eq!(methods.len(), 2);
    assert!(methods.iter().all(|m| !has_error_node(m)));
    assert_eq!(root.text().to_string(), source);
}

#[test]
fn test_bad_statement_in_one_method_body() {
    let source = "@implementation Foo\n\
                  - (void)a { int x = ; }\n\
                  - (void)b { return; }\n\
                  @end\n";
    let result = parse(source);
    assert!(!result.ok());
    assert!(
        error_codes(&result).iter().all(|code| *code == ErrorCode::E0401),
        "{:?}",
        result.errors()
    );

    let root = result.syntax();
    let methods = nodes_of_kind(&root, SyntaxKind::INSTANCE_METHOD_DEFINITION);
    assert_eq!(methods.len(), 2);
    assert!(has_error_node(&methods[0]));
    assert!(!has_error_node(&methods[1]));
    assert_eq!(field_text(&result, &methods[1], "selector").unwrap(), "b");
    assert_eq!(root.text().to_string(), source);
}

#[test]
fn test_bad_top_level_tokens() {
    let source = "int a;\n) ) )\nint b;\n";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0301]);
    let root = result.syntax();
    assert_eq!(nodes_of_kind(&root, SyntaxKind::DECLARATION).len(), 2);
    assert_eq!(root.text().to_string(), source);
}

#[test]
fn test_bad_instance_variable() {
    let source = "@interface Foo { int x; 7 char y; } @end";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0304]);
    let root = result.syntax();
    assert_eq!(nodes_of_kind(&root, SyntaxKind::FIELD_DECLARATION).len(), 2);
}

// ============================================================================
// Missing closers
// ============================================================================

#[test]
fn test_missing_end() {
    let source = "@interface Foo\n- (void)run;\n";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0201]);

    let error = &result.errors()[0];
    assert!(error.message.contains("`@end`"), "{}", error.message);
    assert!(error.range.is_empty());
    assert_eq!(error.hint.as_deref(), Some("insert `@end`"));
    assert_eq!(error.related.len(), 1);
    assert_eq!(&source[error.related[0].range], "@interface");

    let interface = first_of_kind(&result.syntax(), SyntaxKind::CLASS_INTERFACE);
    assert_eq!(field_text(&result, &interface, "name").unwrap(), "Foo");
    assert_eq!(
        nodes_of_kind(&interface, SyntaxKind::INSTANCE_METHOD_DECLARATION).len(),
        1
    );
    assert!(result.to_sexp().contains("(MISSING)"));
}

#[test]
fn test_missing_brace_before_end() {
    let source = "@implementation Foo\n- (void)run {\n  go();\n@end\n";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0201]);
    assert!(result.errors()[0].message.contains("`}`"));
    let root = result.syntax();
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CLASS_IMPLEMENTATION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CALL_EXPRESSION).len(), 1);
    assert_eq!(root.text().to_string(), source);
}

// ============================================================================
// Lexical errors
// ============================================================================

#[test]
fn test_invalid_character() {
    let source = "int x; ` int y;";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0101]);
    let error = &result.errors()[0];
    assert_eq!(&source[error.range], "`");
    assert!(error.message.contains("invalid character"));
    assert_eq!(
        nodes_of_kind(&result.syntax(), SyntaxKind::DECLARATION).len(),
        2
    );
}

#[test]
fn test_unterminated_block_comment() {
    let source = "int x;\n/* never closed\nint y;\n";
    let result = parse(source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0101]);
    let error = &result.errors()[0];
    assert_eq!(&source[error.range], "/* never closed\nint y;\n");
    assert!(error.message.contains("unterminated block comment"), "{}", error.message);
    assert_eq!(nodes_of_kind(&result.syntax(), SyntaxKind::DECLARATION).len(), 1);
    assert_eq!(result.syntax().text().to_string(), source);
}

#[test]
fn test_comments_between_members() {
    let source = "@interface Foo /* root */\n/** Runs. */\n- (void)run; // soon\n@end\n";
    let result = parse(source);
    assert!(result.ok(), "{:?}", result.errors());
    assert_eq!(
        nodes_of_kind(&result.syntax(), SyntaxKind::INSTANCE_METHOD_DECLARATION).len(),
        1
    );
}

// ============================================================================
// Nesting
// ============================================================================

fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
    format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
}

#[test]
fn test_deeply_nested_blocks_parse_cleanly() {
    let body = nested("if (a) { ", "x = 1; ", "} ", 32);
    let source = format!("void f(void) {{ {body}}}");
    let result = parse(&source);
    assert!(result.ok(), "{:?}", result.errors());
    assert_eq!(nodes_of_kind(&result.syntax(), SyntaxKind::IF_STATEMENT).len(), 32);
}

#[test]
fn test_deeply_nested_expressions_parse_cleanly() {
    let parens = nested("(", "x", ")", 100);
    let messages = nested("[", "a", " next]", 60);
    let source = format!("void f(void) {{ y = {parens}; z = {messages}; }}");
    let result = parse(&source);
    assert!(result.ok(), "{:?}", result.errors());
    assert_eq!(
        nodes_of_kind(&result.syntax(), SyntaxKind::MESSAGE_EXPRESSION).len(),
        60
    );
}

#[test]
fn test_nesting_limit_reports_only_depth_error() {
    let parens = nested("(", "x", ")", 400);
    let source = format!("int a;\nvoid f(void) {{ {parens}; }}\nint b;\n");
    let result = parse(&source);
    assert_eq!(error_codes(&result), vec![ErrorCode::E0902]);
    let root = result.syntax();
    assert_eq!(root.text().to_string(), source);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::FUNCTION_DEFINITION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::DECLARATION).len(), 2);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_errors_are_in_source_order() {
    let source = "int a;\n) )\n@interface Foo\n42;\n@end\n";
    let result = parse(source);
    let starts: Vec<u32> = result
        .errors()
        .iter()
        .map(|e| e.range.start().into())
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert_eq!(
        error_codes(&result),
        vec![ErrorCode::E0301, ErrorCode::E0302]
    );
}

#[test]
fn test_unexpected_tokens_hint_lists_expected() {
    let source = "@interface Foo\n42;\n@end\n";
    let result = parse(source);
    let error = &result.errors()[0];
    assert!(error.message.starts_with("unexpected `42"), "{}", error.message);
    assert!(error.message.ends_with("in interface body"), "{}", error.message);
    assert!(error.has_hint());
}
