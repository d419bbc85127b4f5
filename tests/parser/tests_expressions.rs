//! Expression trees: C precedence and the Objective-C `@` expressions.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use objc_syntax::parser::SyntaxKind;

use crate::helpers::parse_helpers::{element_text, field_text, parse_rule_ok, rule_sexp};

// ============================================================================
// C precedence and associativity
// ============================================================================

#[rstest]
#[case::multiplication_binds_tighter(
    "a + b * c",
    "(fragment (binary_expression left: (identifier) \
     right: (binary_expression left: (identifier) right: (identifier))))"
)]
#[case::left_associative(
    "a - b - c",
    "(fragment (binary_expression \
     left: (binary_expression left: (identifier) right: (identifier)) right: (identifier)))"
)]
#[case::assignment_is_right_associative(
    "a = b = c",
    "(fragment (assignment_expression left: (identifier) \
     right: (assignment_expression left: (identifier) right: (identifier))))"
)]
#[case::unary_binds_tighter(
    "-a * b",
    "(fragment (binary_expression \
     left: (unary_expression argument: (identifier)) right: (identifier)))"
)]
#[case::cast_binds_tighter(
    "(int)x + 1",
    "(fragment (binary_expression \
     left: (cast_expression type: (type_descriptor type: (primitive_type)) value: (identifier)) \
     right: (number_literal)))"
)]
#[case::nested_casts(
    "(char)(int)x",
    "(fragment (cast_expression type: (type_descriptor type: (primitive_type)) \
     value: (cast_expression type: (type_descriptor type: (primitive_type)) value: (identifier))))"
)]
#[case::parentheses(
    "(a + b) * c",
    "(fragment (binary_expression \
     left: (parenthesized_expression (binary_expression left: (identifier) right: (identifier))) \
     right: (identifier)))"
)]
#[case::logical(
    "a || b && c",
    "(fragment (binary_expression left: (identifier) \
     right: (binary_expression left: (identifier) right: (identifier))))"
)]
#[case::conditional(
    "a ? b : c ? d : e",
    "(fragment (conditional_expression condition: (identifier) consequence: (identifier) \
     alternative: (conditional_expression condition: (identifier) consequence: (identifier) \
     alternative: (identifier))))"
)]
#[case::postfix_chain(
    "p->items[0].name",
    "(fragment (field_expression \
     argument: (subscript_expression argument: (field_expression argument: (identifier) \
     field: (field_identifier)) index: (number_literal)) \
     field: (field_identifier)))"
)]
#[case::dereference_of_call(
    "*next(list)",
    "(fragment (pointer_expression \
     argument: (call_expression function: (identifier) \
     arguments: (argument_list (identifier)))))"
)]
#[case::postfix_increment(
    "i++ + 1",
    "(fragment (binary_expression \
     left: (update_expression argument: (identifier)) right: (number_literal)))"
)]
fn test_c_precedence(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(rule_sexp("_expression", source), expected);
}

#[test]
fn test_binary_operator_field() {
    let parse = parse_rule_ok("_expression", "a << 2");
    let binary = parse.syntax().first_child().unwrap();
    assert_eq!(field_text(&parse, &binary, "operator").unwrap(), "<<");
}

#[test]
fn test_sizeof_forms() {
    assert_eq!(
        rule_sexp("_expression", "sizeof(int)"),
        "(fragment (sizeof_expression type: (type_descriptor type: (primitive_type))))"
    );
    assert_eq!(
        rule_sexp("_expression", "sizeof x"),
        "(fragment (sizeof_expression value: (identifier)))"
    );
}

#[test]
fn test_compound_literal() {
    let sexp = rule_sexp("_expression", "(struct point){ .x = 1, 2 }");
    assert!(sexp.starts_with("(fragment (compound_literal_expression"), "{sexp}");
    assert!(sexp.contains("(initializer_pair designator: (field_designator (field_identifier)) value: (number_literal))"), "{sexp}");
}

// ============================================================================
// Objective-C expressions
// ============================================================================

#[test]
fn test_selector_expression_with_keywords() {
    let parse = parse_rule_ok("_expression", "@selector(run:with:)");
    let selector = parse.syntax().first_child().unwrap();
    assert_eq!(selector.kind(), SyntaxKind::SELECTOR_EXPRESSION);
    let names: Vec<String> = parse
        .fields(&selector, "name")
        .iter()
        .filter(|e| e.kind() == SyntaxKind::KEYWORD_NAME)
        .map(element_text)
        .collect();
    assert_eq!(names, vec!["run:", "with:"]);
}

#[test]
fn test_selector_expression_unary() {
    assert_eq!(
        rule_sexp("_expression", "@selector(description)"),
        "(fragment (selector_expression name: (identifier)))"
    );
}

#[test]
fn test_selector_expression_anonymous_keywords() {
    let parse = parse_rule_ok("selector_expression", "@selector(setX::)");
    let names = parse.fields(&parse.syntax(), "name");
    let keyword_names: Vec<String> = names
        .iter()
        .filter(|e| e.kind() == SyntaxKind::KEYWORD_NAME)
        .map(element_text)
        .collect();
    assert_eq!(keyword_names, vec!["setX:", ":"]);
}

#[rstest]
#[case("@protocol(NSCopying)", "(fragment (protocol_expression name: (identifier)))")]
#[case("@encode(Point)", "(fragment (encode_expression (identifier)))")]
#[case("self", "(fragment (self))")]
fn test_directive_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(rule_sexp("_expression", source), expected);
}

#[test]
fn test_object_string_literal() {
    assert_eq!(
        rule_sexp("_expression", "@\"hello\""),
        "(fragment (string_literal))"
    );
}

#[test]
fn test_message_send_as_operand() {
    assert_eq!(
        rule_sexp("_expression", "[list count] - 1"),
        "(fragment (binary_expression \
         left: (message_expression receiver: (receiver (identifier)) \
         selector: (message_selector (identifier))) \
         right: (number_literal)))"
    );
}

#[test]
fn test_message_send_with_call_receiver() {
    assert_eq!(
        rule_sexp("_expression", "[make(1) run]"),
        "(fragment (message_expression \
         receiver: (receiver (call_expression function: (identifier) arguments: (argument_list (number_literal)))) \
         selector: (message_selector (identifier))))"
    );
}

#[test]
fn test_message_argument_without_keyword() {
    assert_eq!(
        rule_sexp("_expression", "[obj add:1 :2]"),
        "(fragment (message_expression receiver: (receiver (identifier)) \
         selector: (message_selector (keyword_argument_list \
         (keyword_argument keyword: (identifier) argument: (number_literal)) \
         (keyword_argument argument: (number_literal))))))"
    );
}
