//! The Objective-C conflict registry and the trees its policies produce.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use objc_syntax::grammar::{Resolution, TieSide, Winner};
use objc_syntax::parser::SyntaxKind;
use objc_syntax::{c_grammar, objc_grammar, parse_with, parser::parse_rule_with};

use crate::helpers::parse_helpers::{first_of_kind, parse_ok, rule_sexp};

// ============================================================================
// Registry contents
// ============================================================================

#[test]
fn test_registry_entries() {
    let entries: Vec<String> = objc_grammar()
        .conflicts()
        .entries()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        entries,
        vec![
            "[_expression, protocol_type_specifier] (prefer extension)",
            "[_expression, message_expression] (prefer message_expression)",
            "[keyword_selector] (prefer keyword_selector)",
            "[struct_specifier] (marker '@defs')",
            "[union_specifier] (marker '@defs')",
            "[enum_specifier] (marker '@defs')",
            "[receiver, super] (prefer super)",
        ]
    );
}

#[test]
fn test_base_grammar_declares_no_conflicts() {
    assert!(c_grammar().conflicts().is_empty());
}

#[rstest]
#[case("struct_specifier")]
#[case("union_specifier")]
#[case("enum_specifier")]
fn test_defs_entries_are_markers(#[case] rule: &str) {
    let entry = objc_grammar()
        .conflicts()
        .entries()
        .iter()
        .find(|e| e.involves(rule))
        .unwrap();
    assert_eq!(entry.resolution(), Resolution::Marker("@defs"));
}

#[test]
fn test_first_applicable_entry_decides() {
    let registry = objc_grammar().conflicts();
    let base = TieSide {
        head: Some("identifier"),
        from_extension: false,
    };
    let extension = TieSide {
        head: Some("self"),
        from_extension: true,
    };
    assert_eq!(registry.resolve("_expression", base, extension), Some(Winner::Second));
    assert_eq!(registry.resolve("_expression", extension, base), Some(Winner::First));
    assert_eq!(registry.resolve("_statement", base, base), None);
}

// ============================================================================
// Contextual keywords
// ============================================================================

#[test]
fn test_self_is_its_own_node_in_objc() {
    assert_eq!(rule_sexp("_expression", "self"), "(fragment (self))");
}

#[test]
fn test_self_is_an_identifier_in_c() {
    let parse = parse_rule_with(c_grammar(), "_expression", "self").unwrap();
    assert!(parse.ok());
    assert_eq!(parse.to_sexp(), "(fragment (identifier))");
}

#[test]
fn test_self_still_works_as_a_name_outside_expressions() {
    let parse = parse_ok("int self;");
    assert_eq!(
        parse.to_sexp(),
        "(translation_unit (declaration type: (primitive_type) declarator: (identifier)))"
    );
}

#[test]
fn test_super_receiver() {
    assert_eq!(
        rule_sexp("message_expression", "[super init]"),
        "(message_expression receiver: (receiver (super)) selector: (message_selector (identifier)))"
    );
}

#[test]
fn test_protocol_qualifier_is_a_type_qualifier() {
    let parse = parse_ok("void send(bycopy int value);");
    let qualifier = first_of_kind(&parse.syntax(), SyntaxKind::TYPE_QUALIFIER);
    assert_eq!(
        qualifier.first_child_or_token().unwrap().kind(),
        SyntaxKind::PROTOCOL_QUALIFIER
    );
}

// ============================================================================
// Message sends
// ============================================================================

#[test]
fn test_nested_message_sends() {
    assert_eq!(
        rule_sexp("_expression", "[[Foo alloc] init]"),
        "(fragment (message_expression \
         receiver: (receiver (message_expression receiver: (receiver (identifier)) \
         selector: (message_selector (identifier)))) \
         selector: (message_selector (identifier))))"
    );
}

#[test]
fn test_message_send_with_expression_arguments() {
    assert_eq!(
        rule_sexp("_expression", "[view setFrame:x + 1 animated:flag]"),
        "(fragment (message_expression receiver: (receiver (identifier)) \
         selector: (message_selector (keyword_argument_list \
         (keyword_argument keyword: (identifier) argument: (binary_expression left: (identifier) right: (number_literal))) \
         (keyword_argument keyword: (identifier) argument: (identifier))))))"
    );
}

#[test]
fn test_subscript_is_not_a_message() {
    let sexp = rule_sexp("_expression", "a[i]");
    assert!(sexp.starts_with("(fragment (subscript_expression"), "{sexp}");
}

// ============================================================================
// Protocol-qualified types against relational expressions
// ============================================================================

#[test]
fn test_protocol_type_in_parameter() {
    let sexp = parse_ok("void take(id<NSCopying> object);").to_sexp();
    assert!(
        sexp.contains(
            "(parameter_declaration type: (protocol_type_specifier (identifier) \
             (protocol_reference_list (identifier))) declarator: (identifier))"
        ),
        "{sexp}"
    );
}

#[test]
fn test_protocol_type_in_cast() {
    let sexp = rule_sexp("_expression", "(id<P, Q>)x");
    assert!(sexp.starts_with("(fragment (cast_expression"), "{sexp}");
    assert!(
        sexp.contains("(protocol_reference_list (identifier) (identifier))"),
        "{sexp}"
    );
}

#[test]
fn test_relational_in_expression() {
    let parse = parse_ok("int f(int x, int y) { return x < y; }");
    let root = parse.syntax();
    let binary = first_of_kind(&root, SyntaxKind::BINARY_EXPRESSION);
    assert_eq!(binary.text().to_string(), "x < y");
    assert!(
        root.descendants()
            .all(|n| n.kind() != SyntaxKind::PROTOCOL_TYPE_SPECIFIER)
    );
}

#[test]
fn test_chained_comparison_stays_an_expression() {
    let sexp = rule_sexp("_expression", "a < b > c");
    assert_eq!(
        sexp,
        "(fragment (binary_expression \
         left: (binary_expression left: (identifier) right: (identifier)) \
         right: (identifier)))"
    );
}

#[test]
fn test_chained_comparison_in_assignment_stays_an_expression() {
    let parse = parse_ok("void f(void) { x = a < b > c; }");
    let root = parse.syntax();
    let assignment = first_of_kind(&root, SyntaxKind::ASSIGNMENT_EXPRESSION);
    let right = parse.field_node(&assignment, "right").unwrap();
    assert_eq!(right.kind(), SyntaxKind::BINARY_EXPRESSION);
    assert_eq!(right.text().to_string(), "a < b > c");
    assert!(
        root.descendants()
            .all(|n| n.kind() != SyntaxKind::PROTOCOL_TYPE_SPECIFIER)
    );
}

#[test]
fn test_chained_comparison_statement_is_a_protocol_declaration() {
    let source = "void f(void) { a < b > c; }";
    let parse = parse_ok(source);
    let declaration = first_of_kind(&parse.syntax(), SyntaxKind::DECLARATION);
    let ty = parse.field_node(&declaration, "type").unwrap();
    assert_eq!(ty.kind(), SyntaxKind::PROTOCOL_TYPE_SPECIFIER);
    assert_eq!(ty.text().to_string(), "a < b >");
    assert_eq!(
        parse.field(&declaration, "declarator").unwrap().kind(),
        SyntaxKind::IDENT
    );

    let base = parse_with(c_grammar(), source);
    assert!(base.ok());
    assert_eq!(
        first_of_kind(&base.syntax(), SyntaxKind::EXPRESSION_STATEMENT).text().to_string(),
        "a < b > c;"
    );
}

#[test]
fn test_protocol_typed_local_is_a_declaration() {
    let parse = parse_ok("void f(void) { id<Delegate> d; }");
    let declaration = first_of_kind(&parse.syntax(), SyntaxKind::DECLARATION);
    let ty = parse.field(&declaration, "type").unwrap();
    assert_eq!(ty.kind(), SyntaxKind::PROTOCOL_TYPE_SPECIFIER);
}

// ============================================================================
// @defs bodies
// ============================================================================

#[rstest]
#[case("struct_specifier", "struct S @defs(Foo)")]
#[case("union_specifier", "union U @defs(Foo)")]
#[case("enum_specifier", "enum E @defs(Foo)")]
fn test_defs_body(#[case] rule: &str, #[case] source: &str) {
    let parse = crate::helpers::parse_helpers::parse_rule_ok(rule, source);
    let root = parse.syntax();
    let class_name = parse.field(&root, "class_name").unwrap();
    assert_eq!(class_name.as_token().unwrap().text(), "Foo");
    let body = parse.field(&root, "body").unwrap();
    assert_eq!(body.as_token().unwrap().text(), "Foo");
    let name = parse.field(&root, "name").unwrap();
    assert_eq!(name.kind(), SyntaxKind::TYPE_IDENTIFIER);
}

#[test]
fn test_brace_body_is_unaffected_by_defs() {
    let sexp = rule_sexp("struct_specifier", "struct S { int x; }");
    assert_eq!(
        sexp,
        "(struct_specifier name: (type_identifier) body: (field_declaration_list \
         (field_declaration type: (primitive_type) declarator: (identifier))))"
    );
}
