//! Class, category and protocol declarations, methods and selectors.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use objc_syntax::parser::SyntaxKind;

use crate::helpers::parse_helpers::{
    field_text, first_of_kind, nodes_of_kind, parse_ok, rule_sexp, sexp,
};

// ============================================================================
// Protocols
// ============================================================================

#[test]
fn test_protocol_with_adopted_protocol() {
    assert_eq!(
        sexp("@protocol Copying <NSObject> @end"),
        "(translation_unit (protocol_declaration name: (identifier) \
         (protocol_reference_list (identifier))))"
    );
}

#[test]
fn test_protocol_with_methods() {
    let parse = parse_ok("@protocol Drawing\n- (void)draw;\n+ (id)shared;\n@end\n");
    let root = parse.syntax();
    let protocol = first_of_kind(&root, SyntaxKind::PROTOCOL_DECLARATION);
    assert_eq!(field_text(&parse, &protocol, "name").unwrap(), "Drawing");
    assert_eq!(nodes_of_kind(&root, SyntaxKind::INSTANCE_METHOD_DECLARATION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CLASS_METHOD_DECLARATION).len(), 1);
}

#[test]
fn test_forward_declarations() {
    assert_eq!(
        sexp("@protocol A, B; @class C;"),
        "(translation_unit (protocol_declaration_list (identifier) (identifier)) \
         (class_declaration_list (identifier)))"
    );
}

// ============================================================================
// Interfaces and categories
// ============================================================================

#[test]
fn test_class_interface() {
    let source = "@interface Foo : Bar <Baz> { int x; } - (void)run:(int)n; @end";
    assert_eq!(
        sexp(source),
        "(translation_unit (class_interface name: (identifier) superclass: (identifier) \
         (protocol_reference_list (identifier)) \
         (instance_variables (instance_variable_declaration \
         (field_declaration type: (primitive_type) declarator: (identifier)))) \
         (interface_declaration_list (instance_method_declaration \
         return_type: (type_descriptor type: (primitive_type)) \
         selector: (keyword_selector (keyword_declarator keyword: (identifier) \
         type: (type_descriptor type: (primitive_type)) name: (identifier)))))))"
    );
}

#[test]
fn test_class_interface_fields() {
    let source = "@interface Foo : Bar <Baz> { int x; } - (void)run:(int)n; @end";
    let parse = parse_ok(source);
    let root = parse.syntax();
    let interface = first_of_kind(&root, SyntaxKind::CLASS_INTERFACE);
    assert_eq!(field_text(&parse, &interface, "name").unwrap(), "Foo");
    assert_eq!(field_text(&parse, &interface, "superclass").unwrap(), "Bar");

    let method = first_of_kind(&root, SyntaxKind::INSTANCE_METHOD_DECLARATION);
    assert_eq!(field_text(&parse, &method, "return_type").unwrap(), "void");
    let selector = parse.field_node(&method, "selector").unwrap();
    assert_eq!(selector.kind(), SyntaxKind::KEYWORD_SELECTOR);

    let declarator = first_of_kind(&root, SyntaxKind::KEYWORD_DECLARATOR);
    assert_eq!(field_text(&parse, &declarator, "keyword").unwrap(), "run");
    assert_eq!(field_text(&parse, &declarator, "type").unwrap(), "int");
    assert_eq!(field_text(&parse, &declarator, "name").unwrap(), "n");
}

#[test]
fn test_visibility_sections() {
    let parse = parse_ok(
        "@interface Account {\n  @private\n  int balance;\n  @public\n  char *owner;\n  @protected\n}\n@end\n",
    );
    let root = parse.syntax();
    let kinds: Vec<SyntaxKind> = nodes_of_kind(&root, SyntaxKind::INSTANCE_VARIABLE_DECLARATION)
        .iter()
        .map(|n| n.first_child_or_token().unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PRIVATE,
            SyntaxKind::FIELD_DECLARATION,
            SyntaxKind::PUBLIC,
            SyntaxKind::FIELD_DECLARATION,
            SyntaxKind::PROTECTED,
        ]
    );
}

#[test]
fn test_empty_instance_variables() {
    let parse = parse_ok("@interface Empty {} @end");
    let ivars = first_of_kind(&parse.syntax(), SyntaxKind::INSTANCE_VARIABLES);
    assert_eq!(ivars.text().to_string(), "{}");
}

#[rstest]
#[case("@interface Foo (Extras) - (void)extra; @end", Some("Extras"))]
#[case("@interface Foo () - (void)hidden; @end", None)]
fn test_category_interface(#[case] source: &str, #[case] category: Option<&str>) {
    let parse = parse_ok(source);
    let node = first_of_kind(&parse.syntax(), SyntaxKind::CATEGORY_INTERFACE);
    assert_eq!(field_text(&parse, &node, "name").unwrap(), "Foo");
    assert_eq!(field_text(&parse, &node, "category").as_deref(), category);
}

#[test]
fn test_interface_with_declarations() {
    let parse = parse_ok("@interface Foo\nextern int counter;\n- (int)count;\n@end\n");
    let list = first_of_kind(&parse.syntax(), SyntaxKind::INTERFACE_DECLARATION_LIST);
    let kinds: Vec<SyntaxKind> = list.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::DECLARATION, SyntaxKind::INSTANCE_METHOD_DECLARATION]
    );
}

// ============================================================================
// Methods and selectors
// ============================================================================

#[test]
fn test_unary_selector() {
    let parse = parse_ok("@interface Foo - (id)init; @end");
    let method = first_of_kind(&parse.syntax(), SyntaxKind::INSTANCE_METHOD_DECLARATION);
    let selector = parse.field(&method, "selector").unwrap();
    assert_eq!(selector.kind(), SyntaxKind::UNARY_SELECTOR);
}

#[test]
fn test_method_without_return_type() {
    let parse = parse_ok("@interface Foo + alloc; @end");
    let method = first_of_kind(&parse.syntax(), SyntaxKind::CLASS_METHOD_DECLARATION);
    assert!(parse.field(&method, "return_type").is_none());
    assert_eq!(field_text(&parse, &method, "selector").unwrap(), "alloc");
}

#[test]
fn test_multi_part_keyword_selector() {
    let parse = parse_ok("@interface Foo - (void)move:(int)x to:(int)y :(int)z; @end");
    let declarators = nodes_of_kind(&parse.syntax(), SyntaxKind::KEYWORD_DECLARATOR);
    let keywords: Vec<Option<String>> = declarators
        .iter()
        .map(|d| field_text(&parse, d, "keyword"))
        .collect();
    assert_eq!(
        keywords,
        vec![Some("move".to_string()), Some("to".to_string()), None]
    );
    let names: Vec<String> = declarators
        .iter()
        .map(|d| field_text(&parse, d, "name").unwrap())
        .collect();
    assert_eq!(names, vec!["x", "y", "z"]);
}

#[test]
fn test_variadic_method() {
    let parse = parse_ok("@interface Foo - (void)log:(char *)format, ...; @end");
    let method = first_of_kind(&parse.syntax(), SyntaxKind::INSTANCE_METHOD_DECLARATION);
    assert!(method.text().to_string().ends_with(", ...;"));
}

#[test]
fn test_protocol_qualified_method_types() {
    let parse = parse_ok("@interface Foo - (oneway void)release; - (void)take:(in id<Source>)source; @end");
    let root = parse.syntax();
    assert_eq!(nodes_of_kind(&root, SyntaxKind::TYPE_QUALIFIER).len(), 2);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::PROTOCOL_TYPE_SPECIFIER).len(), 1);
}

// ============================================================================
// Implementations
// ============================================================================

#[test]
fn test_class_implementation() {
    let source = "@implementation Foo : Bar\n\
                  - (void)run:(int)n {\n  [self log:n];\n}\n\
                  + (id)make { return [[self alloc] init]; }\n\
                  @end\n";
    let parse = parse_ok(source);
    let root = parse.syntax();
    let implementation = first_of_kind(&root, SyntaxKind::CLASS_IMPLEMENTATION);
    assert_eq!(field_text(&parse, &implementation, "name").unwrap(), "Foo");
    assert_eq!(field_text(&parse, &implementation, "superclass").unwrap(), "Bar");

    let instance = first_of_kind(&root, SyntaxKind::INSTANCE_METHOD_DEFINITION);
    let body = parse.field_node(&instance, "body").unwrap();
    assert_eq!(body.kind(), SyntaxKind::COMPOUND_STATEMENT);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CLASS_METHOD_DEFINITION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::MESSAGE_EXPRESSION).len(), 3);
}

#[test]
fn test_implementation_with_ivars_and_functions() {
    let source = "@implementation Counter { int value; }\n\
                  static int helper(int x) { return x + 1; }\n\
                  - (int)next { return helper(value); }\n\
                  @end\n";
    let parse = parse_ok(source);
    let list = first_of_kind(&parse.syntax(), SyntaxKind::IMPLEMENTATION_DEFINITION_LIST);
    let kinds: Vec<SyntaxKind> = list.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::FUNCTION_DEFINITION, SyntaxKind::INSTANCE_METHOD_DEFINITION]
    );
}

#[test]
fn test_method_definition_with_stray_semicolon() {
    let parse = parse_ok("@implementation Foo - (void)run; { } @end");
    assert_eq!(
        nodes_of_kind(&parse.syntax(), SyntaxKind::INSTANCE_METHOD_DEFINITION).len(),
        1
    );
}

#[test]
fn test_category_implementation() {
    let parse = parse_ok("@implementation Foo (Extras) - (void)extra { } @end");
    let node = first_of_kind(&parse.syntax(), SyntaxKind::CATEGORY_IMPLEMENTATION);
    assert_eq!(field_text(&parse, &node, "category").unwrap(), "Extras");
}

// ============================================================================
// Single rules
// ============================================================================

#[test]
fn test_message_expression_rule() {
    assert_eq!(
        rule_sexp("message_expression", "[self run:5]"),
        "(message_expression receiver: (receiver (self)) \
         selector: (message_selector (keyword_argument_list \
         (keyword_argument keyword: (identifier) argument: (number_literal)))))"
    );
}

#[test]
fn test_keyword_declarator_rule() {
    assert_eq!(
        rule_sexp("keyword_declarator", "with:(char *)name"),
        "(keyword_declarator keyword: (identifier) \
         type: (type_descriptor type: (primitive_type) declarator: (abstract_pointer_declarator)) \
         name: (identifier))"
    );
}
