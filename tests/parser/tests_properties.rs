//! Whole-tree properties: losslessness, determinism, field stability and
//! parallel parsing.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use objc_syntax::parser::SyntaxKind;
use objc_syntax::{objc_grammar, parse, parse_many, parse_with};

use crate::helpers::parse_helpers::{field_text, nodes_of_kind, parse_ok};

const WIDGET: &str = r#"#import <Foundation/Foundation.h>

/* A small class with a bit of everything */
@protocol Resizing <NSObject>
- (void)resizeTo:(double)width by:(double)height;
@end

@interface Widget : NSObject <Resizing> {
  @private
  double _width, _height;
  id<Resizing> delegate;
}
+ (id)widgetWithName:(char *)name;
- (double)area;
@end

@implementation Widget
+ (id)widgetWithName:(char *)name {
  Widget *w = [[self alloc] init];
  [w setName:name];
  return w;
}

- (double)area {
  return _width * _height; // no overflow checks
}

- (void)resizeTo:(double)width by:(double)height {
  if (width < 0 || height < 0) return;
  _width = width;
  _height = height;
  [delegate resizeTo:width by:height];
}
@end
"#;

// ============================================================================
// Losslessness
// ============================================================================

#[rstest]
#[case::valid(WIDGET)]
#[case::comments_only("// one\n/* two */\n")]
#[case::broken("@interface Foo { int x; 9 }\n- (void)a { ) }\n")]
#[case::invalid_characters("int x = 1 ` 2;\n\\\n")]
#[case::unterminated("@implementation Foo\n- (void)run {\n  [self go")]
fn test_tree_text_equals_source(#[case] source: &str) {
    let result = parse(source);
    assert_eq!(result.syntax().text().to_string(), source);
    assert_eq!(u32::from(result.syntax().text_range().end()) as usize, source.len());
}

#[test]
fn test_sample_file_parses_cleanly() {
    let result = parse_ok(WIDGET);
    let root = result.syntax();
    assert_eq!(nodes_of_kind(&root, SyntaxKind::PROTOCOL_DECLARATION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CLASS_INTERFACE).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::CLASS_IMPLEMENTATION).len(), 1);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::MESSAGE_EXPRESSION).len(), 4);
    assert_eq!(nodes_of_kind(&root, SyntaxKind::PROTOCOL_TYPE_SPECIFIER).len(), 1);
}

#[test]
fn test_trivia_stays_outside_nodes_it_does_not_belong_to() {
    let result = parse("  @class A;  ");
    let list = result.syntax().first_child().unwrap();
    assert_eq!(list.kind(), SyntaxKind::CLASS_DECLARATION_LIST);
    assert_eq!(list.text().to_string(), "@class A;");
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeated_parses_are_identical() {
    let first = parse(WIDGET);
    for _ in 0..3 {
        let again = parse(WIDGET);
        assert_eq!(again.green, first.green);
        assert_eq!(again.to_sexp(), first.to_sexp());
        assert_eq!(again.errors, first.errors);
    }
}

#[test]
fn test_parse_many_matches_sequential_parses() {
    let sources = [
        WIDGET,
        "@protocol P @end",
        "int broken( {",
        "",
        "void f(void) { [a b:c]; }",
    ];
    let parallel = parse_many(&sources);
    assert_eq!(parallel.len(), sources.len());
    for (result, source) in parallel.iter().zip(sources) {
        let sequential = parse_with(objc_grammar(), source);
        assert_eq!(result.green, sequential.green, "{source}");
        assert_eq!(result.errors, sequential.errors, "{source}");
    }
}

#[test]
fn test_grammar_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("@interface C{i} - (int)value{i}; @end");
                parse(&source).to_sexp()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "(translation_unit (class_interface name: (identifier) \
             (interface_declaration_list (instance_method_declaration \
             return_type: (type_descriptor type: (primitive_type)) selector: (unary_selector)))))"
        );
    }
}

// ============================================================================
// Field stability
// ============================================================================

#[rstest]
#[case("@interface A @end", "A", None)]
#[case("@interface B : Base @end", "B", Some("Base"))]
#[case("@interface C : Root <P, Q> { int i; } - (void)m; @end", "C", Some("Root"))]
#[case("/* doc */ @interface D : NSObject\n+ (id)new;\n@end", "D", Some("NSObject"))]
fn test_class_interface_fields_are_stable(
    #[case] source: &str,
    #[case] name: &str,
    #[case] superclass: Option<&str>,
) {
    let result = parse_ok(source);
    let interface = result.syntax().first_child().unwrap();
    assert_eq!(interface.kind(), SyntaxKind::CLASS_INTERFACE);
    assert_eq!(field_text(&result, &interface, "name").as_deref(), Some(name));
    assert_eq!(field_text(&result, &interface, "superclass").as_deref(), superclass);
}

#[rstest]
#[case("[a run]", "a", "run")]
#[case("[self runWith:1]", "self", "runWith:1")]
#[case("[[A new] go:1 with:2]", "[A new]", "go:1 with:2")]
#[case("[super dealloc]", "super", "dealloc")]
fn test_message_fields_are_stable(#[case] source: &str, #[case] receiver: &str, #[case] selector: &str) {
    let result = parse_ok(&format!("void f(void) {{ {source}; }}"));
    let message = nodes_of_kind(&result.syntax(), SyntaxKind::MESSAGE_EXPRESSION)
        .into_iter()
        .next()
        .unwrap();
    assert_eq!(result.field_names(&message), vec!["receiver", "selector"]);
    assert_eq!(field_text(&result, &message, "receiver").as_deref(), Some(receiver));
    assert_eq!(field_text(&result, &message, "selector").as_deref(), Some(selector));
}

#[test]
fn test_multiple_declarators_share_a_field() {
    let result = parse_ok("int a, *b, c[2];");
    let declaration = result.syntax().first_child().unwrap();
    let declarators: Vec<SyntaxKind> = result
        .fields(&declaration, "declarator")
        .iter()
        .map(|e| e.kind())
        .collect();
    assert_eq!(
        declarators,
        vec![
            SyntaxKind::IDENT,
            SyntaxKind::POINTER_DECLARATOR,
            SyntaxKind::ARRAY_DECLARATOR
        ]
    );
}

#[test]
fn test_nested_field_labels() {
    let result = parse_ok("@implementation Foo - (void)run { } @end");
    let method = nodes_of_kind(&result.syntax(), SyntaxKind::INSTANCE_METHOD_DEFINITION)
        .into_iter()
        .next()
        .unwrap();
    let labels: Vec<&str> = result.all_fields(&method).iter().map(|(name, _)| *name).collect();
    assert_eq!(labels, vec!["return_type", "return_type", "return_type", "selector", "body"]);
}
