//! Parsing shortcuts with readable failure output.

use objc_syntax::parser::{ErrorCode, NodeOrToken, Parse, SyntaxElement, SyntaxKind, SyntaxNode, parse_rule};
use objc_syntax::{LineIndex, parse};

/// Render every diagnostic as `line:col: CODE: message`.
pub fn describe_errors(source: &str, parse: &Parse) -> String {
    let index = LineIndex::new(source);
    parse
        .errors()
        .iter()
        .map(|e| {
            let span = e.span(&index);
            format!(
                "  {}:{}: {}",
                span.start.line + 1,
                span.start.column + 1,
                e.format()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a whole file and assert it has no diagnostics.
pub fn parse_ok(source: &str) -> Parse {
    let result = parse(source);
    assert!(
        result.ok(),
        "Expected no errors, got {}:\n{}\nInput: {}",
        result.errors().len(),
        describe_errors(source, &result),
        source
    );
    result
}

/// Parse a single rule and assert it has no diagnostics.
pub fn parse_rule_ok(rule: &str, source: &str) -> Parse {
    let result = parse_rule(rule, source).unwrap_or_else(|e| panic!("{e}"));
    assert!(
        result.ok(),
        "Failed to parse `{}`:\n{}\nInput: {}",
        rule,
        describe_errors(source, &result),
        source
    );
    result
}

pub fn sexp(source: &str) -> String {
    parse_ok(source).to_sexp()
}

pub fn rule_sexp(rule: &str, source: &str) -> String {
    parse_rule_ok(rule, source).to_sexp()
}

pub fn error_codes(parse: &Parse) -> Vec<ErrorCode> {
    parse.errors().iter().map(|e| e.code).collect()
}

pub fn element_text(element: &SyntaxElement) -> String {
    match element {
        NodeOrToken::Node(node) => node.text().to_string(),
        NodeOrToken::Token(token) => token.text().to_string(),
    }
}

/// Every node of `kind` under `root`, in source order.
pub fn nodes_of_kind(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    root.descendants().filter(|n| n.kind() == kind).collect()
}

/// The first node of `kind` under `root`.
pub fn first_of_kind(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in:\n{root:#?}"))
}

/// Text of field `name` on `node`.
pub fn field_text(parse: &Parse, node: &SyntaxNode, name: &str) -> Option<String> {
    parse.field(node, name).map(|e| element_text(&e))
}
