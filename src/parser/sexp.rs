//! S-expression rendering of a parse tree.
//!
//! Only named kinds are printed: nodes, and tokens produced by leaf rules or
//! literal patterns. Keywords, punctuation and trivia are left out. A child
//! stored under a field is prefixed with `name: `; a missing closer prints
//! as `(MISSING)`.

use rowan::NodeOrToken;

use super::parser::Parse;
use super::syntax_kind::{SyntaxKind, SyntaxNode};

pub(crate) fn to_sexp(parse: &Parse, node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(parse, node, &mut out);
    out
}

fn kind_name(kind: SyntaxKind) -> String {
    match kind.rule_name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", kind),
    }
}

fn write_node(parse: &Parse, node: &SyntaxNode, out: &mut String) {
    if node.kind() == SyntaxKind::ERROR && node.text_range().is_empty() {
        out.push_str("(MISSING)");
        return;
    }
    out.push('(');
    out.push_str(&kind_name(node.kind()));

    let labels = parse.child_labels(node);
    for (index, child) in node.children_with_tokens().enumerate() {
        if !child.kind().is_named() {
            continue;
        }
        out.push(' ');
        if let Some((_, name)) = labels.iter().find(|(i, _)| *i as usize == index) {
            out.push_str(name);
            out.push_str(": ");
        }
        match child {
            NodeOrToken::Node(child) => write_node(parse, &child, out),
            NodeOrToken::Token(token) => {
                out.push('(');
                out.push_str(&kind_name(token.kind()));
                out.push(')');
            }
        }
    }
    out.push(')');
}
