//! Parsing source text with an effective grammar
//!
//! Builds a rowan GreenNode tree from tokens. The tree is lossless: every
//! byte of the input, trivia and skipped tokens included, is in it.

use std::rc::Rc;

use rayon::prelude::*;
use rowan::{GreenNode, NodeOrToken};

use super::engine::{Ctx, Engine, Frag, Lexeme, Sync};
use super::errors::{ParseContext, SyntaxError};
use super::lexer::{Token, tokenize};
use super::sexp;
use super::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode};
use super::tree::{self, FieldTable};
use crate::grammar::{EffectiveGrammar, RuleId, objc_grammar};

/// Parse result: the green tree, its diagnostics and its field labels
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    fields: FieldTable,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every `(field, child)` pair of `node`, in source order. A child
    /// under nested fields appears once per label, outermost first.
    pub fn all_fields(&self, node: &SyntaxNode) -> Vec<(&'static str, SyntaxElement)> {
        let Some(labels) = self.fields.get(&field_key(node)) else {
            return Vec::new();
        };
        let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
        labels
            .iter()
            .filter_map(|(name, index)| {
                children
                    .get(*index as usize)
                    .map(|child| (*name, child.clone()))
            })
            .collect()
    }

    /// Distinct field names used by the children of `node`.
    pub fn field_names(&self, node: &SyntaxNode) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for (name, _) in self.all_fields(node) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// The child of `node` stored under `name`.
    ///
    /// A field can cover several children (a keyword and its operands, say);
    /// the first named one is returned, or the first one if none is named.
    pub fn field(&self, node: &SyntaxNode, name: &str) -> Option<SyntaxElement> {
        let labelled = self.fields(node, name);
        labelled
            .iter()
            .find(|child| child.kind().is_named())
            .or_else(|| labelled.first())
            .cloned()
    }

    /// All children of `node` stored under `name`, such as every
    /// `declarator` of a multi-variable declaration.
    pub fn fields(&self, node: &SyntaxNode, name: &str) -> Vec<SyntaxElement> {
        self.all_fields(node)
            .into_iter()
            .filter(|(field, _)| *field == name)
            .map(|(_, child)| child)
            .collect()
    }

    /// Like [`Parse::field`], for fields that hold a node.
    pub fn field_node(&self, node: &SyntaxNode, name: &str) -> Option<SyntaxNode> {
        self.field(node, name).and_then(NodeOrToken::into_node)
    }

    /// The innermost field label of each labelled child, by child index.
    pub(crate) fn child_labels(&self, node: &SyntaxNode) -> Vec<(u32, &'static str)> {
        let Some(labels) = self.fields.get(&field_key(node)) else {
            return Vec::new();
        };
        let mut innermost: Vec<(u32, &'static str)> = Vec::new();
        for (name, index) in labels {
            match innermost.iter_mut().find(|(i, _)| i == index) {
                Some(entry) => entry.1 = *name,
                None => innermost.push((*index, *name)),
            }
        }
        innermost
    }

    /// The tree as an S-expression of named nodes with field labels.
    pub fn to_sexp(&self) -> String {
        sexp::to_sexp(self, &self.syntax())
    }

    /// Indented dump of every node and token with its range.
    pub fn debug_dump(&self) -> String {
        format!("{:#?}", self.syntax())
    }
}

fn field_key(node: &SyntaxNode) -> tree::FieldKey {
    (
        node.kind(),
        node.text_range(),
        node.ancestors().count() as u32 - 1,
    )
}

/// Parse Objective-C source into a CST
pub fn parse(input: &str) -> Parse {
    parse_with(objc_grammar(), input)
}

/// Parse `input` as a whole file of `grammar`.
pub fn parse_with(grammar: &EffectiveGrammar, input: &str) -> Parse {
    run(grammar, grammar.start(), input)
}

/// Parse several independent sources in parallel.
pub fn parse_many(inputs: &[&str]) -> Vec<Parse> {
    let grammar = objc_grammar();
    inputs.par_iter().map(|input| parse_with(grammar, input)).collect()
}

pub(crate) fn significant<'t>(tokens: &[Token<'t>]) -> Vec<Lexeme<'t>> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !token.kind.is_trivia())
        .map(|(raw, token)| Lexeme {
            kind: token.kind,
            text: token.text,
            raw,
        })
        .collect()
}

/// Run rule `id` over all of `input`.
///
/// Input the rule cannot cover becomes one trailing ERROR region. Visible
/// rules become the root node; hidden and leaf rules hang under FRAGMENT.
pub(crate) fn run(grammar: &EffectiveGrammar, id: RuleId, input: &str) -> Parse {
    let tokens = tokenize(input);
    let lexemes = significant(&tokens);
    let len = lexemes.len() as u32;
    let def = grammar.rule(id);
    let root = match def.kind {
        Some(kind) if !def.leaf => kind,
        _ => SyntaxKind::FRAGMENT,
    };

    let mut engine = Engine::new(grammar, &lexemes);
    let ends = engine.rule(
        id,
        0,
        Ctx {
            floor: i32::MIN,
            sync: Sync::Eof,
        },
    );
    let frag = match ends.get(&len) {
        Some(candidate) => candidate.tree.clone(),
        None => {
            let (end, tree) = ends
                .iter()
                .next_back()
                .map_or((0, Rc::new(Frag::Empty)), |(end, candidate)| (*end, candidate.tree.clone()));
            tracing::debug!(
                "`{}` stopped at token {} of {}; the rest is skipped",
                def.name,
                end,
                len
            );
            let body = match &*tree {
                Frag::Node(kind, inner) if *kind == root => inner.clone(),
                _ => tree.clone(),
            };
            let rest = Rc::new(Frag::Skipped {
                start: end,
                end: len,
                context: ParseContext::for_rule(def.name),
                expected: Rc::from(Vec::new()),
            });
            Rc::new(Frag::Concat(body, rest))
        }
    };
    let too_deep = engine.too_deep;
    drop(ends);

    let built = tree::build(&tokens, &lexemes, root, frag, too_deep);
    tracing::trace!(
        "parsed {} tokens with `{}`: {} errors",
        tokens.len(),
        grammar.name(),
        built.errors.len()
    );
    Parse {
        green: built.green,
        errors: built.errors,
        fields: built.fields,
    }
}
