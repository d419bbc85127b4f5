//! Turning the engine's fragment tree into a rowan green tree.
//!
//! Trivia never reaches the engine, so it is threaded back in here: it is
//! emitted right before the next token or node start, which keeps comments
//! outside the node that follows them. Whatever trivia is left at the end
//! goes to the root.
//!
//! Field labels do not fit into the green tree. They are collected into a
//! side table keyed by the node they belong to.

use std::rc::Rc;

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::engine::{Frag, Lexeme};
use super::errors::{ErrorCode, ParseContext, SyntaxError, unexpected_in};
use super::lexer::Token;
use super::syntax_kind::SyntaxKind;

/// A node, identified by its kind, its range and its number of ancestors
pub(crate) type FieldKey = (SyntaxKind, TextRange, u32);

/// Field labels per node: `(name, child index)`, trivia included in the
/// indices. A child under nested fields carries every label, outermost first.
pub(crate) type FieldTable = FxHashMap<FieldKey, Vec<(&'static str, u32)>>;

pub(crate) struct Built {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    pub fields: FieldTable,
}

enum Step {
    Visit(Rc<Frag>),
    Finish,
    PopLabel,
}

struct OpenNode {
    kind: SyntaxKind,
    started: bool,
    start: TextSize,
    children: u32,
    fields: Vec<(&'static str, u32)>,
}

impl OpenNode {
    fn new(kind: SyntaxKind, started: bool, start: TextSize) -> Self {
        Self {
            kind,
            started,
            start,
            children: 0,
            fields: Vec::new(),
        }
    }
}

/// A run of skipped tokens, turned into one ERROR node
struct ErrorRegion {
    /// Significant index one past the last skipped token
    end: u32,
    start: TextSize,
    found: Option<SmolStr>,
    context: ParseContext,
    expected: Rc<[SmolStr]>,
}

struct TreeBuilder<'a, 't> {
    tokens: &'a [Token<'t>],
    lexemes: &'a [Lexeme<'t>],
    builder: GreenNodeBuilder<'static>,
    /// Next raw token to emit
    cursor: usize,
    /// End of the text emitted so far
    emitted: TextSize,
    nodes: Vec<OpenNode>,
    labels: Vec<(&'static str, usize)>,
    error: Option<ErrorRegion>,
    errors: Vec<SyntaxError>,
    fields: FieldTable,
}

/// Build the tree for `frag` under a root of kind `root`.
///
/// A top-level `Node(root, ..)` in `frag` is the root itself.
pub(crate) fn build(
    tokens: &[Token<'_>],
    lexemes: &[Lexeme<'_>],
    root: SyntaxKind,
    frag: Rc<Frag>,
    too_deep: Option<u32>,
) -> Built {
    let body = match &*frag {
        Frag::Node(kind, inner) if *kind == root => inner.clone(),
        _ => frag.clone(),
    };
    drop(frag);

    let mut tree = TreeBuilder {
        tokens,
        lexemes,
        builder: GreenNodeBuilder::new(),
        cursor: 0,
        emitted: TextSize::new(0),
        nodes: Vec::new(),
        labels: Vec::new(),
        error: None,
        errors: Vec::new(),
        fields: FieldTable::default(),
    };
    tree.builder.start_node(root.into());
    tree.nodes.push(OpenNode::new(root, true, TextSize::new(0)));

    let mut steps = vec![Step::Finish, Step::Visit(body)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(frag) => match &*frag {
                Frag::Empty => {}
                Frag::Token(pos) => tree.token(*pos, None),
                Frag::Leaf(kind, pos) => tree.token(*pos, Some(*kind)),
                Frag::Node(kind, child) => {
                    tree.close_error();
                    tree.nodes.push(OpenNode::new(*kind, false, tree.emitted));
                    steps.push(Step::Finish);
                    steps.push(Step::Visit(child.clone()));
                }
                Frag::Concat(left, right) => {
                    steps.push(Step::Visit(right.clone()));
                    steps.push(Step::Visit(left.clone()));
                }
                Frag::Field(name, child) => {
                    tree.labels.push((*name, tree.nodes.len() - 1));
                    steps.push(Step::PopLabel);
                    steps.push(Step::Visit(child.clone()));
                }
                Frag::Skipped {
                    start,
                    end,
                    context,
                    expected,
                } => tree.skipped(*start, *end, *context, expected),
                Frag::Missing {
                    token,
                    opener,
                    context,
                } => tree.missing(token, *opener, *context),
            },
            Step::Finish => tree.finish_node(),
            Step::PopLabel => {
                tree.labels.pop();
            }
        }
    }

    tree.lexer_errors();
    if let Some(pos) = too_deep {
        let range = tree.lexeme_range(pos);
        // recovery around the cut-off construct only echoes the depth limit
        tree.errors
            .retain(|error| error.code == ErrorCode::E0101 || error.range.end() <= range.start());
        tree.errors.push(SyntaxError::new(
            "nesting too deep; the rest of this construct was not parsed",
            range,
            ErrorCode::E0902,
        ));
    }
    tree.errors.sort_by_key(|error| error.range.start());

    Built {
        green: tree.builder.finish(),
        errors: tree.errors,
        fields: tree.fields,
    }
}

impl TreeBuilder<'_, '_> {
    fn raw_range(&self, raw: usize) -> TextRange {
        self.tokens[raw].range()
    }

    fn lexeme_range(&self, pos: u32) -> TextRange {
        match self.lexemes.get(pos as usize) {
            Some(lexeme) => self.raw_range(lexeme.raw),
            None => TextRange::empty(self.tokens.last().map_or(TextSize::new(0), |t| t.range().end())),
        }
    }

    /// Count a new child of the innermost started node, labelling it when
    /// asked.
    fn add_child(&mut self, labelled: bool) {
        let depth = self.nodes.iter().rposition(|node| node.started).unwrap_or(0);
        let node = &mut self.nodes[depth];
        let index = node.children;
        node.children += 1;
        if labelled {
            for (name, _) in self.labels.iter().filter(|(_, d)| *d == depth) {
                node.fields.push((*name, index));
            }
        }
    }

    fn emit(&mut self, raw: usize, kind: SyntaxKind) {
        let token = &self.tokens[raw];
        self.builder.token(kind.into(), token.text);
        self.emitted = token.range().end();
        self.cursor = raw + 1;
    }

    /// Emit pending raw tokens before `raw` as children of the current node.
    fn flush_to(&mut self, raw: usize) {
        while self.cursor < raw {
            let cursor = self.cursor;
            if self.error.is_none() {
                self.add_child(false);
            }
            self.emit(cursor, self.tokens[cursor].kind);
        }
    }

    fn start_pending(&mut self) {
        let first = self.nodes.iter().position(|node| !node.started);
        let Some(first) = first else {
            return;
        };
        for depth in first..self.nodes.len() {
            let labels: Vec<&'static str> = self
                .labels
                .iter()
                .filter(|(_, d)| *d == depth - 1)
                .map(|(name, _)| *name)
                .collect();
            let parent = &mut self.nodes[depth - 1];
            let index = parent.children;
            parent.children += 1;
            parent.fields.extend(labels.into_iter().map(|name| (name, index)));

            let node = &mut self.nodes[depth];
            node.started = true;
            node.start = self.emitted;
            self.builder.start_node(node.kind.into());
        }
    }

    fn token(&mut self, pos: u32, kind: Option<SyntaxKind>) {
        self.close_error();
        let Some(lexeme) = self.lexemes.get(pos as usize) else {
            return;
        };
        let raw = lexeme.raw;
        self.flush_to(raw);
        self.start_pending();
        self.add_child(true);
        self.emit(raw, kind.unwrap_or(lexeme.kind));
    }

    fn finish_node(&mut self) {
        self.close_error();
        self.start_pending();
        if self.nodes.len() == 1 {
            self.flush_to(self.tokens.len());
        }
        let Some(node) = self.nodes.pop() else {
            return;
        };
        self.builder.finish_node();
        if !node.fields.is_empty() {
            let key = (
                node.kind,
                TextRange::new(node.start, self.emitted),
                self.nodes.len() as u32,
            );
            self.fields.insert(key, node.fields);
        }
    }

    fn skipped(&mut self, start: u32, end: u32, context: ParseContext, expected: &Rc<[SmolStr]>) {
        if start >= end {
            return;
        }
        let continues = self.error.as_ref().is_some_and(|region| region.end == start);
        if !continues {
            self.close_error();
            if let Some(lexeme) = self.lexemes.get(start as usize) {
                let raw = lexeme.raw;
                self.flush_to(raw);
            }
            self.start_pending();
            self.add_child(false);
            self.builder.start_node(SyntaxKind::ERROR.into());
            self.error = Some(ErrorRegion {
                end: start,
                start: self.lexeme_range(start).start(),
                found: None,
                context,
                expected: expected.clone(),
            });
        }
        for pos in start..end {
            let Some(lexeme) = self.lexemes.get(pos as usize).copied() else {
                break;
            };
            self.flush_to(lexeme.raw);
            self.emit(lexeme.raw, lexeme.kind);
            if let Some(region) = self.error.as_mut() {
                if region.found.is_none() && lexeme.kind != SyntaxKind::ERROR {
                    region.found = Some(SmolStr::new(lexeme.text));
                }
            }
        }
        if let Some(region) = self.error.as_mut() {
            region.end = end;
        }
    }

    fn close_error(&mut self) {
        let Some(region) = self.error.take() else {
            return;
        };
        self.builder.finish_node();
        // regions made only of invalid characters were reported by the lexer
        if let Some(found) = region.found {
            let range = TextRange::new(region.start, self.emitted);
            self.errors
                .push(unexpected_in(&found, range, region.context, &region.expected));
        }
    }

    fn missing(&mut self, token: &str, opener: u32, context: ParseContext) {
        self.close_error();
        self.start_pending();
        self.add_child(false);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.builder.finish_node();

        let opener_range = self.lexeme_range(opener);
        let opener_text = self
            .lexemes
            .get(opener as usize)
            .map_or("", |lexeme| lexeme.text);
        let error = SyntaxError::builder(ErrorCode::E0201)
            .message(format!("missing `{}` {}", token, context.description()))
            .at_offset(self.emitted)
            .hint(format!("insert `{}`", token))
            .related(format!("`{}` opened here", opener_text), opener_range)
            .build();
        self.errors.push(error);
    }

    fn lexer_errors(&mut self) {
        for token in self.tokens.iter().filter(|t| t.kind == SyntaxKind::ERROR) {
            let message = if token.text.starts_with("/*") {
                "unterminated block comment".to_string()
            } else {
                format!("invalid character `{}`", token.text)
            };
            self.errors.push(SyntaxError::new(message, token.range(), ErrorCode::E0101));
        }
    }
}
