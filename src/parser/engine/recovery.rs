//! Skipping input inside delimited scopes.
//!
//! A sequence that starts and ends with literal tokens (`{ ... }`,
//! `@interface ... @end`, `( ... )`) is a recovery scope: the element before
//! its closer runs with the closer as sync token. A repetition that gets
//! stuck before the sync skips balanced token runs until one of its elements
//! can start again, and a closer that never comes is inserted as missing.

use std::rc::Rc;

use smol_str::SmolStr;

use super::{Engine, Frag, Sync};
use crate::grammar::{Rule, Terminal, TerminalSet};
use crate::parser::SyntaxKind;
use crate::parser::errors::ParseContext;

/// `expected` lists longer than this fall back to the context description
const MAX_EXPECTED: usize = 8;

/// The closing literal of a recovery scope
pub(super) fn scope_closer(items: &[Rule]) -> Option<&'static str> {
    match (items.first(), items.last()) {
        (Some(Rule::Token(_)), Some(Rule::Token(closer))) if items.len() >= 3 => Some(*closer),
        _ => None,
    }
}

/// A run of skipped tokens
pub(super) struct Skip {
    pub start: u32,
    pub end: u32,
    expected: Rc<[SmolStr]>,
}

impl Skip {
    pub(super) fn into_frag(self, context: ParseContext) -> Frag {
        Frag::Skipped {
            start: self.start,
            end: self.end,
            context,
            expected: self.expected,
        }
    }
}

fn opener_closer(kind: SyntaxKind) -> Option<SyntaxKind> {
    match kind {
        SyntaxKind::L_PAREN => Some(SyntaxKind::R_PAREN),
        SyntaxKind::L_BRACKET => Some(SyntaxKind::R_BRACKET),
        SyntaxKind::L_BRACE => Some(SyntaxKind::R_BRACE),
        _ => None,
    }
}

impl Engine<'_, '_> {
    /// End of input, or an `@end` that a scope other than an `@end` scope
    /// must not swallow.
    pub(super) fn at_hard_stop(&self, pos: u32, sync: Sync) -> bool {
        match self.token(pos) {
            None => true,
            Some(tok) => tok.kind == SyntaxKind::AT_END_KW && !matches!(sync, Sync::Eof | Sync::Token("@end")),
        }
    }

    fn at_sync(&self, pos: u32, sync: Sync) -> bool {
        match (sync, self.token(pos)) {
            (Sync::Token(text), Some(tok)) => tok.text == text,
            (Sync::Eof, None) => true,
            _ => false,
        }
    }

    fn first_set(&mut self, rule: &Rule) -> Rc<TerminalSet> {
        let key = rule as *const Rule;
        if let Some(set) = self.first_sets.get(&key) {
            return set.clone();
        }
        let set = Rc::new(self.grammar.analysis().first(rule));
        self.first_sets.insert(key, set.clone());
        set
    }

    fn can_start(&self, first: &TerminalSet, pos: u32) -> bool {
        let Some(tok) = self.token(pos) else {
            return false;
        };
        if tok.kind == SyntaxKind::ERROR {
            return false;
        }
        first.iter().any(|terminal| match terminal {
            Terminal::Literal(text) => tok.text == *text,
            Terminal::Kind(kind) => tok.kind == *kind,
        })
    }

    /// Position after the token or balanced group at `pos`.
    fn skip_one(&self, pos: u32, sync: Sync) -> u32 {
        let Some(first) = self.token(pos) else {
            return pos;
        };
        let Some(closer) = opener_closer(first.kind) else {
            return pos + 1;
        };
        let mut open = vec![closer];
        let mut at = pos + 1;
        while let Some(tok) = self.token(at) {
            if self.at_hard_stop(at, sync) {
                return at;
            }
            if let Some(nested) = opener_closer(tok.kind) {
                open.push(nested);
            } else if open.last() == Some(&tok.kind) {
                open.pop();
                if open.is_empty() {
                    return at + 1;
                }
            }
            at += 1;
        }
        at
    }

    /// Skip from `stuck` to where `element` can start again, or to the sync
    /// token. `None` when nothing can be skipped.
    pub(super) fn skip(&mut self, element: &Rule, stuck: u32, sync: Sync, owner: &str) -> Option<Skip> {
        if self.at_sync(stuck, sync) || self.at_hard_stop(stuck, sync) {
            return None;
        }
        let first = self.first_set(element);
        let mut end = self.skip_one(stuck, sync);
        while !self.at_sync(end, sync) && !self.at_hard_stop(end, sync) && !self.can_start(&first, end) {
            end = self.skip_one(end, sync);
        }

        let mut expected: Vec<SmolStr> = first.iter().map(|t| SmolStr::new(t.to_string())).collect();
        if let Sync::Token(text) = sync {
            expected.push(SmolStr::new(format!("'{text}'")));
        }
        if expected.len() > MAX_EXPECTED {
            expected.clear();
        }
        tracing::trace!("`{}` resumes at token {} after skipping from {}", owner, end, stuck);
        Some(Skip {
            start: stuck,
            end,
            expected: expected.into(),
        })
    }
}
