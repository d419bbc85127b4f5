//! Executes an [`EffectiveGrammar`] over a token stream.
//!
//! The engine is a memoised interpreter that computes, for a rule at a
//! position, the best interpretation for every reachable end position.
//! Keeping all ends lets a sequence try every split of its input without
//! backtracking, and lets ties between alternatives be settled by the
//! conflict registry instead of by which one happened to be tried first.
//!
//! - [`pratt`]: left-recursive operator heads as precedence climbing
//! - [`recovery`]: skipping input inside delimited scopes

mod candidate;
mod pratt;
mod recovery;

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::grammar::analysis::left_head;
use crate::grammar::{Assoc, EffectiveGrammar, Origin, Rule, RuleId, TerminalSet};
use crate::parser::SyntaxKind;
use crate::parser::errors::ParseContext;

pub(crate) use candidate::{ATOM, AltTag, Candidate, Ends, Frag};
use candidate::{insert_ranked, insert_weighted};

/// Delimited scopes and operator heads nested deeper than this fail
/// instead of recursing further
const MAX_DEPTH: u32 = 256;

/// Stack left before the interpreter switches to a fresh segment
const RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

/// A significant token: everything but trivia
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lexeme<'t> {
    pub kind: SyntaxKind,
    pub text: &'t str,
    /// Index in the full token list, trivia included
    pub raw: usize,
}

/// Token a repetition recovers up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Sync {
    None,
    Token(&'static str),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Ctx {
    /// Lowest operator precedence admitted at the right edge
    pub floor: i32,
    pub sync: Sync,
}

impl Ctx {
    pub(crate) const FREE: Ctx = Ctx {
        floor: i32::MIN,
        sync: Sync::None,
    };
}

type MemoKey = (RuleId, u32, i32, Sync);

pub(crate) struct Engine<'g, 't> {
    grammar: &'g EffectiveGrammar,
    tokens: &'t [Lexeme<'t>],
    memo: FxHashMap<MemoKey, Rc<Ends>>,
    first_sets: FxHashMap<*const Rule, Rc<TerminalSet>>,
    depth: u32,
    /// First position where nesting hit the limit
    pub(crate) too_deep: Option<u32>,
}

impl<'g, 't> Engine<'g, 't> {
    pub(crate) fn new(grammar: &'g EffectiveGrammar, tokens: &'t [Lexeme<'t>]) -> Self {
        Self {
            grammar,
            tokens,
            memo: FxHashMap::default(),
            first_sets: FxHashMap::default(),
            depth: 0,
            too_deep: None,
        }
    }

    fn token(&self, pos: u32) -> Option<&Lexeme<'t>> {
        self.tokens.get(pos as usize)
    }

    /// Run rule `id` from `pos`.
    pub(crate) fn rule(&mut self, id: RuleId, pos: u32, ctx: Ctx) -> Rc<Ends> {
        let name = self.grammar.rule(id).name;
        self.symbol(name, pos, ctx)
    }

    pub(crate) fn eval(&mut self, rule: &'g Rule, pos: u32, ctx: Ctx, owner: &'static str) -> Ends {
        match rule {
            Rule::Blank => Ends::from([(pos, Candidate::empty())]),
            Rule::Token(text) => match self.token(pos) {
                Some(tok) if tok.kind != SyntaxKind::ERROR && tok.text == *text => {
                    Ends::from([(pos + 1, Candidate::with_tree(Rc::new(Frag::Token(pos))))])
                }
                _ => Ends::new(),
            },
            Rule::Pattern(kind) => match self.token(pos) {
                Some(tok) if tok.kind == *kind => {
                    Ends::from([(pos + 1, Candidate::with_tree(Rc::new(Frag::Token(pos))))])
                }
                _ => Ends::new(),
            },
            Rule::Symbol(name) => (*self.symbol(*name, pos, ctx)).clone(),
            Rule::Seq(items) => self.seq(items, pos, ctx, owner),
            Rule::Choice(alts) => self.choice(alts, None, pos, ctx, owner),
            Rule::Repeat { rule, min } => self.repeat(rule, *min, pos, ctx, owner),
            Rule::Optional(inner) => {
                let mut ends = self.eval(inner, pos, ctx, owner);
                ends.entry(pos).or_insert_with(Candidate::empty);
                ends
            }
            Rule::Field { name, rule } => {
                let mut ends = self.eval(rule, pos, ctx, owner);
                for candidate in ends.values_mut() {
                    if !candidate.tree.is_empty() {
                        candidate.tree = Rc::new(Frag::Field(*name, candidate.tree.clone()));
                    }
                }
                ends
            }
            Rule::Prec { value, assoc, rule } => {
                if *value < ctx.floor {
                    return Ends::new();
                }
                let inner = Ctx {
                    floor: tail_floor(*value, *assoc),
                    sync: ctx.sync,
                };
                let mut ends = self.eval(rule, pos, inner, owner);
                for candidate in ends.values_mut() {
                    candidate.prec = *value;
                }
                ends
            }
            Rule::DynPrec { value, rule } => {
                let mut ends = self.eval(rule, pos, ctx, owner);
                for candidate in ends.values_mut() {
                    candidate.dyn_prec += value;
                }
                ends
            }
        }
    }

    fn symbol(&mut self, name: &'static str, pos: u32, ctx: Ctx) -> Rc<Ends> {
        let Some(id) = self.grammar.id(name) else {
            return Rc::new(Ends::new());
        };
        let grammar = self.grammar;
        let def = grammar.rule(id);
        let is_head = grammar.operators(id).is_some();
        let ctx = if def.leaf {
            Ctx::FREE
        } else if is_head {
            Ctx {
                floor: ctx.floor,
                sync: Sync::None,
            }
        } else {
            ctx
        };

        let key = (id, pos, ctx.floor, ctx.sync);
        if let Some(ends) = self.memo.get(&key) {
            return ends.clone();
        }
        // only source-level nesting counts towards the limit
        let nests = is_head
            || matches!(&def.body, Rule::Seq(items) if recovery::scope_closer(items).is_some());
        if nests && self.depth >= MAX_DEPTH {
            self.too_deep = Some(self.too_deep.map_or(pos, |p| p.min(pos)));
            return Rc::new(Ends::new());
        }
        // guards against re-entering the same rule at the same position
        self.memo.insert(key, Rc::new(Ends::new()));
        if nests {
            self.depth += 1;
        }

        let mut ends = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
            if is_head {
                self.pratt(id, pos, ctx)
            } else {
                match (&def.body, def.origin) {
                    (Rule::Choice(alts), Origin::Extended { original }) => {
                        self.choice(alts, Some(original), pos, ctx, def.name)
                    }
                    (body, _) => self.eval(body, pos, ctx, def.name),
                }
            }
        });
        if nests {
            self.depth -= 1;
        }

        if let Some(kind) = def.kind {
            for candidate in ends.values_mut() {
                candidate.tree = if def.leaf {
                    Rc::new(Frag::Leaf(kind, pos))
                } else {
                    Rc::new(Frag::Node(kind, candidate.tree.clone()))
                };
            }
        }

        let ends = Rc::new(ends);
        self.memo.insert(key, ends.clone());
        ends
    }

    /// `original` is the index of the base body when the choice is the top
    /// level of an extended rule.
    fn choice(
        &mut self,
        alts: &'g [Rule],
        original: Option<usize>,
        pos: u32,
        ctx: Ctx,
        owner: &'static str,
    ) -> Ends {
        let registry = self.grammar.conflicts();
        let mut out = Ends::new();
        for (i, alt) in alts.iter().enumerate() {
            let tag = AltTag {
                order: i as u32,
                head: left_head(alt),
                from_extension: original.is_some_and(|o| o != i),
            };
            for (end, mut candidate) in self.eval(alt, pos, ctx, owner) {
                candidate.tag = tag;
                insert_ranked(&mut out, registry, owner, end, candidate);
            }
        }
        out
    }

    fn seq(&mut self, items: &'g [Rule], pos: u32, ctx: Ctx, owner: &'static str) -> Ends {
        let n = items.len();
        if n == 0 {
            return Ends::from([(pos, Candidate::empty())]);
        }
        let closer = recovery::scope_closer(items);

        let mut frontier = Ends::from([(pos, Candidate::empty())]);
        for (i, item) in items.iter().enumerate() {
            let item_ctx = if i == n - 1 {
                ctx
            } else if let (Some(closer), true) = (closer, i == n - 2) {
                Ctx {
                    floor: i32::MIN,
                    sync: Sync::Token(closer),
                }
            } else {
                Ctx::FREE
            };

            let mut next = Ends::new();
            // longest first: on equal weight the earlier element keeps more input
            for (&end, prefix) in frontier.iter().rev() {
                let results = self.eval(item, end, item_ctx, owner);
                if results.is_empty() {
                    if let (Some(token), true) = (closer, i == n - 1) {
                        if self.at_hard_stop(end, Sync::Token(token)) {
                            let missing = Candidate {
                                cost: 1,
                                ..Candidate::with_tree(Rc::new(Frag::Missing {
                                    token,
                                    opener: pos,
                                    context: ParseContext::for_rule(owner),
                                }))
                            };
                            insert_weighted(&mut next, end, prefix.then(&missing));
                        }
                    }
                    continue;
                }
                for (e2, result) in results {
                    let mut joined = prefix.then(&result);
                    if n == 1 {
                        joined.prec = result.prec;
                    }
                    insert_weighted(&mut next, e2, joined);
                }
            }
            if next.is_empty() {
                return next;
            }
            frontier = next;
        }
        frontier
    }

    fn repeat(&mut self, rule: &'g Rule, min: u8, pos: u32, ctx: Ctx, owner: &'static str) -> Ends {
        let mut all = Ends::from([(pos, Candidate::empty())]);
        let mut frontier: Vec<u32> = vec![pos];
        loop {
            while !frontier.is_empty() {
                let mut reached = Vec::new();
                frontier.sort_unstable_by(|a, b| b.cmp(a));
                for end in frontier {
                    let Some(prefix) = all.get(&end).cloned() else {
                        continue;
                    };
                    for (e2, item) in self.eval(rule, end, Ctx::FREE, owner) {
                        if e2 <= end {
                            continue;
                        }
                        if insert_weighted(&mut all, e2, prefix.then(&item)) {
                            reached.push(e2);
                        }
                    }
                }
                reached.sort_unstable();
                reached.dedup();
                frontier = reached;
            }

            if ctx.sync == Sync::None {
                break;
            }
            let Some((&stuck, prefix)) = all.iter().next_back() else {
                break;
            };
            let Some(skip) = self.skip(rule, stuck, ctx.sync, owner) else {
                break;
            };
            let resumed = skip.end;
            let prefix = prefix.clone();
            tracing::debug!(
                "recovery in `{}`: skipped tokens {}..{}",
                owner,
                stuck,
                resumed
            );
            let skipped = Candidate {
                cost: resumed - stuck,
                ..Candidate::with_tree(Rc::new(skip.into_frag(ParseContext::for_rule(owner))))
            };
            if insert_weighted(&mut all, resumed, prefix.then(&skipped)) {
                frontier.push(resumed);
            } else {
                break;
            }
        }

        if min > 0 {
            all.remove(&pos);
        }
        all
    }
}

/// Floor passed to the right operand of a production with precedence `value`
pub(crate) fn tail_floor(value: i32, assoc: Assoc) -> i32 {
    match assoc {
        Assoc::Right => value,
        Assoc::Left | Assoc::None => value.saturating_add(1),
    }
}
