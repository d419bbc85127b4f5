//! Build-time analysis of an effective grammar.
//!
//! - nullability and FIRST sets (fixpoint over the rule table)
//! - left-recursion detection, and flattening of operator heads such as
//!   `_expression` into prefix/suffix tables for precedence climbing
//! - the ambiguity check over extension-contributed choices
//!
//! Contextual keywords matter here: the literal `self` and the lexeme class
//! identifier are different terminals but overlap, since the lexer produces
//! `self` as an identifier.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use super::conflicts::ConflictRegistry;
use super::effective::{Origin, RuleDef, RuleId};
use super::error::GrammarError;
use super::rule::{Assoc, Rule};
use crate::parser::SyntaxKind;
use crate::parser::classify;

/// Symbols unfolded per side before an overlapping pair is declared ambiguous
const EXPANSION_DEPTH: u32 = 12;
/// Upper bound on expansions for a single pair of alternatives
const EXPANSION_STEPS: u32 = 4_000;

/// Something a token can be matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Literal(&'static str),
    Kind(SyntaxKind),
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Literal(text) => write!(f, "'{text}'"),
            Terminal::Kind(kind) => match kind.rule_name() {
                Some(name) => f.write_str(name),
                None => write!(f, "{kind:?}"),
            },
        }
    }
}

pub type TerminalSet = BTreeSet<Terminal>;

/// Nullability, FIRST sets and left-corner reachability per rule
#[derive(Debug, Clone)]
pub struct Analysis {
    ids: FxHashMap<&'static str, RuleId>,
    nullable: Vec<bool>,
    first: Vec<TerminalSet>,
    left_reach: Vec<FxHashSet<RuleId>>,
    literal_kinds: FxHashMap<&'static str, Option<SyntaxKind>>,
}

impl Analysis {
    pub(crate) fn compute(rules: &[RuleDef], ids: &FxHashMap<&'static str, RuleId>) -> Self {
        let mut literal_kinds = FxHashMap::default();
        for def in rules {
            def.body.for_each_literal(&mut |text| {
                literal_kinds
                    .entry(text)
                    .or_insert_with(|| classify(text));
            });
        }

        let mut analysis = Self {
            ids: ids.clone(),
            nullable: vec![false; rules.len()],
            first: vec![TerminalSet::new(); rules.len()],
            left_reach: vec![FxHashSet::default(); rules.len()],
            literal_kinds,
        };

        let mut changed = true;
        while changed {
            changed = false;
            for (i, def) in rules.iter().enumerate() {
                if !analysis.nullable[i] && analysis.nullable(&def.body) {
                    analysis.nullable[i] = true;
                    changed = true;
                }
                let first = analysis.first(&def.body);
                if !first.is_subset(&analysis.first[i]) {
                    analysis.first[i].extend(first);
                    changed = true;
                }
            }
        }

        let direct: Vec<Vec<RuleId>> = rules
            .iter()
            .map(|def| {
                let mut out = Vec::new();
                analysis.left_symbols(&def.body, &mut out);
                out
            })
            .collect();
        for (i, reach) in analysis.left_reach.iter_mut().enumerate() {
            let mut stack = direct[i].clone();
            while let Some(next) = stack.pop() {
                if reach.insert(next) {
                    stack.extend(direct[next.index()].iter().copied());
                }
            }
        }

        analysis
    }

    fn id(&self, name: &str) -> Option<RuleId> {
        self.ids.get(name).copied()
    }

    pub fn rule_nullable(&self, id: RuleId) -> bool {
        self.nullable[id.index()]
    }

    pub fn rule_first(&self, id: RuleId) -> &TerminalSet {
        &self.first[id.index()]
    }

    /// Whether `to` can appear at the left edge of `from` (transitively).
    pub fn reaches_left(&self, from: RuleId, to: RuleId) -> bool {
        self.left_reach[from.index()].contains(&to)
    }

    pub fn nullable(&self, rule: &Rule) -> bool {
        match rule {
            Rule::Blank => true,
            Rule::Token(_) | Rule::Pattern(_) => false,
            Rule::Symbol(name) => self.id(name).is_some_and(|id| self.nullable[id.index()]),
            Rule::Seq(items) => items.iter().all(|item| self.nullable(item)),
            Rule::Choice(alts) => alts.iter().any(|alt| self.nullable(alt)),
            Rule::Repeat { rule, min } => *min == 0 || self.nullable(rule),
            Rule::Optional(_) => true,
            Rule::Field { rule, .. } | Rule::Prec { rule, .. } | Rule::DynPrec { rule, .. } => {
                self.nullable(rule)
            }
        }
    }

    pub fn first(&self, rule: &Rule) -> TerminalSet {
        let mut out = TerminalSet::new();
        self.first_into(rule, &mut out);
        out
    }

    fn first_into(&self, rule: &Rule, out: &mut TerminalSet) {
        match rule {
            Rule::Blank => {}
            Rule::Token(text) => {
                out.insert(Terminal::Literal(text));
            }
            Rule::Pattern(kind) => {
                out.insert(Terminal::Kind(*kind));
            }
            Rule::Symbol(name) => {
                if let Some(id) = self.id(name) {
                    out.extend(self.first[id.index()].iter().copied());
                }
            }
            Rule::Seq(items) => {
                for item in items {
                    self.first_into(item, out);
                    if !self.nullable(item) {
                        break;
                    }
                }
            }
            Rule::Choice(alts) => alts.iter().for_each(|alt| self.first_into(alt, out)),
            Rule::Repeat { rule, .. }
            | Rule::Optional(rule)
            | Rule::Field { rule, .. }
            | Rule::Prec { rule, .. }
            | Rule::DynPrec { rule, .. } => self.first_into(rule, out),
        }
    }

    /// FIRST of a sequence of productions, and whether all of it can be empty.
    pub fn first_seq(&self, items: &[Rule]) -> (TerminalSet, bool) {
        let mut out = TerminalSet::new();
        for item in items {
            self.first_into(item, &mut out);
            if !self.nullable(item) {
                return (out, false);
            }
        }
        (out, true)
    }

    /// Rules at the left edge of `rule`; returns whether `rule` is nullable.
    fn left_symbols(&self, rule: &Rule, out: &mut Vec<RuleId>) -> bool {
        match rule {
            Rule::Blank => true,
            Rule::Token(_) | Rule::Pattern(_) => false,
            Rule::Symbol(name) => match self.id(name) {
                Some(id) => {
                    out.push(id);
                    self.nullable[id.index()]
                }
                None => false,
            },
            Rule::Seq(items) => items.iter().all(|item| self.left_symbols(item, out)),
            Rule::Choice(alts) => alts
                .iter()
                .fold(false, |nullable, alt| self.left_symbols(alt, out) | nullable),
            Rule::Repeat { rule, min } => self.left_symbols(rule, out) || *min == 0,
            Rule::Optional(rule) => {
                self.left_symbols(rule, out);
                true
            }
            Rule::Field { rule, .. } | Rule::Prec { rule, .. } | Rule::DynPrec { rule, .. } => {
                self.left_symbols(rule, out)
            }
        }
    }

    fn left_reaches(&self, rule: &Rule, target: RuleId) -> bool {
        let mut out = Vec::new();
        self.left_symbols(rule, &mut out);
        out.into_iter()
            .any(|id| id == target || self.reaches_left(id, target))
    }

    pub fn terminals_overlap(&self, a: Terminal, b: Terminal) -> bool {
        match (a, b) {
            (Terminal::Literal(x), Terminal::Literal(y)) => x == y,
            (Terminal::Kind(x), Terminal::Kind(y)) => x == y,
            (Terminal::Literal(text), Terminal::Kind(kind))
            | (Terminal::Kind(kind), Terminal::Literal(text)) => {
                self.literal_kinds.get(text).copied().flatten() == Some(kind)
            }
        }
    }

    pub fn sets_overlap(&self, a: &TerminalSet, b: &TerminalSet) -> bool {
        a.iter()
            .any(|x| b.iter().any(|y| self.terminals_overlap(*x, *y)))
    }

    /// Human-readable FIRST set of `rule`, for diagnostics.
    pub fn expected(&self, rule: &Rule) -> Vec<String> {
        self.first(rule).iter().map(Terminal::to_string).collect()
    }

    /// Literals the lexer turns into identifiers.
    pub(crate) fn contextual_keywords(&self) -> Vec<&'static str> {
        let mut words: Vec<_> = self
            .literal_kinds
            .iter()
            .filter(|(_, kind)| **kind == Some(SyntaxKind::IDENT))
            .map(|(text, _)| *text)
            .collect();
        words.sort_unstable();
        words
    }
}

// =============================================================================
// Left recursion
// =============================================================================

/// Where an operator alternative's result is wrapped, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    Node(RuleId),
    Field(&'static str),
}

/// One flattened alternative of a left-recursive head
#[derive(Debug, Clone)]
pub struct Operator {
    /// Position among all flattened alternatives, in declaration order
    pub order: u32,
    pub wrappers: Vec<Wrapper>,
    pub prec: Option<(i32, Assoc)>,
    pub dyn_prec: i32,
    /// Prefix: the whole alternative. Suffix: what follows the left operand.
    pub body: Rule,
    /// Field name the left operand is stored under (suffix only)
    pub left_field: Option<&'static str>,
    pub head: Option<&'static str>,
    pub from_extension: bool,
    /// The alternative ends in the head itself, so a following operator may
    /// bind tighter than this one
    pub right_open: bool,
}

/// Prefix and suffix alternatives of a left-recursive head
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    pub prefix: Vec<Operator>,
    pub suffix: Vec<Operator>,
}

#[derive(Debug, Clone, Default)]
struct FlatState {
    wrappers: Vec<Wrapper>,
    prec: Option<(i32, Assoc)>,
    dyn_prec: i32,
    head: Option<&'static str>,
    from_extension: bool,
}

struct Flattener<'a> {
    analysis: &'a Analysis,
    rules: &'a [RuleDef],
    head: RuleId,
    table: OperatorTable,
    stack: Vec<RuleId>,
    order: u32,
}

impl Flattener<'_> {
    fn rule_body(&mut self, id: RuleId, state: FlatState) -> Result<(), String> {
        let def = &self.rules[id.index()];
        match (&def.body, def.origin) {
            (Rule::Choice(alts), Origin::Extended { original }) => {
                for (i, alt) in alts.iter().enumerate() {
                    let mut state = state.clone();
                    state.from_extension |= i != original;
                    self.alternative(alt, state)?;
                }
                Ok(())
            }
            (body, _) => self.alternative(body, state),
        }
    }

    fn alternative(&mut self, rule: &Rule, mut state: FlatState) -> Result<(), String> {
        let head_name = self.rules[self.head.index()].name;
        match rule {
            Rule::Choice(alts) => {
                for alt in alts {
                    self.alternative(alt, state.clone())?;
                }
                Ok(())
            }
            Rule::Prec { value, assoc, rule } => {
                state.prec = Some((*value, *assoc));
                self.alternative(rule, state)
            }
            Rule::DynPrec { value, rule } => {
                state.dyn_prec += value;
                self.alternative(rule, state)
            }
            Rule::Field { name, rule } => {
                state.wrappers.push(Wrapper::Field(*name));
                self.alternative(rule, state)
            }
            Rule::Symbol(name) => {
                let Some(id) = self.analysis.id(name) else {
                    return Err(name.to_string());
                };
                if id == self.head || self.stack.contains(&id) {
                    return Err(name.to_string());
                }
                if !self.analysis.reaches_left(id, self.head) {
                    self.push_prefix(rule, state);
                    return Ok(());
                }
                state.head.get_or_insert(*name);
                if !self.rules[id.index()].is_hidden() {
                    state.wrappers.push(Wrapper::Node(id));
                }
                self.stack.push(id);
                let result = self.rule_body(id, state);
                self.stack.pop();
                result
            }
            Rule::Seq(items) if items.first().map(Rule::unwrapped) == Some(&Rule::Symbol(head_name)) => {
                let rest = &items[1..];
                if rest.is_empty() || rest.iter().all(|item| self.analysis.nullable(item)) {
                    return Err(rule.to_string());
                }
                let left_field = match &items[0] {
                    Rule::Field { name, .. } => Some(*name),
                    _ => None,
                };
                let order = self.next_order();
                let body = Rule::Seq(rest.to_vec());
                let right_open = self.ends_in_head(&body, &mut Vec::new());
                self.table.suffix.push(Operator {
                    order,
                    wrappers: state.wrappers,
                    prec: state.prec,
                    dyn_prec: state.dyn_prec,
                    body,
                    left_field,
                    head: state.head,
                    from_extension: state.from_extension,
                    right_open,
                });
                Ok(())
            }
            other => {
                if self.analysis.left_reaches(other, self.head) {
                    return Err(other.to_string());
                }
                self.push_prefix(other, state);
                Ok(())
            }
        }
    }

    fn push_prefix(&mut self, rule: &Rule, state: FlatState) {
        let order = self.next_order();
        let right_open = self.ends_in_head(rule, &mut Vec::new());
        self.table.prefix.push(Operator {
            order,
            wrappers: state.wrappers,
            prec: state.prec,
            dyn_prec: state.dyn_prec,
            body: rule.clone(),
            left_field: None,
            head: state.head.or_else(|| left_head(rule)),
            from_extension: state.from_extension,
            right_open,
        });
    }

    /// Whether `rule` can end with the head, through any rule it refers to.
    fn ends_in_head(&self, rule: &Rule, visiting: &mut Vec<RuleId>) -> bool {
        match rule.unwrapped() {
            Rule::Symbol(name) => {
                let Some(id) = self.analysis.id(name) else {
                    return false;
                };
                if id == self.head {
                    return true;
                }
                if visiting.contains(&id) {
                    return false;
                }
                visiting.push(id);
                let open = self.ends_in_head(&self.rules[id.index()].body, visiting);
                visiting.pop();
                open
            }
            Rule::Seq(items) => items.last().is_some_and(|last| self.ends_in_head(last, visiting)),
            Rule::Choice(alts) => alts.iter().any(|alt| self.ends_in_head(alt, visiting)),
            Rule::Optional(inner) => self.ends_in_head(inner, visiting),
            Rule::Repeat { rule, .. } => self.ends_in_head(rule, visiting),
            _ => false,
        }
    }

    fn next_order(&mut self) -> u32 {
        self.order += 1;
        self.order - 1
    }
}

/// Find the operator heads of the grammar and flatten them.
///
/// Every left-recursive cycle must pass through a head, i.e. a rule whose
/// alternatives (through choices and left-recursive symbols) are either free
/// of left recursion or of the form `seq(head, ...)`.
pub(crate) fn operator_tables(
    analysis: &Analysis,
    rules: &[RuleDef],
) -> Result<FxHashMap<RuleId, OperatorTable>, Vec<GrammarError>> {
    let mut heads = FxHashMap::default();
    let mut failures = FxHashMap::default();

    for (i, def) in rules.iter().enumerate() {
        let id = RuleId(i as u32);
        if !analysis.reaches_left(id, id) {
            continue;
        }
        let mut flattener = Flattener {
            analysis,
            rules,
            head: id,
            table: OperatorTable::default(),
            stack: Vec::new(),
            order: 0,
        };
        match flattener.rule_body(id, FlatState::default()) {
            Ok(()) if !flattener.table.suffix.is_empty() => {
                tracing::debug!(
                    "operator head `{}`: {} prefix, {} suffix alternatives",
                    def.name,
                    flattener.table.prefix.len(),
                    flattener.table.suffix.len()
                );
                heads.insert(id, flattener.table);
            }
            Ok(()) => {
                failures.insert(id, def.name.to_string());
            }
            Err(via) => {
                failures.insert(id, via);
            }
        }
    }

    let mut errors = Vec::new();
    for (i, def) in rules.iter().enumerate() {
        let id = RuleId(i as u32);
        if heads.contains_key(&id) || !analysis.reaches_left(id, id) {
            continue;
        }
        if cycles_without_heads(analysis, rules, id, &heads) {
            errors.push(GrammarError::UnsupportedLeftRecursion {
                rule: def.name,
                via: failures.remove(&id).unwrap_or_default(),
            });
        }
    }

    if errors.is_empty() { Ok(heads) } else { Err(errors) }
}

fn cycles_without_heads(
    analysis: &Analysis,
    rules: &[RuleDef],
    start: RuleId,
    heads: &FxHashMap<RuleId, OperatorTable>,
) -> bool {
    let mut seen = FxHashSet::default();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let mut direct = Vec::new();
        analysis.left_symbols(&rules[id.index()].body, &mut direct);
        for next in direct {
            if next == start {
                return true;
            }
            if !heads.contains_key(&next) && seen.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}

/// The rule an alternative starts with, for conflict lookups.
pub fn left_head(rule: &Rule) -> Option<&'static str> {
    match rule.unwrapped() {
        Rule::Symbol(name) => Some(name),
        Rule::Seq(items) => items.first().and_then(left_head),
        _ => None,
    }
}

// =============================================================================
// Ambiguity check
// =============================================================================

/// Report every overlapping pair of extension-contributed alternatives that
/// no conflict entry covers.
pub(crate) fn check_ambiguities(
    analysis: &Analysis,
    rules: &[RuleDef],
    conflicts: &ConflictRegistry,
) -> Vec<GrammarError> {
    let checker = AmbiguityChecker { analysis, rules };
    let mut errors = Vec::new();
    for def in rules {
        match def.origin {
            Origin::Base => {}
            Origin::Added | Origin::Replaced => {
                def.body.for_each_choice(&mut |alts| {
                    checker.check_choice(def.name, alts, conflicts, &mut errors)
                });
            }
            Origin::Extended { original } => {
                let Rule::Choice(alts) = &def.body else {
                    continue;
                };
                checker.check_choice(def.name, alts, conflicts, &mut errors);
                for (k, alt) in alts.iter().enumerate() {
                    if k != original {
                        alt.for_each_choice(&mut |inner| {
                            checker.check_choice(def.name, inner, conflicts, &mut errors)
                        });
                    }
                }
            }
        }
    }
    errors
}

struct AmbiguityChecker<'a> {
    analysis: &'a Analysis,
    rules: &'a [RuleDef],
}

impl AmbiguityChecker<'_> {
    fn check_choice(
        &self,
        owner: &'static str,
        alts: &[Rule],
        conflicts: &ConflictRegistry,
        errors: &mut Vec<GrammarError>,
    ) {
        for i in 0..alts.len() {
            for j in i + 1..alts.len() {
                let heads: Vec<&str> = [left_head(&alts[i]), left_head(&alts[j])]
                    .into_iter()
                    .flatten()
                    .collect();
                if conflicts.covers(owner, &heads) || !self.ambiguous(&alts[i], &alts[j]) {
                    continue;
                }
                errors.push(GrammarError::AmbiguityWithoutPolicy {
                    rule: owner,
                    first: alts[i].to_string(),
                    second: alts[j].to_string(),
                });
            }
        }
    }

    /// Whether `a` and `b` can match exactly the same token span.
    fn ambiguous(&self, a: &Rule, b: &Rule) -> bool {
        let mut steps = 0;
        self.sequences(vec![a.clone()], vec![b.clone()], EXPANSION_DEPTH, &mut steps)
    }

    fn sequences(&self, mut a: Vec<Rule>, mut b: Vec<Rule>, depth: u32, steps: &mut u32) -> bool {
        let common = a
            .iter()
            .zip(&b)
            .take_while(|(x, y)| x.unwrapped() == y.unwrapped())
            .count();
        a.drain(..common);
        b.drain(..common);

        let (first_a, nullable_a) = self.analysis.first_seq(&a);
        let (first_b, nullable_b) = self.analysis.first_seq(&b);
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return true,
            (true, false) => return nullable_b,
            (false, true) => return nullable_a,
            (false, false) => {}
        }
        if nullable_a && nullable_b {
            return true;
        }
        if !self.analysis.sets_overlap(&first_a, &first_b) {
            return false;
        }
        if depth == 0 || *steps >= EXPANSION_STEPS {
            return true;
        }
        *steps += 1;

        let head_a = a[0].unwrapped();
        let head_b = b[0].unwrapped();
        let expand_a = match (head_a, head_b) {
            _ if is_structural(head_a) => Some(true),
            _ if is_structural(head_b) => Some(false),
            (Rule::Symbol(x), Rule::Symbol(y)) => {
                let (x, y) = (self.id(x), self.id(y));
                if self.analysis.reaches_left(x, y) {
                    Some(true)
                } else if self.analysis.reaches_left(y, x) {
                    Some(false)
                } else {
                    None
                }
            }
            (Rule::Symbol(_), _) => Some(true),
            (_, Rule::Symbol(_)) => Some(false),
            // two different terminals that overlap
            _ => return true,
        };

        match expand_a {
            Some(true) => self
                .expand(&a)
                .into_iter()
                .any(|a| self.sequences(a, b.clone(), depth - 1, steps)),
            Some(false) => self
                .expand(&b)
                .into_iter()
                .any(|b| self.sequences(a.clone(), b, depth - 1, steps)),
            None => {
                let expanded_b = self.expand(&b);
                self.expand(&a).into_iter().any(|a| {
                    expanded_b
                        .iter()
                        .any(|b| self.sequences(a.clone(), b.clone(), depth - 1, steps))
                })
            }
        }
    }

    fn id(&self, name: &str) -> RuleId {
        self.analysis
            .id(name)
            .unwrap_or(RuleId(u32::MAX))
    }

    /// Unfold the first element of a sequence one level.
    fn expand(&self, items: &[Rule]) -> Vec<Vec<Rule>> {
        let Some((head, rest)) = items.split_first() else {
            return Vec::new();
        };
        let with = |prefix: Vec<Rule>| -> Vec<Rule> { prefix.into_iter().chain(rest.iter().cloned()).collect() };
        match head.unwrapped() {
            Rule::Seq(inner) => vec![with(inner.clone())],
            Rule::Choice(alts) => alts.iter().map(|alt| with(vec![alt.clone()])).collect(),
            Rule::Optional(inner) => vec![with(vec![(**inner).clone()]), rest.to_vec()],
            Rule::Repeat { rule, min } => {
                let again = Rule::Repeat {
                    rule: rule.clone(),
                    min: 0,
                };
                let once = with(vec![(**rule).clone(), again]);
                if *min == 0 { vec![once, rest.to_vec()] } else { vec![once] }
            }
            Rule::Blank => vec![rest.to_vec()],
            Rule::Symbol(name) => match self.analysis.id(name) {
                Some(id) => vec![with(vec![self.rules[id.index()].body.clone()])],
                None => Vec::new(),
            },
            _ => vec![items.to_vec()],
        }
    }
}

fn is_structural(rule: &Rule) -> bool {
    matches!(
        rule,
        Rule::Seq(_) | Rule::Choice(_) | Rule::Optional(_) | Rule::Repeat { .. } | Rule::Blank
    )
}
