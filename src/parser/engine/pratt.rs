//! Precedence climbing over the flattened alternatives of an operator head.
//!
//! A head such as `_expression` is never run as a plain choice: its
//! left-recursive alternatives would loop. Prefix alternatives are parsed
//! first, then suffix alternatives are applied to every interpretation
//! reached so far until nothing new appears.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use super::candidate::{concat, insert_ranked, outranks};
use super::{tail_floor, AltTag, Candidate, Ctx, Engine, Ends, Frag, Sync, ATOM};
use crate::grammar::analysis::{Operator, Wrapper};
use crate::grammar::{Assoc, ConflictRegistry, EffectiveGrammar, RuleId};

/// Interpretations keyed by end position and the precedence they expose
type Table = BTreeMap<(u32, i32), Candidate>;

impl<'g> Engine<'g, '_> {
    pub(super) fn pratt(&mut self, head: RuleId, pos: u32, ctx: Ctx) -> Ends {
        let grammar = self.grammar;
        let owner = grammar.rule(head).name;
        let Some(table) = grammar.operators(head) else {
            return Ends::new();
        };
        let registry = grammar.conflicts();
        let mut best = Table::new();

        for op in &table.prefix {
            // prefix alternatives are always admissible; their own precedence
            // only limits what their trailing operand may contain
            let inner = Ctx {
                floor: op.prec.map_or(i32::MIN, |(value, assoc)| tail_floor(value, assoc)),
                sync: Sync::None,
            };
            for (end, found) in self.eval(&op.body, pos, inner, operand_owner(grammar, op, owner)) {
                let prec = match op.prec {
                    _ if !op.right_open => ATOM,
                    Some((value, _)) => value,
                    None => found.prec,
                };
                let candidate = Candidate {
                    cost: found.cost,
                    dyn_prec: found.dyn_prec + op.dyn_prec,
                    prec,
                    tree: wrap(grammar, op, found.tree),
                    tag: tag(op),
                };
                keep(&mut best, registry, owner, (end, prec), candidate);
            }
        }

        let mut pending: BTreeSet<(u32, i32)> = best.keys().copied().collect();
        while let Some(key) = pending.pop_first() {
            let Some(lhs) = best.get(&key).cloned() else {
                continue;
            };
            let (end, _) = key;
            for op in &table.suffix {
                let (value, assoc) = op.prec.unwrap_or((0, Assoc::None));
                if value < ctx.floor {
                    continue;
                }
                let admitted = match assoc {
                    Assoc::Right => lhs.prec > value,
                    Assoc::Left | Assoc::None => lhs.prec >= value,
                };
                if !admitted {
                    continue;
                }
                let inner = Ctx {
                    floor: tail_floor(value, assoc),
                    sync: Sync::None,
                };
                for (tail_end, tail) in self.eval(&op.body, end, inner, operand_owner(grammar, op, owner)) {
                    if tail_end == end {
                        continue;
                    }
                    let left = match op.left_field {
                        Some(name) => Rc::new(Frag::Field(name, lhs.tree.clone())),
                        None => lhs.tree.clone(),
                    };
                    let prec = if op.right_open { value } else { ATOM };
                    let candidate = Candidate {
                        cost: lhs.cost + tail.cost,
                        dyn_prec: lhs.dyn_prec + tail.dyn_prec + op.dyn_prec,
                        prec,
                        tree: wrap(grammar, op, concat(&left, &tail.tree)),
                        tag: tag(op),
                    };
                    if keep(&mut best, registry, owner, (tail_end, prec), candidate) {
                        pending.insert((tail_end, prec));
                    }
                }
            }
        }

        let mut out = Ends::new();
        for ((end, _), candidate) in best {
            insert_ranked(&mut out, registry, owner, end, candidate);
        }
        out
    }
}

fn keep(
    best: &mut Table,
    registry: &ConflictRegistry,
    owner: &str,
    key: (u32, i32),
    candidate: Candidate,
) -> bool {
    match best.get(&key) {
        Some(existing) if !outranks(registry, owner, existing, &candidate) => false,
        _ => {
            best.insert(key, candidate);
            true
        }
    }
}

fn tag(op: &Operator) -> AltTag {
    AltTag {
        order: op.order,
        head: op.head,
        from_extension: op.from_extension,
    }
}

/// Name recovery and ties inside the operator body are reported against:
/// the innermost named rule the alternative belongs to.
fn operand_owner(grammar: &EffectiveGrammar, op: &Operator, head: &'static str) -> &'static str {
    op.wrappers
        .iter()
        .rev()
        .find_map(|wrapper| match wrapper {
            Wrapper::Node(id) => Some(grammar.rule(*id).name),
            Wrapper::Field(_) => None,
        })
        .unwrap_or(head)
}

fn wrap(grammar: &EffectiveGrammar, op: &Operator, mut tree: Rc<Frag>) -> Rc<Frag> {
    for wrapper in op.wrappers.iter().rev() {
        tree = match wrapper {
            Wrapper::Node(id) => match grammar.rule(*id).kind {
                Some(kind) => Rc::new(Frag::Node(kind, tree)),
                None => tree,
            },
            Wrapper::Field(name) => Rc::new(Frag::Field(*name, tree)),
        };
    }
    tree
}
