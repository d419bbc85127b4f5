//! Interpretations of a token span, and how two of them are ranked.

use std::collections::BTreeMap;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::grammar::{ConflictRegistry, TieSide, Winner};
use crate::parser::SyntaxKind;
use crate::parser::errors::ParseContext;

/// Precedence of an interpretation that cannot be split by an operator
pub(crate) const ATOM: i32 = i32::MAX;

/// Shape of a matched span, before it is turned into a green tree.
///
/// Positions are indices into the significant-token stream.
#[derive(Debug)]
pub(crate) enum Frag {
    Empty,
    Token(u32),
    /// A token re-kinded by a leaf rule
    Leaf(SyntaxKind, u32),
    Node(SyntaxKind, Rc<Frag>),
    Concat(Rc<Frag>, Rc<Frag>),
    Field(&'static str, Rc<Frag>),
    /// Tokens `start..end` thrown away by recovery
    Skipped {
        start: u32,
        end: u32,
        context: ParseContext,
        expected: Rc<[SmolStr]>,
    },
    /// A closing token that was never found
    Missing {
        token: &'static str,
        opener: u32,
        context: ParseContext,
    },
}

impl Frag {
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Frag::Empty)
    }

    fn take_children(&mut self, out: &mut Vec<Rc<Frag>>) {
        match self {
            Frag::Node(_, child) | Frag::Field(_, child) => out.push(std::mem::replace(child, empty())),
            Frag::Concat(left, right) => {
                out.push(std::mem::replace(left, empty()));
                out.push(std::mem::replace(right, empty()));
            }
            _ => {}
        }
    }
}

// Sequences of a few thousand items build Concat chains that deep; the
// default recursive drop would overflow the stack.
impl Drop for Frag {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(child) = stack.pop() {
            if let Ok(mut frag) = Rc::try_unwrap(child) {
                frag.take_children(&mut stack);
            }
        }
    }
}

thread_local! {
    static EMPTY: Rc<Frag> = Rc::new(Frag::Empty);
}

pub(crate) fn empty() -> Rc<Frag> {
    EMPTY.with(Rc::clone)
}

pub(crate) fn concat(left: &Rc<Frag>, right: &Rc<Frag>) -> Rc<Frag> {
    if left.is_empty() {
        right.clone()
    } else if right.is_empty() {
        left.clone()
    } else {
        Rc::new(Frag::Concat(left.clone(), right.clone()))
    }
}

/// Which alternative of a choice produced a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AltTag {
    pub order: u32,
    pub head: Option<&'static str>,
    pub from_extension: bool,
}

impl AltTag {
    fn side(self) -> TieSide {
        TieSide {
            head: self.head,
            from_extension: self.from_extension,
        }
    }
}

/// One interpretation of the span `start..end`
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// Tokens skipped or inserted by recovery
    pub cost: u32,
    pub dyn_prec: i32,
    pub prec: i32,
    pub tree: Rc<Frag>,
    pub tag: AltTag,
}

impl Candidate {
    pub(crate) fn empty() -> Self {
        Self {
            cost: 0,
            dyn_prec: 0,
            prec: ATOM,
            tree: empty(),
            tag: AltTag::default(),
        }
    }

    pub(crate) fn with_tree(tree: Rc<Frag>) -> Self {
        Self {
            tree,
            ..Self::empty()
        }
    }

    /// `self` followed by `next`; the tag of `self` is kept.
    pub(crate) fn then(&self, next: &Candidate) -> Self {
        Self {
            cost: self.cost + next.cost,
            dyn_prec: self.dyn_prec + next.dyn_prec,
            prec: ATOM,
            tree: concat(&self.tree, &next.tree),
            tag: self.tag,
        }
    }

    /// Strictly better on recovery cost or dynamic precedence alone.
    pub(crate) fn beats_on_weight(&self, other: &Candidate) -> bool {
        (self.cost, -self.dyn_prec) < (other.cost, -other.dyn_prec)
    }
}

/// Best candidate per end position
pub(crate) type Ends = BTreeMap<u32, Candidate>;

/// Whether `challenger` replaces `incumbent` for the same span of a choice
/// owned by `owner`.
pub(crate) fn outranks(
    registry: &ConflictRegistry,
    owner: &str,
    incumbent: &Candidate,
    challenger: &Candidate,
) -> bool {
    if challenger.cost != incumbent.cost {
        return challenger.cost < incumbent.cost;
    }
    if challenger.dyn_prec != incumbent.dyn_prec {
        return challenger.dyn_prec > incumbent.dyn_prec;
    }
    if incumbent.tag != challenger.tag {
        match registry.resolve(owner, incumbent.tag.side(), challenger.tag.side()) {
            Some(Winner::First) => return false,
            Some(Winner::Second) => return true,
            None => {}
        }
    }
    challenger.tag.order < incumbent.tag.order
}

/// Keep `candidate` at `end` if it is strictly better on weight.
pub(crate) fn insert_weighted(ends: &mut Ends, end: u32, candidate: Candidate) -> bool {
    match ends.get(&end) {
        Some(existing) if !candidate.beats_on_weight(existing) => false,
        _ => {
            ends.insert(end, candidate);
            true
        }
    }
}

/// Keep `candidate` at `end` if it outranks the incumbent.
pub(crate) fn insert_ranked(
    ends: &mut Ends,
    registry: &ConflictRegistry,
    owner: &str,
    end: u32,
    candidate: Candidate,
) {
    match ends.get(&end) {
        Some(existing) if !outranks(registry, owner, existing, &candidate) => {}
        _ => {
            ends.insert(end, candidate);
        }
    }
}
