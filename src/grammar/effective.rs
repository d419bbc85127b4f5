//! The merged, immutable grammar the parser executes.

use std::fmt;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use super::analysis::{Analysis, OperatorTable};
use super::conflicts::ConflictRegistry;
use super::rule::Rule;
use crate::parser::SyntaxKind;

/// Index of a rule in an [`EffectiveGrammar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where an effective rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Taken unchanged from the base grammar
    Base,
    /// New rule introduced by the extension
    Added,
    /// Base rule whose top-level choice now offers extra alternatives;
    /// `original` is the index of the base body among them
    Extended { original: usize },
    /// Base extension point replaced outright
    Replaced,
}

/// One rule of the effective grammar
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub name: &'static str,
    pub body: Rule,
    pub origin: Origin,
    /// `None` for hidden rules
    pub kind: Option<SyntaxKind>,
    /// Visible rule that produces a single re-kinded token
    pub leaf: bool,
}

impl RuleDef {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Rule table + override output + conflict registry, with the analysis the
/// engine needs precomputed. Built once, shared read-only.
pub struct EffectiveGrammar {
    pub(crate) name: String,
    pub(crate) start: RuleId,
    pub(crate) rules: Vec<RuleDef>,
    pub(crate) ids: FxHashMap<&'static str, RuleId>,
    pub(crate) conflicts: ConflictRegistry,
    pub(crate) analysis: Analysis,
    pub(crate) operators: FxHashMap<RuleId, OperatorTable>,
    pub(crate) contextual_keywords: IndexSet<&'static str>,
}

impl EffectiveGrammar {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> RuleId {
        self.start
    }

    pub fn id(&self, name: &str) -> Option<RuleId> {
        self.ids.get(name).copied()
    }

    pub fn rule(&self, id: RuleId) -> &RuleDef {
        &self.rules[id.index()]
    }

    pub fn get(&self, name: &str) -> Option<&RuleDef> {
        self.id(name).map(|id| self.rule(id))
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleDef> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn conflicts(&self) -> &ConflictRegistry {
        &self.conflicts
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Precedence-climbing table of a left-recursive operator rule.
    pub fn operators(&self, id: RuleId) -> Option<&OperatorTable> {
        self.operators.get(&id)
    }

    /// Literals the grammar matches that the lexer hands out as identifiers.
    pub fn contextual_keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.contextual_keywords.iter().copied()
    }

    pub fn is_contextual_keyword(&self, text: &str) -> bool {
        self.contextual_keywords.contains(text)
    }
}

impl fmt::Debug for EffectiveGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveGrammar")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .field("conflicts", &self.conflicts.entries().len())
            .field("operator_heads", &self.operators.len())
            .finish()
    }
}
