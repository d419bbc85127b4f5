//! Grammar extensions: new rules, overrides of base rules, declared conflicts.

use std::fmt;

use super::conflicts::ConflictEntry;
use super::rule::{Rule, choice};

/// Builds a new body from the original body of a base rule
pub type ExtendFn = Box<dyn Fn(Rule) -> Rule + Send + Sync>;

/// How an extension treats a rule name
pub enum Override {
    /// Receive the original body and return a body that keeps it as a
    /// top-level alternative.
    Extend(ExtendFn),
    /// A new rule, or a pure replacement of a base extension point.
    Define(Rule),
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::Extend(_) => f.write_str("Extend(..)"),
            Override::Define(rule) => f.debug_tuple("Define").field(rule).finish(),
        }
    }
}

/// A layer of rules on top of a base [`Grammar`](super::Grammar)
#[derive(Debug, Default)]
pub struct GrammarExtension {
    name: &'static str,
    overrides: Vec<(&'static str, Override)>,
    conflicts: Vec<ConflictEntry>,
}

impl GrammarExtension {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn define(&mut self, name: &'static str, body: Rule) -> &mut Self {
        self.overrides.push((name, Override::Define(body)));
        self
    }

    pub fn extend(
        &mut self,
        name: &'static str,
        f: impl Fn(Rule) -> Rule + Send + Sync + 'static,
    ) -> &mut Self {
        self.overrides.push((name, Override::Extend(Box::new(f))));
        self
    }

    /// Shorthand for the common extension `choice(original, ...alternatives)`.
    pub fn add_alternatives(&mut self, name: &'static str, alternatives: Vec<Rule>) -> &mut Self {
        self.extend(name, move |original| {
            choice(std::iter::once(original).chain(alternatives.iter().cloned()))
        })
    }

    pub fn conflict(&mut self, entry: ConflictEntry) -> &mut Self {
        self.conflicts.push(entry);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn overrides(&self) -> &[(&'static str, Override)] {
        &self.overrides
    }

    pub fn conflicts(&self) -> &[ConflictEntry] {
        &self.conflicts
    }
}
