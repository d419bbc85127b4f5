//! Named rule tables.

use indexmap::{IndexMap, IndexSet};

use super::rule::Rule;

/// A complete grammar: an ordered rule table with a start rule and the
/// extension points it promises to keep stable.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: &'static str,
    start: &'static str,
    rules: IndexMap<&'static str, Rule>,
    extension_points: IndexSet<&'static str>,
    duplicates: Vec<&'static str>,
}

impl Grammar {
    pub fn new(name: &'static str, start: &'static str) -> Self {
        Self {
            name,
            start,
            rules: IndexMap::new(),
            extension_points: IndexSet::new(),
            duplicates: Vec::new(),
        }
    }

    /// Add a rule. A second definition of the same name is kept as a
    /// duplicate and reported when the grammar is resolved.
    pub fn define(&mut self, name: &'static str, body: Rule) -> &mut Self {
        if self.rules.insert(name, body).is_some() {
            self.duplicates.push(name);
        }
        self
    }

    /// Declare `name` as a rule extensions may add alternatives to.
    pub fn extension_point(&mut self, name: &'static str) -> &mut Self {
        self.extension_points.insert(name);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn start(&self) -> &'static str {
        self.start
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (*name, rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_extension_point(&self, name: &str) -> bool {
        self.extension_points.contains(name)
    }

    pub fn extension_points(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extension_points.iter().copied()
    }

    pub(crate) fn duplicates(&self) -> &[&'static str] {
        &self.duplicates
    }
}
