//! Merging a base grammar with an extension into an [`EffectiveGrammar`].
//!
//! Resolution runs once, before any parsing. It never stops at the first
//! problem: every defect in the base, the extension and the conflict list is
//! collected and returned together.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};

use super::analysis::{self, Analysis};
use super::conflicts::{ConflictRegistry, Resolution};
use super::effective::{EffectiveGrammar, Origin, RuleDef, RuleId};
use super::error::{GrammarError, GrammarErrors};
use super::extension::{GrammarExtension, Override};
use super::rule::Rule;
use super::table::Grammar;
use crate::parser::SyntaxKind;

/// Resolve `base` on its own, with no extension applied.
pub fn resolve_base(base: &Grammar) -> Result<EffectiveGrammar, GrammarErrors> {
    resolve(base, &GrammarExtension::new(base.name()))
}

/// Apply `extension` to `base` and validate the result.
///
/// Extended rules keep the base body as one of their top-level
/// alternatives; defined rules either are new or replace a declared
/// extension point. Everything else the extension touches is an error.
pub fn resolve(base: &Grammar, extension: &GrammarExtension) -> Result<EffectiveGrammar, GrammarErrors> {
    let mut errors: Vec<GrammarError> = base
        .duplicates()
        .iter()
        .map(|rule| GrammarError::DuplicateRule { rule: *rule })
        .collect();

    let mut table: IndexMap<&'static str, (Rule, Origin)> = base
        .rules()
        .map(|(name, body)| (name, (body.clone(), Origin::Base)))
        .collect();

    let mut touched = FxHashSet::default();
    for (name, change) in extension.overrides() {
        let name = *name;
        if !touched.insert(name) {
            errors.push(GrammarError::DuplicateRule { rule: name });
            continue;
        }
        match change {
            Override::Extend(build) => {
                let Some(original) = base.get(name).filter(|_| base.is_extension_point(name)) else {
                    errors.push(GrammarError::UnknownExtensionPoint { rule: name });
                    continue;
                };
                let body = build(original.clone());
                let kept = match &body {
                    Rule::Choice(alts) => alts.iter().position(|alt| alt == original),
                    _ => None,
                };
                match kept {
                    Some(index) => {
                        tracing::debug!("{}: extending `{}`", extension.name(), name);
                        table.insert(name, (body, Origin::Extended { original: index }));
                    }
                    None => errors.push(GrammarError::OriginalDropped { rule: name }),
                }
            }
            Override::Define(body) if base.contains(name) => {
                if base.is_extension_point(name) {
                    tracing::warn!(
                        "{}: replacing extension point `{}` instead of extending it",
                        extension.name(),
                        name
                    );
                    table.insert(name, (body.clone(), Origin::Replaced));
                } else {
                    errors.push(GrammarError::RedefinedRule { rule: name });
                }
            }
            Override::Define(body) => {
                table.insert(name, (body.clone(), Origin::Added));
            }
        }
    }

    if !table.contains_key(base.start()) {
        errors.push(GrammarError::UndefinedStartRule { rule: base.start() });
    }

    for (name, (body, _)) in &table {
        let mut missing = IndexSet::new();
        body.for_each_symbol(&mut |referenced| {
            if !table.contains_key(referenced) {
                missing.insert(referenced);
            }
        });
        errors.extend(missing.into_iter().map(|referenced| GrammarError::UndefinedRule {
            rule: *name,
            referenced,
        }));
    }

    for (entry_index, entry) in extension.conflicts().iter().enumerate() {
        if entry.rules().is_empty() {
            errors.push(GrammarError::EmptyConflict { entry: entry_index });
        }
        let preferred = match entry.resolution() {
            Resolution::Prefer(rule) => Some(rule),
            _ => None,
        };
        let mut reported = FxHashSet::default();
        for rule in entry.rules().iter().copied().chain(preferred) {
            if !table.contains_key(rule) && reported.insert(rule) {
                errors.push(GrammarError::ConflictUndefinedRule {
                    entry: entry_index,
                    rule,
                });
            }
        }
    }

    let mut kinds = FxHashMap::default();
    for name in table.keys().copied().filter(|name| !name.starts_with('_')) {
        match SyntaxKind::from_rule_name(name) {
            Some(kind) => {
                kinds.insert(name, kind);
            }
            None => errors.push(GrammarError::MissingSyntaxKind { rule: name }),
        }
    }

    if !errors.is_empty() {
        return Err(GrammarErrors(errors));
    }

    let ids: FxHashMap<&'static str, RuleId> = table
        .keys()
        .enumerate()
        .map(|(i, name)| (*name, RuleId(i as u32)))
        .collect();
    let leaves = leaf_rules(&table);
    let rules: Vec<RuleDef> = table
        .into_iter()
        .map(|(name, (body, origin))| RuleDef {
            name,
            body,
            origin,
            kind: kinds.get(name).copied(),
            leaf: leaves.contains(name),
        })
        .collect();

    let analysis = Analysis::compute(&rules, &ids);
    let operators = analysis::operator_tables(&analysis, &rules).map_err(GrammarErrors)?;
    let conflicts = ConflictRegistry::new(extension.conflicts().to_vec());
    let ambiguities = analysis::check_ambiguities(&analysis, &rules, &conflicts);
    if !ambiguities.is_empty() {
        return Err(GrammarErrors(ambiguities));
    }

    let contextual_keywords: IndexSet<&'static str> = analysis.contextual_keywords().into_iter().collect();
    let start = ids[base.start()];
    tracing::debug!(
        "resolved grammar `{}`: {} rules, {} operator heads, {} conflict entries, contextual keywords {:?}",
        extension.name(),
        rules.len(),
        operators.len(),
        conflicts.entries().len(),
        contextual_keywords
    );

    Ok(EffectiveGrammar {
        name: extension.name().to_string(),
        start,
        rules,
        ids,
        conflicts,
        analysis,
        operators,
        contextual_keywords,
    })
}

/// Visible rules whose body is a terminal, a choice of terminals, or a
/// reference to another leaf rule. Such rules become a single token of
/// their own kind.
fn leaf_rules(table: &IndexMap<&'static str, (Rule, Origin)>) -> FxHashSet<&'static str> {
    fn is_leaf(
        table: &IndexMap<&'static str, (Rule, Origin)>,
        name: &'static str,
        visiting: &mut Vec<&'static str>,
    ) -> bool {
        if name.starts_with('_') || visiting.contains(&name) {
            return false;
        }
        let Some((body, _)) = table.get(name) else {
            return false;
        };
        visiting.push(name);
        let leaf = match body {
            Rule::Token(_) | Rule::Pattern(_) => true,
            Rule::Choice(alts) => alts.iter().all(Rule::is_terminal),
            Rule::Symbol(inner) => is_leaf(table, inner, visiting),
            _ => false,
        };
        visiting.pop();
        leaf
    }

    let mut visiting = Vec::new();
    table
        .keys()
        .copied()
        .filter(|name| is_leaf(table, name, &mut visiting))
        .collect()
}
