//! The Objective-C layer over the base C grammar.
//!
//! New rules are added with `define`, base extension points are widened with
//! `add_alternatives`, and every overlap the layer introduces is declared in
//! the conflict list at the bottom of [`extension`].

mod declarations;
mod expressions;
mod methods;
mod types;

use super::conflicts::{ConflictEntry, Resolution};
use super::extension::GrammarExtension;
use super::rule::*;

/// `name: identifier`
pub(crate) fn name() -> Rule {
    field("name", sym("identifier"))
}

/// Build the Objective-C rule table, overrides and conflicts.
pub fn extension() -> GrammarExtension {
    let mut ext = GrammarExtension::new("objc");
    declarations::define(&mut ext);
    methods::define(&mut ext);
    types::define(&mut ext);
    expressions::define(&mut ext);

    ext.conflict(ConflictEntry::new(
        &["_expression", "protocol_type_specifier"],
        Resolution::PreferExtension,
    ))
    .conflict(ConflictEntry::new(
        &["_expression", "message_expression"],
        Resolution::Prefer("message_expression"),
    ))
    .conflict(ConflictEntry::new(
        &["keyword_selector"],
        Resolution::Prefer("keyword_selector"),
    ))
    .conflict(ConflictEntry::new(&["struct_specifier"], Resolution::Marker("@defs")))
    .conflict(ConflictEntry::new(&["union_specifier"], Resolution::Marker("@defs")))
    .conflict(ConflictEntry::new(&["enum_specifier"], Resolution::Marker("@defs")))
    .conflict(ConflictEntry::new(&["receiver", "super"], Resolution::Prefer("super")));
    ext
}
