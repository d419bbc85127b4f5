//! The base C grammar.
//!
//! A C99 subset in the shape of tree-sitter-c: same rule names, same field
//! names, same precedences. Preprocessor lines are trivia and never reach
//! the grammar.
//!
//! Extension points: `_top_level_item`, `_type_identifier`, `type_qualifier`,
//! `_expression`, `struct_specifier`, `union_specifier`, `enum_specifier`.

mod declarations;
mod expressions;
mod statements;
mod types;

use super::table::Grammar;

/// Extension points layered grammars may add alternatives to
pub const EXTENSION_POINTS: &[&str] = &[
    "_top_level_item",
    "_type_identifier",
    "type_qualifier",
    "_expression",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
];

/// Build the base C rule table.
pub fn grammar() -> Grammar {
    let mut g = Grammar::new("c", "translation_unit");
    declarations::define(&mut g);
    types::define(&mut g);
    statements::define(&mut g);
    expressions::define(&mut g);
    for name in EXTENSION_POINTS {
        g.extension_point(name);
    }
    g
}
