//! Method declarations, definitions and selectors.

use super::name;
use crate::grammar::extension::GrammarExtension;
use crate::grammar::rule::*;

fn method_header(marker: &'static str) -> Vec<Rule> {
    vec![
        tok(marker),
        field("return_type", optional(sym("_method_type"))),
        field("selector", sym("_method_selector")),
    ]
}

fn method_declaration(marker: &'static str) -> Rule {
    seq(method_header(marker).into_iter().chain([tok(";")]))
}

/// The K&R declaration list and the stray `;` before the body are legacy
/// forms still found in older sources.
fn method_definition(marker: &'static str) -> Rule {
    seq(method_header(marker).into_iter().chain([
        optional(sym("declaration_list")),
        optional(tok(";")),
        field("body", sym("compound_statement")),
    ]))
}

pub(super) fn define(ext: &mut GrammarExtension) {
    ext.define(
        "_method_declaration",
        choice([
            sym("class_method_declaration"),
            sym("instance_method_declaration"),
        ]),
    )
    .define("class_method_declaration", method_declaration("+"))
    .define("instance_method_declaration", method_declaration("-"))
    .define(
        "_method_definition",
        choice([
            sym("class_method_definition"),
            sym("instance_method_definition"),
        ]),
    )
    .define("class_method_definition", method_definition("+"))
    .define("instance_method_definition", method_definition("-"));

    ext.define(
        "_method_selector",
        choice([
            sym("unary_selector"),
            seq([
                sym("keyword_selector"),
                repeat(seq([tok(","), sym("parameter_declaration")])),
                optional(seq([tok(","), tok("...")])),
            ]),
        ]),
    )
    .define("unary_selector", sym("identifier"))
    .define("keyword_selector", repeat1(sym("keyword_declarator")))
    .define(
        "keyword_declarator",
        seq([
            field("keyword", optional(sym("identifier"))),
            tok(":"),
            field("type", optional(sym("_method_type"))),
            name(),
        ]),
    )
    .define(
        "_method_type",
        seq([tok("("), sym("type_descriptor"), tok(")")]),
    );
}
