//! Type specifiers, struct/union/enum bodies.

use crate::grammar::rule::*;
use crate::grammar::table::Grammar;
use crate::parser::SyntaxKind;

/// `kw name? body` for struct and union
fn tagged(keyword: &'static str, body: &'static str) -> Rule {
    seq([
        tok(keyword),
        choice([
            seq([
                field("name", sym("type_identifier")),
                optional(field("body", sym(body))),
            ]),
            field("body", sym(body)),
        ]),
    ])
}

pub(super) fn define(g: &mut Grammar) {
    g.define(
        "_type_specifier",
        choice([
            sym("struct_specifier"),
            sym("union_specifier"),
            sym("enum_specifier"),
            sym("sized_type_specifier"),
            sym("primitive_type"),
            sym("_type_identifier"),
        ]),
    )
    .define("_type_identifier", sym("type_identifier"))
    .define("identifier", pattern(SyntaxKind::IDENT))
    .define("type_identifier", sym("identifier"))
    .define("field_identifier", sym("identifier"))
    .define("statement_identifier", sym("identifier"))
    .define(
        "primitive_type",
        tokens(&["void", "char", "int", "float", "double", "_Bool"]),
    )
    .define(
        "sized_type_specifier",
        seq([
            repeat1(tokens(&["signed", "unsigned", "long", "short"])),
            optional(field("type", sym("primitive_type"))),
        ]),
    );

    g.define("struct_specifier", tagged("struct", "field_declaration_list"))
        .define("union_specifier", tagged("union", "field_declaration_list"))
        .define("enum_specifier", tagged("enum", "enumerator_list"))
        .define(
            "field_declaration_list",
            seq([tok("{"), repeat(sym("field_declaration")), tok("}")]),
        )
        .define(
            "field_declaration",
            seq([
                sym("_declaration_specifiers"),
                comma_sep(field("declarator", sym("_declarator"))),
                optional(sym("bitfield_clause")),
                tok(";"),
            ]),
        )
        .define("bitfield_clause", seq([tok(":"), sym("_expression")]))
        .define(
            "enumerator_list",
            seq([
                tok("{"),
                comma_sep(sym("enumerator")),
                optional(tok(",")),
                tok("}"),
            ]),
        )
        .define(
            "enumerator",
            seq([
                field("name", sym("identifier")),
                optional(seq([tok("="), field("value", sym("_expression"))])),
            ]),
        );
}
