//! Top-level items, declarations and declarators.

use crate::grammar::rule::*;
use crate::grammar::table::Grammar;

/// `choice(seq(left, rest...), seq(rest...))`: an optional left operand
/// written so the operator rule stays of the form `seq(head, ...)`.
fn optional_left(left: Rule, rest: Vec<Rule>) -> Rule {
    choice([
        seq(std::iter::once(left).chain(rest.iter().cloned())),
        seq(rest),
    ])
}

pub(super) fn define(g: &mut Grammar) {
    g.define("translation_unit", repeat(sym("_top_level_item")))
        .define(
            "_top_level_item",
            choice([
                sym("function_definition"),
                sym("declaration"),
                sym("type_definition"),
                sym("_empty_declaration"),
            ]),
        )
        .define("_empty_declaration", seq([sym("_type_specifier"), tok(";")]))
        .define(
            "function_definition",
            seq([
                sym("_declaration_specifiers"),
                field("declarator", sym("_declarator")),
                optional(sym("declaration_list")),
                field("body", sym("compound_statement")),
            ]),
        )
        .define(
            "declaration",
            seq([
                sym("_declaration_specifiers"),
                comma_sep1(field(
                    "declarator",
                    choice([sym("_declarator"), sym("init_declarator")]),
                )),
                tok(";"),
            ]),
        )
        .define("declaration_list", repeat1(sym("declaration")))
        .define(
            "type_definition",
            seq([
                tok("typedef"),
                repeat(sym("type_qualifier")),
                field("type", sym("_type_specifier")),
                repeat(sym("type_qualifier")),
                comma_sep1(field("declarator", sym("_declarator"))),
                tok(";"),
            ]),
        )
        .define(
            "_declaration_specifiers",
            seq([
                repeat(sym("_declaration_modifiers")),
                field("type", sym("_type_specifier")),
                repeat(sym("_declaration_modifiers")),
            ]),
        )
        .define(
            "_declaration_modifiers",
            choice([sym("storage_class_specifier"), sym("type_qualifier")]),
        )
        .define(
            "storage_class_specifier",
            tokens(&["extern", "static", "auto", "register", "inline"]),
        )
        .define(
            "type_qualifier",
            tokens(&["const", "volatile", "restrict", "_Atomic"]),
        );

    // Declarators
    g.define(
        "_declarator",
        choice([
            sym("pointer_declarator"),
            sym("function_declarator"),
            sym("array_declarator"),
            sym("parenthesized_declarator"),
            sym("identifier"),
        ]),
    )
    .define(
        "pointer_declarator",
        prec_dynamic(
            1,
            prec_right(
                0,
                seq([
                    tok("*"),
                    repeat(sym("type_qualifier")),
                    field("declarator", sym("_declarator")),
                ]),
            ),
        ),
    )
    .define(
        "function_declarator",
        prec(
            1,
            seq([
                field("declarator", sym("_declarator")),
                field("parameters", sym("parameter_list")),
            ]),
        ),
    )
    .define(
        "array_declarator",
        prec(
            1,
            seq([
                field("declarator", sym("_declarator")),
                tok("["),
                repeat(sym("type_qualifier")),
                optional(field("size", choice([sym("_expression"), tok("*")]))),
                tok("]"),
            ]),
        ),
    )
    // `foo(x);` in a block is a call, not a declaration of `x`
    .define(
        "parenthesized_declarator",
        prec_dynamic(-10, seq([tok("("), sym("_declarator"), tok(")")])),
    )
    .define(
        "init_declarator",
        seq([
            field("declarator", sym("_declarator")),
            tok("="),
            field("value", choice([sym("initializer_list"), sym("_expression")])),
        ]),
    );

    // Abstract declarators
    g.define(
        "_abstract_declarator",
        choice([
            sym("abstract_pointer_declarator"),
            sym("abstract_function_declarator"),
            sym("abstract_array_declarator"),
            sym("abstract_parenthesized_declarator"),
        ]),
    )
    .define(
        "abstract_pointer_declarator",
        prec_dynamic(
            1,
            prec_right(
                0,
                seq([
                    tok("*"),
                    repeat(sym("type_qualifier")),
                    optional(field("declarator", sym("_abstract_declarator"))),
                ]),
            ),
        ),
    )
    .define(
        "abstract_function_declarator",
        prec(
            1,
            optional_left(
                field("declarator", sym("_abstract_declarator")),
                vec![field("parameters", sym("parameter_list"))],
            ),
        ),
    )
    .define(
        "abstract_array_declarator",
        prec(
            1,
            optional_left(
                field("declarator", sym("_abstract_declarator")),
                vec![
                    tok("["),
                    optional(field("size", choice([sym("_expression"), tok("*")]))),
                    tok("]"),
                ],
            ),
        ),
    )
    .define(
        "abstract_parenthesized_declarator",
        prec(1, seq([tok("("), sym("_abstract_declarator"), tok(")")])),
    );

    // Parameters
    g.define(
        "parameter_list",
        seq([
            tok("("),
            comma_sep(choice([sym("parameter_declaration"), sym("variadic_parameter")])),
            tok(")"),
        ]),
    )
    .define(
        "parameter_declaration",
        seq([
            sym("_declaration_specifiers"),
            optional(field(
                "declarator",
                choice([sym("_declarator"), sym("_abstract_declarator")]),
            )),
        ]),
    )
    .define("variadic_parameter", tok("..."))
    .define(
        "type_descriptor",
        seq([
            repeat(sym("type_qualifier")),
            field("type", sym("_type_specifier")),
            repeat(sym("type_qualifier")),
            optional(field("declarator", sym("_abstract_declarator"))),
        ]),
    );
}
