//! Statements and compound blocks.

use crate::grammar::rule::*;
use crate::grammar::table::Grammar;

fn expression_or_comma() -> Rule {
    choice([sym("_expression"), sym("comma_expression")])
}

pub(super) fn define(g: &mut Grammar) {
    g.define(
        "compound_statement",
        seq([tok("{"), repeat(sym("_block_item")), tok("}")]),
    )
    .define(
        "_block_item",
        choice([sym("declaration"), sym("_statement"), sym("type_definition")]),
    )
    .define(
        "_statement",
        choice([sym("case_statement"), sym("_non_case_statement")]),
    )
    .define(
        "_non_case_statement",
        choice([
            sym("labeled_statement"),
            sym("compound_statement"),
            sym("expression_statement"),
            sym("if_statement"),
            sym("switch_statement"),
            sym("do_statement"),
            sym("while_statement"),
            sym("for_statement"),
            sym("return_statement"),
            sym("break_statement"),
            sym("continue_statement"),
            sym("goto_statement"),
        ]),
    )
    .define(
        "labeled_statement",
        seq([
            field("label", sym("statement_identifier")),
            tok(":"),
            sym("_statement"),
        ]),
    )
    .define(
        "expression_statement",
        seq([optional(expression_or_comma()), tok(";")]),
    );

    g.define(
        "if_statement",
        seq([
            tok("if"),
            field("condition", sym("parenthesized_expression")),
            field("consequence", sym("_statement")),
            optional(seq([tok("else"), field("alternative", sym("_statement"))])),
        ]),
    )
    .define(
        "switch_statement",
        seq([
            tok("switch"),
            field("condition", sym("parenthesized_expression")),
            field("body", sym("compound_statement")),
        ]),
    )
    .define(
        "case_statement",
        seq([
            choice([
                seq([tok("case"), field("value", sym("_expression"))]),
                tok("default"),
            ]),
            tok(":"),
            repeat(choice([
                sym("_non_case_statement"),
                sym("declaration"),
                sym("type_definition"),
            ])),
        ]),
    )
    .define(
        "while_statement",
        seq([
            tok("while"),
            field("condition", sym("parenthesized_expression")),
            field("body", sym("_statement")),
        ]),
    )
    .define(
        "do_statement",
        seq([
            tok("do"),
            field("body", sym("_statement")),
            tok("while"),
            field("condition", sym("parenthesized_expression")),
            tok(";"),
        ]),
    )
    .define(
        "for_statement",
        seq([
            tok("for"),
            tok("("),
            choice([
                field("initializer", sym("declaration")),
                seq([
                    optional(field("initializer", expression_or_comma())),
                    tok(";"),
                ]),
            ]),
            optional(field("condition", expression_or_comma())),
            tok(";"),
            optional(field("update", expression_or_comma())),
            tok(")"),
            field("body", sym("_statement")),
        ]),
    )
    .define(
        "return_statement",
        seq([tok("return"), optional(expression_or_comma()), tok(";")]),
    )
    .define("break_statement", seq([tok("break"), tok(";")]))
    .define("continue_statement", seq([tok("continue"), tok(";")]))
    .define(
        "goto_statement",
        seq([
            tok("goto"),
            field("label", sym("statement_identifier")),
            tok(";"),
        ]),
    );
}
