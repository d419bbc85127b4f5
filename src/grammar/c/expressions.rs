//! Expressions, with C precedence levels.
//!
//! Every operator rule is an alternative of `_expression` of the form
//! `seq(field(..., _expression), ...)` or `seq(prefix..., _expression)`, so
//! the engine runs them by precedence climbing.

use crate::grammar::rule::*;
use crate::grammar::table::Grammar;
use crate::parser::SyntaxKind;

mod prec {
    pub const ASSIGNMENT: i32 = -2;
    pub const CONDITIONAL: i32 = -1;
    pub const LOGICAL_OR: i32 = 1;
    pub const LOGICAL_AND: i32 = 2;
    pub const INCLUSIVE_OR: i32 = 3;
    pub const EXCLUSIVE_OR: i32 = 4;
    pub const BITWISE_AND: i32 = 5;
    pub const EQUAL: i32 = 6;
    pub const RELATIONAL: i32 = 7;
    pub const SHIFT: i32 = 9;
    pub const ADD: i32 = 10;
    pub const MULTIPLY: i32 = 11;
    pub const CAST: i32 = 12;
    pub const SIZEOF: i32 = 13;
    pub const UNARY: i32 = 14;
    pub const CALL: i32 = 15;
    pub const FIELD: i32 = 16;
    pub const SUBSCRIPT: i32 = 17;
}

const BINARY_OPERATORS: &[(&str, i32)] = &[
    ("||", prec::LOGICAL_OR),
    ("&&", prec::LOGICAL_AND),
    ("|", prec::INCLUSIVE_OR),
    ("^", prec::EXCLUSIVE_OR),
    ("&", prec::BITWISE_AND),
    ("==", prec::EQUAL),
    ("!=", prec::EQUAL),
    ("<", prec::RELATIONAL),
    (">", prec::RELATIONAL),
    ("<=", prec::RELATIONAL),
    (">=", prec::RELATIONAL),
    ("<<", prec::SHIFT),
    (">>", prec::SHIFT),
    ("+", prec::ADD),
    ("-", prec::ADD),
    ("*", prec::MULTIPLY),
    ("/", prec::MULTIPLY),
    ("%", prec::MULTIPLY),
];

pub(super) fn define(g: &mut Grammar) {
    g.define(
        "_expression",
        choice([
            sym("conditional_expression"),
            sym("assignment_expression"),
            sym("binary_expression"),
            sym("unary_expression"),
            sym("update_expression"),
            sym("cast_expression"),
            sym("pointer_expression"),
            sym("sizeof_expression"),
            sym("subscript_expression"),
            sym("call_expression"),
            sym("field_expression"),
            sym("compound_literal_expression"),
            sym("identifier"),
            sym("number_literal"),
            sym("string_literal"),
            sym("concatenated_string"),
            sym("char_literal"),
            sym("parenthesized_expression"),
        ]),
    );

    g.define(
        "conditional_expression",
        prec_right(
            prec::CONDITIONAL,
            seq([
                field("condition", sym("_expression")),
                tok("?"),
                field("consequence", sym("_expression")),
                tok(":"),
                field("alternative", sym("_expression")),
            ]),
        ),
    )
    .define(
        "assignment_expression",
        prec_right(
            prec::ASSIGNMENT,
            seq([
                field("left", sym("_expression")),
                field(
                    "operator",
                    tokens(&["=", "*=", "/=", "%=", "+=", "-=", "<<=", ">>=", "&=", "^=", "|="]),
                ),
                field("right", sym("_expression")),
            ]),
        ),
    )
    .define(
        "binary_expression",
        choice(BINARY_OPERATORS.iter().map(|&(operator, level)| {
            prec_left(
                level,
                seq([
                    field("left", sym("_expression")),
                    field("operator", tok(operator)),
                    field("right", sym("_expression")),
                ]),
            )
        })),
    )
    .define(
        "unary_expression",
        prec_left(
            prec::UNARY,
            seq([
                field("operator", tokens(&["!", "~", "-", "+"])),
                field("argument", sym("_expression")),
            ]),
        ),
    )
    .define(
        "update_expression",
        choice([
            prec_right(
                prec::UNARY,
                seq([
                    field("operator", tokens(&["--", "++"])),
                    field("argument", sym("_expression")),
                ]),
            ),
            prec_left(
                prec::CALL,
                seq([
                    field("argument", sym("_expression")),
                    field("operator", tokens(&["--", "++"])),
                ]),
            ),
        ]),
    )
    .define(
        "cast_expression",
        prec(
            prec::CAST,
            seq([
                tok("("),
                field("type", sym("type_descriptor")),
                tok(")"),
                field("value", sym("_expression")),
            ]),
        ),
    )
    .define(
        "pointer_expression",
        prec_left(
            prec::UNARY,
            seq([
                field("operator", tokens(&["*", "&"])),
                field("argument", sym("_expression")),
            ]),
        ),
    )
    .define(
        "sizeof_expression",
        prec(
            prec::SIZEOF,
            seq([
                tok("sizeof"),
                choice([
                    field("value", sym("_expression")),
                    seq([tok("("), field("type", sym("type_descriptor")), tok(")")]),
                ]),
            ]),
        ),
    )
    .define(
        "subscript_expression",
        prec(
            prec::SUBSCRIPT,
            seq([
                field("argument", sym("_expression")),
                tok("["),
                field("index", sym("_expression")),
                tok("]"),
            ]),
        ),
    )
    .define(
        "call_expression",
        prec(
            prec::CALL,
            seq([
                field("function", sym("_expression")),
                field("arguments", sym("argument_list")),
            ]),
        ),
    )
    .define(
        "field_expression",
        prec(
            prec::FIELD,
            seq([
                field("argument", sym("_expression")),
                field("operator", tokens(&[".", "->"])),
                field("field", sym("field_identifier")),
            ]),
        ),
    );

    g.define(
        "argument_list",
        seq([tok("("), comma_sep(sym("_expression")), tok(")")]),
    )
    .define(
        "compound_literal_expression",
        seq([
            tok("("),
            field("type", sym("type_descriptor")),
            tok(")"),
            field("value", sym("initializer_list")),
        ]),
    )
    .define(
        "initializer_list",
        seq([
            tok("{"),
            comma_sep(choice([
                sym("initializer_pair"),
                sym("_expression"),
                sym("initializer_list"),
            ])),
            optional(tok(",")),
            tok("}"),
        ]),
    )
    .define(
        "initializer_pair",
        seq([
            field(
                "designator",
                repeat1(choice([sym("subscript_designator"), sym("field_designator")])),
            ),
            tok("="),
            field("value", choice([sym("_expression"), sym("initializer_list")])),
        ]),
    )
    .define(
        "subscript_designator",
        seq([tok("["), sym("_expression"), tok("]")]),
    )
    .define("field_designator", seq([tok("."), sym("field_identifier")]))
    .define(
        "parenthesized_expression",
        seq([
            tok("("),
            choice([sym("_expression"), sym("comma_expression")]),
            tok(")"),
        ]),
    )
    .define(
        "comma_expression",
        seq([
            field("left", sym("_expression")),
            tok(","),
            field("right", choice([sym("_expression"), sym("comma_expression")])),
        ]),
    )
    .define(
        "concatenated_string",
        seq([sym("string_literal"), repeat1(sym("string_literal"))]),
    )
    .define("number_literal", pattern(SyntaxKind::NUMBER_LITERAL))
    .define("string_literal", pattern(SyntaxKind::STRING_LITERAL))
    .define("char_literal", pattern(SyntaxKind::CHAR_LITERAL));
}
