//! Message sends, `self`/`super` and the `@`-literal expressions.

use crate::grammar::extension::GrammarExtension;
use crate::grammar::rule::*;

fn parenthesized_after(directive: &'static str, inner: Rule) -> Rule {
    seq([tok(directive), tok("("), inner, tok(")")])
}

pub(super) fn define(ext: &mut GrammarExtension) {
    ext.add_alternatives(
        "_expression",
        vec![
            sym("self"),
            sym("selector_expression"),
            sym("message_expression"),
            sym("protocol_expression"),
            sym("encode_expression"),
        ],
    )
    .define("self", tok("self"))
    .define("super", tok("super"));

    ext.define(
        "message_expression",
        seq([
            tok("["),
            field("receiver", sym("receiver")),
            field("selector", sym("message_selector")),
            tok("]"),
        ]),
    )
    .define("receiver", choice([sym("_expression"), sym("super")]))
    .define(
        "message_selector",
        choice([sym("identifier"), sym("keyword_argument_list")]),
    )
    .define("keyword_argument_list", repeat1(sym("keyword_argument")))
    .define(
        "keyword_argument",
        seq([
            optional(field("keyword", sym("identifier"))),
            tok(":"),
            field("argument", sym("_expression")),
        ]),
    );

    ext.define(
        "selector_expression",
        parenthesized_after("@selector", field("name", sym("_selector_name"))),
    )
    .define(
        "_selector_name",
        choice([sym("identifier"), repeat1(sym("keyword_name"))]),
    )
    .define(
        "keyword_name",
        choice([seq([sym("identifier"), tok(":")]), tok(":")]),
    )
    .define(
        "protocol_expression",
        parenthesized_after("@protocol", field("name", sym("identifier"))),
    )
    .define(
        "encode_expression",
        parenthesized_after("@encode", sym("identifier")),
    );
}
