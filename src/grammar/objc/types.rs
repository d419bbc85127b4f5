//! Protocol-qualified types, protocol qualifiers and `@defs` bodies.

use crate::grammar::extension::GrammarExtension;
use crate::grammar::rule::*;

fn class_defs(keyword: &'static str) -> Rule {
    seq([
        tok(keyword),
        field("name", optional(sym("type_identifier"))),
        field("body", sym("_class_defs")),
    ])
}

pub(super) fn define(ext: &mut GrammarExtension) {
    ext.add_alternatives("_type_identifier", vec![sym("protocol_type_specifier")])
        .define(
            "protocol_type_specifier",
            seq([sym("identifier"), sym("protocol_reference_list")]),
        )
        .add_alternatives("type_qualifier", vec![sym("protocol_qualifier")])
        .define(
            "protocol_qualifier",
            tokens(&["in", "out", "inout", "bycopy", "byref", "oneway"]),
        );

    ext.add_alternatives("struct_specifier", vec![class_defs("struct")])
        .add_alternatives("union_specifier", vec![class_defs("union")])
        .add_alternatives("enum_specifier", vec![class_defs("enum")])
        .define(
            "_class_defs",
            seq([
                tok("@defs"),
                tok("("),
                field("class_name", sym("identifier")),
                tok(")"),
            ]),
        );
}
