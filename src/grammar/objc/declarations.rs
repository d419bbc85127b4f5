//! Class, category and protocol declarations and implementations.

use super::name;
use crate::grammar::extension::GrammarExtension;
use crate::grammar::rule::*;

pub(super) fn define(ext: &mut GrammarExtension) {
    ext.add_alternatives(
        "_top_level_item",
        vec![
            sym("class_interface"),
            sym("class_implementation"),
            sym("category_interface"),
            sym("category_implementation"),
            sym("protocol_declaration"),
            sym("protocol_declaration_list"),
            sym("class_declaration_list"),
        ],
    );

    ext.define(
        "_superclass_reference",
        seq([tok(":"), field("superclass", sym("identifier"))]),
    )
    .define(
        "class_interface",
        seq([
            tok("@interface"),
            name(),
            optional(sym("_superclass_reference")),
            optional(sym("protocol_reference_list")),
            optional(sym("instance_variables")),
            optional(sym("interface_declaration_list")),
            tok("@end"),
        ]),
    )
    // `@interface Foo ()` declares a class extension
    .define(
        "category_interface",
        seq([
            tok("@interface"),
            name(),
            tok("("),
            optional(field("category", sym("identifier"))),
            tok(")"),
            optional(sym("protocol_reference_list")),
            optional(sym("interface_declaration_list")),
            tok("@end"),
        ]),
    )
    .define(
        "protocol_declaration",
        seq([
            tok("@protocol"),
            name(),
            optional(sym("protocol_reference_list")),
            optional(sym("interface_declaration_list")),
            tok("@end"),
        ]),
    )
    .define(
        "protocol_declaration_list",
        seq([tok("@protocol"), comma_sep1(sym("identifier")), tok(";")]),
    )
    .define(
        "class_declaration_list",
        seq([tok("@class"), comma_sep1(sym("identifier")), tok(";")]),
    )
    .define(
        "protocol_reference_list",
        seq([tok("<"), comma_sep1(sym("identifier")), tok(">")]),
    );

    ext.define(
        "instance_variables",
        seq([
            tok("{"),
            repeat(sym("instance_variable_declaration")),
            tok("}"),
        ]),
    )
    .define(
        "instance_variable_declaration",
        choice([sym("_visibility_specification"), sym("field_declaration")]),
    )
    .define(
        "_visibility_specification",
        choice([sym("private"), sym("public"), sym("protected")]),
    )
    .define("private", tok("@private"))
    .define("public", tok("@public"))
    .define("protected", tok("@protected"))
    .define(
        "interface_declaration_list",
        repeat1(sym("_interface_declaration")),
    )
    .define(
        "_interface_declaration",
        choice([sym("declaration"), sym("_method_declaration")]),
    );

    ext.define(
        "class_implementation",
        seq([
            tok("@implementation"),
            name(),
            optional(sym("_superclass_reference")),
            optional(sym("instance_variables")),
            optional(sym("implementation_definition_list")),
            tok("@end"),
        ]),
    )
    .define(
        "category_implementation",
        seq([
            tok("@implementation"),
            name(),
            tok("("),
            field("category", sym("identifier")),
            tok(")"),
            optional(sym("implementation_definition_list")),
            tok("@end"),
        ]),
    )
    .define(
        "implementation_definition_list",
        repeat1(sym("_implementation_definition")),
    )
    .define(
        "_implementation_definition",
        choice([
            sym("function_definition"),
            sym("declaration"),
            sym("_method_definition"),
        ]),
    );
}
