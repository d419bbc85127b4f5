//! Syntax kinds for the Rowan-based CST
//!
//! One enum covers lexer tokens, leaf-rule tokens (tokens re-kinded by the
//! grammar, such as `type_identifier` or `self`) and composite nodes. Every
//! visible grammar rule maps to exactly one kind through [`SyntaxKind::from_rule_name`].

/// All syntax kinds (tokens and nodes) of the C + Objective-C tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (kept in the tree, never seen by the grammar)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    PREPROC_LINE, // #import <Foundation/Foundation.h>

    // =========================================================================
    // LEXEMES
    // =========================================================================
    IDENT,          // identifier
    NUMBER_LITERAL, // 42, 0x1F, 1.5e3f
    STRING_LITERAL, // "hello"
    CHAR_LITERAL,   // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_BRACE,     // {
    R_BRACE,     // }
    SEMICOLON,   // ;
    COLON,       // :
    COMMA,       // ,
    DOT,         // .
    ELLIPSIS,    // ...
    ARROW,       // ->
    QUESTION,    // ?
    TILDE,       // ~
    BANG,        // !
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    LT,          // <
    GT,          // >
    EQ,          // =
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    LT_LT,       // <<
    GT_GT,       // >>
    LT_EQ,       // <=
    GT_EQ,       // >=
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    PERCENT_EQ,  // %=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    LT_LT_EQ,    // <<=
    GT_GT_EQ,    // >>=

    // =========================================================================
    // C KEYWORDS
    // =========================================================================
    AUTO_KW,
    BREAK_KW,
    CASE_KW,
    CHAR_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTERN_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    INLINE_KW,
    INT_KW,
    LONG_KW,
    REGISTER_KW,
    RESTRICT_KW,
    RETURN_KW,
    SHORT_KW,
    SIGNED_KW,
    SIZEOF_KW,
    STATIC_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPEDEF_KW,
    UNION_KW,
    UNSIGNED_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    BOOL_KW,   // _Bool
    ATOMIC_KW, // _Atomic

    // =========================================================================
    // OBJECTIVE-C DIRECTIVES (single tokens, never identifiers)
    // =========================================================================
    AT_INTERFACE_KW,
    AT_IMPLEMENTATION_KW,
    AT_END_KW,
    AT_PROTOCOL_KW,
    AT_CLASS_KW,
    AT_PRIVATE_KW,
    AT_PUBLIC_KW,
    AT_PROTECTED_KW,
    AT_SELECTOR_KW,
    AT_ENCODE_KW,
    AT_DEFS_KW,
    AT_IDENT, // any other @word

    // =========================================================================
    // LEAF RULES (tokens re-kinded by the grammar)
    // =========================================================================
    TYPE_IDENTIFIER,
    FIELD_IDENTIFIER,
    STATEMENT_IDENTIFIER,
    PRIMITIVE_TYPE,
    STORAGE_CLASS_SPECIFIER,
    TYPE_QUALIFIER,
    VARIADIC_PARAMETER,
    SELF,
    SUPER,
    PRIVATE,
    PUBLIC,
    PROTECTED,
    PROTOCOL_QUALIFIER,
    UNARY_SELECTOR,

    // =========================================================================
    // C NODES
    // =========================================================================
    TRANSLATION_UNIT,
    FUNCTION_DEFINITION,
    DECLARATION,
    DECLARATION_LIST,
    TYPE_DEFINITION,
    INIT_DECLARATOR,
    POINTER_DECLARATOR,
    FUNCTION_DECLARATOR,
    ARRAY_DECLARATOR,
    PARENTHESIZED_DECLARATOR,
    ABSTRACT_POINTER_DECLARATOR,
    ABSTRACT_FUNCTION_DECLARATOR,
    ABSTRACT_ARRAY_DECLARATOR,
    ABSTRACT_PARENTHESIZED_DECLARATOR,
    PARAMETER_LIST,
    PARAMETER_DECLARATION,
    TYPE_DESCRIPTOR,
    SIZED_TYPE_SPECIFIER,
    STRUCT_SPECIFIER,
    UNION_SPECIFIER,
    ENUM_SPECIFIER,
    FIELD_DECLARATION_LIST,
    FIELD_DECLARATION,
    BITFIELD_CLAUSE,
    ENUMERATOR_LIST,
    ENUMERATOR,
    COMPOUND_STATEMENT,
    EXPRESSION_STATEMENT,
    LABELED_STATEMENT,
    IF_STATEMENT,
    SWITCH_STATEMENT,
    CASE_STATEMENT,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    RETURN_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    GOTO_STATEMENT,
    CONDITIONAL_EXPRESSION,
    ASSIGNMENT_EXPRESSION,
    BINARY_EXPRESSION,
    UNARY_EXPRESSION,
    UPDATE_EXPRESSION,
    CAST_EXPRESSION,
    POINTER_EXPRESSION,
    SIZEOF_EXPRESSION,
    SUBSCRIPT_EXPRESSION,
    CALL_EXPRESSION,
    ARGUMENT_LIST,
    FIELD_EXPRESSION,
    COMPOUND_LITERAL_EXPRESSION,
    INITIALIZER_LIST,
    INITIALIZER_PAIR,
    SUBSCRIPT_DESIGNATOR,
    FIELD_DESIGNATOR,
    PARENTHESIZED_EXPRESSION,
    CONCATENATED_STRING,
    COMMA_EXPRESSION,

    // =========================================================================
    // OBJECTIVE-C NODES
    // =========================================================================
    CLASS_INTERFACE,
    CATEGORY_INTERFACE,
    PROTOCOL_DECLARATION,
    PROTOCOL_DECLARATION_LIST,
    CLASS_DECLARATION_LIST,
    PROTOCOL_REFERENCE_LIST,
    INSTANCE_VARIABLES,
    INSTANCE_VARIABLE_DECLARATION,
    INTERFACE_DECLARATION_LIST,
    CLASS_METHOD_DECLARATION,
    INSTANCE_METHOD_DECLARATION,
    CLASS_IMPLEMENTATION,
    CATEGORY_IMPLEMENTATION,
    IMPLEMENTATION_DEFINITION_LIST,
    CLASS_METHOD_DEFINITION,
    INSTANCE_METHOD_DEFINITION,
    KEYWORD_SELECTOR,
    KEYWORD_DECLARATOR,
    PROTOCOL_TYPE_SPECIFIER,
    MESSAGE_EXPRESSION,
    RECEIVER,
    MESSAGE_SELECTOR,
    KEYWORD_ARGUMENT_LIST,
    KEYWORD_ARGUMENT,
    SELECTOR_EXPRESSION,
    KEYWORD_NAME,
    PROTOCOL_EXPRESSION,
    ENCODE_EXPRESSION,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Root of a tree produced by `parse_rule` for a hidden or leaf rule
    FRAGMENT,
    /// Recovered region: skipped tokens, or a missing closer (zero width)
    ERROR,

    // Must be last
    #[doc(hidden)]
    __LAST,
}

/// Kinds that carry a grammar name, in both directions.
macro_rules! named_kinds {
    ($($kind:ident => $name:literal),* $(,)?) => {
        impl SyntaxKind {
            /// The grammar rule name this kind is produced by, for named kinds.
            pub fn rule_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$kind => Some($name),)*
                    _ => None,
                }
            }

            /// Look up the kind a visible grammar rule produces.
            pub fn from_rule_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$kind),)*
                    _ => None,
                }
            }
        }
    };
}

named_kinds! {
    IDENT => "identifier",
    NUMBER_LITERAL => "number_literal",
    STRING_LITERAL => "string_literal",
    CHAR_LITERAL => "char_literal",

    TYPE_IDENTIFIER => "type_identifier",
    FIELD_IDENTIFIER => "field_identifier",
    STATEMENT_IDENTIFIER => "statement_identifier",
    PRIMITIVE_TYPE => "primitive_type",
    STORAGE_CLASS_SPECIFIER => "storage_class_specifier",
    TYPE_QUALIFIER => "type_qualifier",
    VARIADIC_PARAMETER => "variadic_parameter",
    SELF => "self",
    SUPER => "super",
    PRIVATE => "private",
    PUBLIC => "public",
    PROTECTED => "protected",
    PROTOCOL_QUALIFIER => "protocol_qualifier",
    UNARY_SELECTOR => "unary_selector",

    TRANSLATION_UNIT => "translation_unit",
    FUNCTION_DEFINITION => "function_definition",
    DECLARATION => "declaration",
    DECLARATION_LIST => "declaration_list",
    TYPE_DEFINITION => "type_definition",
    INIT_DECLARATOR => "init_declarator",
    POINTER_DECLARATOR => "pointer_declarator",
    FUNCTION_DECLARATOR => "function_declarator",
    ARRAY_DECLARATOR => "array_declarator",
    PARENTHESIZED_DECLARATOR => "parenthesized_declarator",
    ABSTRACT_POINTER_DECLARATOR => "abstract_pointer_declarator",
    ABSTRACT_FUNCTION_DECLARATOR => "abstract_function_declarator",
    ABSTRACT_ARRAY_DECLARATOR => "abstract_array_declarator",
    ABSTRACT_PARENTHESIZED_DECLARATOR => "abstract_parenthesized_declarator",
    PARAMETER_LIST => "parameter_list",
    PARAMETER_DECLARATION => "parameter_declaration",
    TYPE_DESCRIPTOR => "type_descriptor",
    SIZED_TYPE_SPECIFIER => "sized_type_specifier",
    STRUCT_SPECIFIER => "struct_specifier",
    UNION_SPECIFIER => "union_specifier",
    ENUM_SPECIFIER => "enum_specifier",
    FIELD_DECLARATION_LIST => "field_declaration_list",
    FIELD_DECLARATION => "field_declaration",
    BITFIELD_CLAUSE => "bitfield_clause",
    ENUMERATOR_LIST => "enumerator_list",
    ENUMERATOR => "enumerator",
    COMPOUND_STATEMENT => "compound_statement",
    EXPRESSION_STATEMENT => "expression_statement",
    LABELED_STATEMENT => "labeled_statement",
    IF_STATEMENT => "if_statement",
    SWITCH_STATEMENT => "switch_statement",
    CASE_STATEMENT => "case_statement",
    WHILE_STATEMENT => "while_statement",
    DO_STATEMENT => "do_statement",
    FOR_STATEMENT => "for_statement",
    RETURN_STATEMENT => "return_statement",
    BREAK_STATEMENT => "break_statement",
    CONTINUE_STATEMENT => "continue_statement",
    GOTO_STATEMENT => "goto_statement",
    CONDITIONAL_EXPRESSION => "conditional_expression",
    ASSIGNMENT_EXPRESSION => "assignment_expression",
    BINARY_EXPRESSION => "binary_expression",
    UNARY_EXPRESSION => "unary_expression",
    UPDATE_EXPRESSION => "update_expression",
    CAST_EXPRESSION => "cast_expression",
    POINTER_EXPRESSION => "pointer_expression",
    SIZEOF_EXPRESSION => "sizeof_expression",
    SUBSCRIPT_EXPRESSION => "subscript_expression",
    CALL_EXPRESSION => "call_expression",
    ARGUMENT_LIST => "argument_list",
    FIELD_EXPRESSION => "field_expression",
    COMPOUND_LITERAL_EXPRESSION => "compound_literal_expression",
    INITIALIZER_LIST => "initializer_list",
    INITIALIZER_PAIR => "initializer_pair",
    SUBSCRIPT_DESIGNATOR => "subscript_designator",
    FIELD_DESIGNATOR => "field_designator",
    PARENTHESIZED_EXPRESSION => "parenthesized_expression",
    CONCATENATED_STRING => "concatenated_string",
    COMMA_EXPRESSION => "comma_expression",

    CLASS_INTERFACE => "class_interface",
    CATEGORY_INTERFACE => "category_interface",
    PROTOCOL_DECLARATION => "protocol_declaration",
    PROTOCOL_DECLARATION_LIST => "protocol_declaration_list",
    CLASS_DECLARATION_LIST => "class_declaration_list",
    PROTOCOL_REFERENCE_LIST => "protocol_reference_list",
    INSTANCE_VARIABLES => "instance_variables",
    INSTANCE_VARIABLE_DECLARATION => "instance_variable_declaration",
    INTERFACE_DECLARATION_LIST => "interface_declaration_list",
    CLASS_METHOD_DECLARATION => "class_method_declaration",
    INSTANCE_METHOD_DECLARATION => "instance_method_declaration",
    CLASS_IMPLEMENTATION => "class_implementation",
    CATEGORY_IMPLEMENTATION => "category_implementation",
    IMPLEMENTATION_DEFINITION_LIST => "implementation_definition_list",
    CLASS_METHOD_DEFINITION => "class_method_definition",
    INSTANCE_METHOD_DEFINITION => "instance_method_definition",
    KEYWORD_SELECTOR => "keyword_selector",
    KEYWORD_DECLARATOR => "keyword_declarator",
    PROTOCOL_TYPE_SPECIFIER => "protocol_type_specifier",
    MESSAGE_EXPRESSION => "message_expression",
    RECEIVER => "receiver",
    MESSAGE_SELECTOR => "message_selector",
    KEYWORD_ARGUMENT_LIST => "keyword_argument_list",
    KEYWORD_ARGUMENT => "keyword_argument",
    SELECTOR_EXPRESSION => "selector_expression",
    KEYWORD_NAME => "keyword_name",
    PROTOCOL_EXPRESSION => "protocol_expression",
    ENCODE_EXPRESSION => "encode_expression",

    FRAGMENT => "fragment",
    ERROR => "ERROR",
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment or preprocessor line)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::PREPROC_LINE
        )
    }

    /// Check if this is a C keyword or an Objective-C directive
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AUTO_KW as u16) && (self as u16) <= (Self::AT_IDENT as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::GT_GT_EQ as u16)
    }

    /// Check if this is a lexer literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER_LITERAL | Self::STRING_LITERAL | Self::CHAR_LITERAL
        )
    }

    /// Named kinds appear in S-expressions; punctuation and keywords do not.
    pub fn is_named(self) -> bool {
        self.rule_name().is_some()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: the enum is repr(u16) with contiguous discriminants, bounds checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjcLanguage {}

impl rowan::Language for ObjcLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ObjcLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ObjcLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ObjcLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<ObjcLanguage>;
