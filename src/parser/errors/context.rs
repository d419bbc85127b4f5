//! Recovery contexts for context-aware error messages
//!
//! Every recovery scope of the grammar (a list closed by a literal token, or
//! the file itself) maps to a context. Diagnostics for tokens skipped inside
//! a scope name the context and pick their error code from it.

use super::codes::ErrorCode;

/// Where in the source structure a recovered error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a file
    #[default]
    TopLevel,
    /// Inside `@interface ... @end` or `@protocol ... @end`
    InterfaceBody,
    /// Inside `@implementation ... @end`
    ImplementationBody,
    /// Inside an instance-variable block `{ ... }`
    InstanceVariables,
    /// Inside a struct or union member list
    FieldList,
    /// Inside a compound statement
    Block,
    /// Any other delimited list (arguments, parameters, initializers)
    Other,
}

impl ParseContext {
    /// The context a recovery scope owned by `rule` stands for.
    pub fn for_rule(rule: &str) -> Self {
        match rule {
            "translation_unit" => Self::TopLevel,
            "class_interface" | "category_interface" | "protocol_declaration"
            | "interface_declaration_list" => Self::InterfaceBody,
            "class_implementation" | "category_implementation"
            | "implementation_definition_list" => Self::ImplementationBody,
            "instance_variables" => Self::InstanceVariables,
            "field_declaration_list" => Self::FieldList,
            "compound_statement" => Self::Block,
            _ => Self::Other,
        }
    }

    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::InterfaceBody => "in interface body",
            Self::ImplementationBody => "in implementation body",
            Self::InstanceVariables => "in instance variables",
            Self::FieldList => "in field list",
            Self::Block => "in block",
            Self::Other => "in list",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a declaration, function definition, or @interface/@implementation/@protocol",
            Self::InterfaceBody => "a method declaration, declaration, or @end",
            Self::ImplementationBody => "a method definition, function definition, or @end",
            Self::InstanceVariables => "a field declaration or visibility marker",
            Self::FieldList => "a field declaration",
            Self::Block => "a statement or declaration",
            Self::Other => "a list element",
        }
    }

    /// Error code for tokens skipped in this context
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TopLevel => ErrorCode::E0301,
            Self::InterfaceBody => ErrorCode::E0302,
            Self::ImplementationBody => ErrorCode::E0303,
            Self::InstanceVariables => ErrorCode::E0304,
            Self::FieldList => ErrorCode::E0305,
            Self::Block => ErrorCode::E0401,
            Self::Other => ErrorCode::E0901,
        }
    }
}
