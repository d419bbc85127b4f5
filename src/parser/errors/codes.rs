//! Stable diagnostic codes.
//!
//! The first two digits name the [`ErrorCategory`]; the last two number
//! codes within it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    Lexical,
    Structural,
    Declaration,
    Statement,
    Generic,
}

impl ErrorCategory {
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Lexical => "lexical error",
            ErrorCategory::Structural => "structural error",
            ErrorCategory::Declaration => "declaration error",
            ErrorCategory::Statement => "statement error",
            ErrorCategory::Generic => "syntax error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Character no token starts with
    E0101,
    /// Closer inserted for `}`, `)`, `]` or `@end`
    E0201,
    /// Skipped tokens at file level
    E0301,
    /// Skipped tokens in an `@interface` or `@protocol` body
    E0302,
    /// Skipped tokens in an `@implementation` body
    E0303,
    /// Skipped tokens in an instance-variable block
    E0304,
    /// Skipped tokens in a struct or union field list
    E0305,
    /// Skipped tokens in a compound statement
    E0401,
    E0901,
    /// Nesting beyond the parser's depth limit
    E0902,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::E0101,
        ErrorCode::E0201,
        ErrorCode::E0301,
        ErrorCode::E0302,
        ErrorCode::E0303,
        ErrorCode::E0304,
        ErrorCode::E0305,
        ErrorCode::E0401,
        ErrorCode::E0901,
        ErrorCode::E0902,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0201 => "E0201",
            ErrorCode::E0301 => "E0301",
            ErrorCode::E0302 => "E0302",
            ErrorCode::E0303 => "E0303",
            ErrorCode::E0304 => "E0304",
            ErrorCode::E0305 => "E0305",
            ErrorCode::E0401 => "E0401",
            ErrorCode::E0901 => "E0901",
            ErrorCode::E0902 => "E0902",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E0101 => ErrorCategory::Lexical,
            ErrorCode::E0201 => ErrorCategory::Structural,
            ErrorCode::E0301
            | ErrorCode::E0302
            | ErrorCode::E0303
            | ErrorCode::E0304
            | ErrorCode::E0305 => ErrorCategory::Declaration,
            ErrorCode::E0401 => ErrorCategory::Statement,
            ErrorCode::E0901 | ErrorCode::E0902 => ErrorCategory::Generic,
        }
    }

    pub fn category_description(&self) -> &'static str {
        self.category().description()
    }

    /// Message used when a diagnostic is built without one.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::E0101 => "invalid character",
            ErrorCode::E0201 => "missing closing delimiter",
            ErrorCode::E0301 => "unexpected tokens at top level",
            ErrorCode::E0302 => "unexpected tokens in interface body",
            ErrorCode::E0303 => "unexpected tokens in implementation body",
            ErrorCode::E0304 => "unexpected tokens in instance variables",
            ErrorCode::E0305 => "unexpected tokens in field list",
            ErrorCode::E0401 => "unexpected tokens in block",
            ErrorCode::E0901 => "unexpected token",
            ErrorCode::E0902 => "nesting too deep",
        }
    }

    /// True for codes that mark an inserted closer rather than skipped input.
    pub fn is_structural(&self) -> bool {
        self.category() == ErrorCategory::Structural
    }

    /// False when the parser stopped following the input.
    pub fn is_recoverable(&self) -> bool {
        *self != ErrorCode::E0902
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
