//! Rowan-based lossless parser for Objective-C
//!
//! This module executes an [`EffectiveGrammar`](crate::grammar::EffectiveGrammar)
//! using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, trivia included
//!     ↓
//! Engine → best interpretation of the significant tokens
//!     ↓
//! Tree builder → GreenNode + field side table + diagnostics
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//! ```
//!
//! Parsing never fails: input the grammar cannot place ends up in `ERROR`
//! nodes, each reported once in [`Parse::errors`].

mod engine;
pub mod errors;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod rule_parser;
mod sexp;
mod syntax_kind;
mod tree;

pub use errors::{ErrorCategory, ErrorCode, ParseContext, RelatedInfo, Severity, SyntaxError, SyntaxErrorBuilder};
pub use lexer::{Lexer, Token, classify, tokenize};
pub use parser::{Parse, parse, parse_many, parse_with};
pub use rule_parser::{ParseRuleError, parse_rule, parse_rule_with};
pub use syntax_kind::{
    ObjcLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, NodeOrToken, TextRange, TextSize};
