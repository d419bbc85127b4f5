//! # objc-syntax-base
//!
//! Grammar composition and lossless parsing for Objective-C layered on C.
//!
//! The Objective-C grammar is never written out in full. It is a
//! [`GrammarExtension`](grammar::GrammarExtension) applied to a base C
//! grammar: extended rules keep every base alternative, new rules are added
//! next to them, and each place where the two layers overlap is covered by
//! an entry of the conflict registry. The result is checked once and then
//! executed by the parser.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Logos lexer, grammar engine, rowan CST, diagnostics
//!   ↓
//! grammar   → Rule DSL, base C grammar, Objective-C extension, resolver
//!   ↓
//! base      → Primitives (TextRange, LineIndex, Span)
//! ```
//!
//! ## Example
//!
//! ```
//! let parse = objc_syntax::parse("@protocol Copying <NSObject> @end");
//! assert!(parse.ok());
//! assert_eq!(
//!     parse.to_sexp(),
//!     "(translation_unit (protocol_declaration name: (identifier) \
//!      (protocol_reference_list (identifier))))"
//! );
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → parser)
// ============================================================================

/// Foundation types: TextRange, line/column conversion
pub mod base;

/// Grammar definition surface: rules, extensions, conflicts, resolution
pub mod grammar;

/// Parser: Logos lexer, grammar engine, rowan CST
pub mod parser;

// Re-export the entry points
pub use grammar::{EffectiveGrammar, c_grammar, objc_grammar};
pub use parser::{Parse, SyntaxKind, SyntaxNode, parse, parse_many, parse_rule, parse_with};

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};
