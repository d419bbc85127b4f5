//! Diagnostics for source-level syntax errors.
//!
//! A parse never aborts on bad input. The engine recovers locally, records
//! the recovery in the tree, and this module describes each recovery site
//! with a code, the enclosing scope and what was expected there.

mod codes;
mod context;
mod error;

pub use codes::{ErrorCategory, ErrorCode};
pub use context::ParseContext;
pub use error::{RelatedInfo, Severity, SyntaxError, SyntaxErrorBuilder, unexpected_in};
