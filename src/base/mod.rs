//! Foundation types shared by the grammar and parser layers.
//!
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column ranges for diagnostics
//!
//! This module has NO dependencies on other crate modules.

mod position;

pub use position::{LineCol, LineIndex, Position, Span};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
