//! Parser tests
//!
//! - Objective-C declarations, methods and expressions
//! - C expression precedence
//! - Error recovery and diagnostics
//! - Lossless trees, determinism and field stability
//! - Sample files under `tests/corpus`

pub mod tests_corpus;
pub mod tests_declarations;
pub mod tests_expressions;
pub mod tests_properties;
pub mod tests_recovery;
