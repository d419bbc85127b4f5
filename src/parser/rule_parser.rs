//! Rule-based parser for testing individual grammar rules
//!
//! Any rule of the effective grammar can be used as the entry point, which
//! lets tests exercise a construct without wrapping it in a whole file.
//!
//! # Example
//!
//! ```
//! use objc_syntax::parser::{SyntaxKind, parse_rule};
//!
//! let parse = parse_rule("message_expression", "[self run:5]").unwrap();
//! assert!(parse.ok());
//! assert_eq!(parse.syntax().kind(), SyntaxKind::MESSAGE_EXPRESSION);
//! ```

use thiserror::Error;

use super::parser::{Parse, run};
use crate::grammar::{EffectiveGrammar, objc_grammar};

/// Failure to start a rule-level parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRuleError {
    #[error("grammar `{grammar}` has no rule `{rule}`")]
    UnknownRule { grammar: String, rule: String },
}

/// Parse `input` as a single `rule` of the Objective-C grammar.
pub fn parse_rule(rule: &str, input: &str) -> Result<Parse, ParseRuleError> {
    parse_rule_with(objc_grammar(), rule, input)
}

/// Parse `input` as a single `rule` of `grammar`.
///
/// Visible rules produce a tree rooted at the rule's own node. Hidden and
/// leaf rules produce a FRAGMENT root holding whatever the rule matched.
pub fn parse_rule_with(grammar: &EffectiveGrammar, rule: &str, input: &str) -> Result<Parse, ParseRuleError> {
    let id = grammar.id(rule).ok_or_else(|| ParseRuleError::UnknownRule {
        grammar: grammar.name().to_string(),
        rule: rule.to_string(),
    })?;
    Ok(run(grammar, id, input))
}
