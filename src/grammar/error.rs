//! Build-time grammar errors.
//!
//! These are developer-facing: a grammar that produces any of them is never
//! handed to the parser.

use std::fmt;

use thiserror::Error;

/// A defect in a grammar or extension, found while resolving it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// Extending or replacing a rule the base grammar does not open up.
    #[error("`{rule}` is not an extension point of the base grammar")]
    UnknownExtensionPoint { rule: &'static str },

    /// The extended body no longer offers the original body as an alternative.
    #[error("extension of `{rule}` drops the original body")]
    OriginalDropped { rule: &'static str },

    /// Defining a name the base grammar owns without it being an extension point.
    #[error("`{rule}` is already defined by the base grammar")]
    RedefinedRule { rule: &'static str },

    #[error("`{rule}` is defined more than once")]
    DuplicateRule { rule: &'static str },

    #[error("`{referenced}` referenced from `{rule}` is not defined")]
    UndefinedRule {
        rule: &'static str,
        referenced: &'static str,
    },

    #[error("start rule `{rule}` is not defined")]
    UndefinedStartRule { rule: &'static str },

    #[error("conflict entry #{entry} names undefined rule `{rule}`")]
    ConflictUndefinedRule { entry: usize, rule: &'static str },

    #[error("conflict entry #{entry} names no rules")]
    EmptyConflict { entry: usize },

    #[error("visible rule `{rule}` has no syntax kind")]
    MissingSyntaxKind { rule: &'static str },

    /// Left recursion that is not `head -> seq(head, ...)` through choices.
    #[error("`{rule}` is left-recursive through `{via}`, which cannot be executed")]
    UnsupportedLeftRecursion { rule: &'static str, via: String },

    /// Two alternatives can match the same tokens and no conflict entry says
    /// which one wins.
    #[error("alternatives `{first}` and `{second}` of a choice in `{rule}` overlap without a conflict entry")]
    AmbiguityWithoutPolicy {
        rule: &'static str,
        first: String,
        second: String,
    },
}

impl GrammarError {
    /// Name of the rule the error is about.
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            Self::UnknownExtensionPoint { rule }
            | Self::OriginalDropped { rule }
            | Self::RedefinedRule { rule }
            | Self::DuplicateRule { rule }
            | Self::UndefinedRule { rule, .. }
            | Self::UndefinedStartRule { rule }
            | Self::ConflictUndefinedRule { rule, .. }
            | Self::MissingSyntaxKind { rule }
            | Self::UnsupportedLeftRecursion { rule, .. }
            | Self::AmbiguityWithoutPolicy { rule, .. } => Some(rule),
            Self::EmptyConflict { .. } => None,
        }
    }
}

/// Every error found while resolving a grammar, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct GrammarErrors(pub Vec<GrammarError>);

impl GrammarErrors {
    pub fn iter(&self) -> impl Iterator<Item = &GrammarError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GrammarErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grammar error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}
