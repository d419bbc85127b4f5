//! Diagnostics produced while building a syntax tree.
//!
//! A [`SyntaxError`] always carries an [`ErrorCode`] and a byte range into
//! the source. Recovery sites attach a hint and, for unclosed scopes, the
//! range of the opener.

use std::fmt;

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::{LineIndex, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secondary location attached to a diagnostic, such as the `{` an
/// unclosed block started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        RelatedInfo { message: message.into(), range }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// Byte range in the source; empty for inserted tokens.
    pub range: TextRange,
    pub code: ErrorCode,
    pub severity: Severity,
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        SyntaxError {
            message: message.into(),
            range,
            code,
            severity: Severity::default(),
            hint: None,
            related: Vec::new(),
        }
    }

    /// Zero-width error at `offset`.
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        SyntaxError::new(message, TextRange::empty(offset), code)
    }

    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }

    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        SyntaxError { hint: Some(hint.into()), ..self }
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn with_severity(self, severity: Severity) -> Self {
        SyntaxError { severity, ..self }
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }

    /// Line/column span of the error in the text `index` was built from
    pub fn span(&self, index: &LineIndex) -> Span {
        index.span(self.range)
    }

    /// `CODE: message`, followed by an indented hint line when present.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        match &self.hint {
            Some(hint) => write!(f, "\n  hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Incremental construction of a [`SyntaxError`].
///
/// The message defaults to the code's generic text and the range to an
/// empty range at offset 0.
pub struct SyntaxErrorBuilder {
    draft: SyntaxError,
    message: Option<String>,
}

impl SyntaxErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        SyntaxErrorBuilder {
            draft: SyntaxError::at_offset(String::new(), TextSize::new(0), code),
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn range(mut self, range: TextRange) -> Self {
        self.draft.range = range;
        self
    }

    pub fn at_offset(self, offset: TextSize) -> Self {
        self.range(TextRange::empty(offset))
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.draft.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.draft.hint = Some(hint.into());
        self
    }

    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.draft.related.push(RelatedInfo::new(message, range));
        self
    }

    pub fn build(self) -> SyntaxError {
        let SyntaxErrorBuilder { mut draft, message } = self;
        draft.message = message.unwrap_or_else(|| draft.code.default_message().to_string());
        draft
    }
}

/// Diagnostic for tokens skipped inside a recovery scope.
///
/// `expected` lists what could have started an element of the scope.
pub fn unexpected_in(found: &str, range: TextRange, context: ParseContext, expected: &[SmolStr]) -> SyntaxError {
    let hint = if expected.is_empty() {
        format!("expected {}", context.expected_description())
    } else {
        format!("expected one of: {}", expected.join(", "))
    };
    SyntaxError::builder(context.error_code())
        .message(format!("unexpected `{}` {}", found, context.description()))
        .range(range)
        .hint(hint)
        .build()
}
