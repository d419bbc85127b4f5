//! Production trees and the constructors grammar modules are written with.
//!
//! The constructors mirror the vocabulary grammar authors already know from
//! tree-sitter (`seq`, `choice`, `repeat`, `field`, `prec_left`, ...) so a rule
//! reads close to its textbook form:
//!
//! ```
//! use objc_syntax::grammar::rule::*;
//!
//! let keyword_argument = seq([
//!     optional(field("keyword", sym("identifier"))),
//!     tok(":"),
//!     field("argument", sym("_expression")),
//! ]);
//! assert_eq!(keyword_argument.to_string(), "seq(optional(keyword: identifier), ':', argument: _expression)");
//! ```

use std::fmt;

use crate::parser::SyntaxKind;

/// Associativity of a precedence-annotated production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    None,
}

/// A production body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Matches the empty string
    Blank,
    /// A literal, matched against the token text (`"@end"`, `"+"`, `"self"`)
    Token(&'static str),
    /// A lexeme class, matched against the token kind
    Pattern(SyntaxKind),
    /// Reference to a named rule
    Symbol(&'static str),
    Seq(Vec<Rule>),
    Choice(Vec<Rule>),
    /// `min` is 0 or 1
    Repeat { rule: Box<Rule>, min: u8 },
    Optional(Box<Rule>),
    Field { name: &'static str, rule: Box<Rule> },
    /// Static precedence; only meaningful on operator alternatives of a
    /// left-recursive rule
    Prec {
        value: i32,
        assoc: Assoc,
        rule: Box<Rule>,
    },
    /// Weight added to every interpretation that contains this production
    DynPrec { value: i32, rule: Box<Rule> },
}

impl Rule {
    /// Strip fields and precedence wrappers.
    pub fn unwrapped(&self) -> &Rule {
        match self {
            Rule::Field { rule, .. } | Rule::Prec { rule, .. } | Rule::DynPrec { rule, .. } => {
                rule.unwrapped()
            }
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Rule::Token(_) | Rule::Pattern(_))
    }

    /// Visit every symbol name referenced anywhere in the body.
    pub fn for_each_symbol(&self, f: &mut impl FnMut(&'static str)) {
        match self {
            Rule::Symbol(name) => f(name),
            Rule::Seq(items) | Rule::Choice(items) => {
                items.iter().for_each(|item| item.for_each_symbol(f))
            }
            Rule::Repeat { rule, .. }
            | Rule::Optional(rule)
            | Rule::Field { rule, .. }
            | Rule::Prec { rule, .. }
            | Rule::DynPrec { rule, .. } => rule.for_each_symbol(f),
            Rule::Blank | Rule::Token(_) | Rule::Pattern(_) => {}
        }
    }

    /// Visit every literal token anywhere in the body.
    pub fn for_each_literal(&self, f: &mut impl FnMut(&'static str)) {
        match self {
            Rule::Token(text) => f(text),
            Rule::Seq(items) | Rule::Choice(items) => {
                items.iter().for_each(|item| item.for_each_literal(f))
            }
            Rule::Repeat { rule, .. }
            | Rule::Optional(rule)
            | Rule::Field { rule, .. }
            | Rule::Prec { rule, .. }
            | Rule::DynPrec { rule, .. } => rule.for_each_literal(f),
            Rule::Blank | Rule::Symbol(_) | Rule::Pattern(_) => {}
        }
    }

    /// Visit every `Choice` node, outermost first.
    pub fn for_each_choice<'a>(&'a self, f: &mut impl FnMut(&'a [Rule])) {
        match self {
            Rule::Choice(items) => {
                f(items);
                items.iter().for_each(|item| item.for_each_choice(f));
            }
            Rule::Seq(items) => items.iter().for_each(|item| item.for_each_choice(f)),
            Rule::Repeat { rule, .. }
            | Rule::Optional(rule)
            | Rule::Field { rule, .. }
            | Rule::Prec { rule, .. }
            | Rule::DynPrec { rule, .. } => rule.for_each_choice(f),
            Rule::Blank | Rule::Token(_) | Rule::Pattern(_) | Rule::Symbol(_) => {}
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, head: &str, items: &[Rule]) -> fmt::Result {
            write!(f, "{head}(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, ")")
        }

        match self {
            Rule::Blank => write!(f, "blank"),
            Rule::Token(text) => write!(f, "'{text}'"),
            Rule::Pattern(kind) => write!(f, "/{}/", kind.rule_name().unwrap_or("?")),
            Rule::Symbol(name) => write!(f, "{name}"),
            Rule::Seq(items) => list(f, "seq", items),
            Rule::Choice(items) => list(f, "choice", items),
            Rule::Repeat { rule, min: 0 } => write!(f, "repeat({rule})"),
            Rule::Repeat { rule, .. } => write!(f, "repeat1({rule})"),
            Rule::Optional(rule) => write!(f, "optional({rule})"),
            Rule::Field { name, rule } => write!(f, "{name}: {rule}"),
            Rule::Prec { value, rule, .. } => write!(f, "prec({value}, {rule})"),
            Rule::DynPrec { value, rule } => write!(f, "prec_dynamic({value}, {rule})"),
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

pub fn blank() -> Rule {
    Rule::Blank
}

pub fn tok(text: &'static str) -> Rule {
    Rule::Token(text)
}

pub fn pattern(kind: SyntaxKind) -> Rule {
    Rule::Pattern(kind)
}

pub fn sym(name: &'static str) -> Rule {
    Rule::Symbol(name)
}

pub fn seq(items: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Seq(items.into_iter().collect())
}

pub fn choice(items: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Choice(items.into_iter().collect())
}

/// Choice of literal tokens
pub fn tokens(texts: &[&'static str]) -> Rule {
    choice(texts.iter().copied().map(tok))
}

pub fn repeat(rule: Rule) -> Rule {
    Rule::Repeat {
        rule: Box::new(rule),
        min: 0,
    }
}

pub fn repeat1(rule: Rule) -> Rule {
    Rule::Repeat {
        rule: Box::new(rule),
        min: 1,
    }
}

pub fn optional(rule: Rule) -> Rule {
    Rule::Optional(Box::new(rule))
}

pub fn field(name: &'static str, rule: Rule) -> Rule {
    Rule::Field {
        name,
        rule: Box::new(rule),
    }
}

pub fn prec(value: i32, rule: Rule) -> Rule {
    Rule::Prec {
        value,
        assoc: Assoc::None,
        rule: Box::new(rule),
    }
}

pub fn prec_left(value: i32, rule: Rule) -> Rule {
    Rule::Prec {
        value,
        assoc: Assoc::Left,
        rule: Box::new(rule),
    }
}

pub fn prec_right(value: i32, rule: Rule) -> Rule {
    Rule::Prec {
        value,
        assoc: Assoc::Right,
        rule: Box::new(rule),
    }
}

pub fn prec_dynamic(value: i32, rule: Rule) -> Rule {
    Rule::DynPrec {
        value,
        rule: Box::new(rule),
    }
}

/// `rule (',' rule)*`
pub fn comma_sep1(rule: Rule) -> Rule {
    seq([rule.clone(), repeat(seq([tok(","), rule]))])
}

/// `(rule (',' rule)*)?`
pub fn comma_sep(rule: Rule) -> Rule {
    optional(comma_sep1(rule))
}
