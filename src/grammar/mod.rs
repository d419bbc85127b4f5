//! Grammar definition surface.
//!
//! ```text
//! c::grammar()  ─┐
//!                ├─ resolve() ─→ EffectiveGrammar ─→ parser
//! objc::extension() ┘
//! ```
//!
//! Rules are plain data ([`Rule`]); a [`Grammar`] is an ordered rule table
//! with declared extension points; a [`GrammarExtension`] adds rules,
//! widens extension points and declares conflicts. [`resolve`] merges the
//! two and validates the result once, before any parsing.

pub mod analysis;
pub mod c;
mod conflicts;
mod effective;
mod error;
mod extension;
pub mod objc;
mod resolve;
pub mod rule;
mod table;

pub use analysis::{Analysis, Operator, OperatorTable, Terminal, TerminalSet};
pub use conflicts::{ConflictEntry, ConflictRegistry, Resolution, TieSide, Winner};
pub use effective::{EffectiveGrammar, Origin, RuleDef, RuleId};
pub use error::{GrammarError, GrammarErrors};
pub use extension::{GrammarExtension, Override};
pub use resolve::{resolve, resolve_base};
pub use rule::{Assoc, Rule};
pub use table::Grammar;

use once_cell::sync::Lazy;

static OBJC: Lazy<EffectiveGrammar> = Lazy::new(|| {
    match resolve(&c::grammar(), &objc::extension()) {
        Ok(grammar) => grammar,
        Err(errors) => panic!("built-in Objective-C grammar is invalid: {errors}"),
    }
});

static C: Lazy<EffectiveGrammar> = Lazy::new(|| match resolve_base(&c::grammar()) {
    Ok(grammar) => grammar,
    Err(errors) => panic!("built-in C grammar is invalid: {errors}"),
});

/// The C grammar extended with Objective-C, built on first use.
pub fn objc_grammar() -> &'static EffectiveGrammar {
    &OBJC
}

/// The base C grammar alone.
pub fn c_grammar() -> &'static EffectiveGrammar {
    &C
}
