//! Declared local ambiguities and how each one is settled.
//!
//! The registry is plain data: the engine asks it to pick between two
//! interpretations of the same span, and the build-time ambiguity check asks
//! whether an overlapping pair of alternatives is covered at all.

use std::fmt;

/// How a declared conflict is settled when two interpretations cover the
/// same tokens with equal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// An alternative contributed by the extension beats the original body.
    PreferExtension,
    /// The interpretation headed by the named rule wins.
    Prefer(&'static str),
    /// A reserved token distinguishes the forms; nothing is left to decide.
    Marker(&'static str),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::PreferExtension => write!(f, "prefer extension"),
            Resolution::Prefer(rule) => write!(f, "prefer {rule}"),
            Resolution::Marker(token) => write!(f, "marker '{token}'"),
        }
    }
}

/// An unordered set of rule names declared as locally ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    rules: Vec<&'static str>,
    resolution: Resolution,
}

impl ConflictEntry {
    pub fn new(rules: &[&'static str], resolution: Resolution) -> Self {
        let mut rules = rules.to_vec();
        rules.sort_unstable();
        rules.dedup();
        Self { rules, resolution }
    }

    pub fn rules(&self) -> &[&'static str] {
        &self.rules
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn involves(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| *r == rule)
    }
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({})", self.rules.join(", "), self.resolution)
    }
}

/// What the registry needs to know about one side of a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TieSide {
    /// Rule at the left edge of the alternative, if it starts with one
    pub head: Option<&'static str>,
    /// Alternative was contributed by an extension of a base rule
    pub from_extension: bool,
}

/// The ordered list of conflict entries of an effective grammar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictRegistry {
    entries: Vec<ConflictEntry>,
}

impl ConflictRegistry {
    pub fn new(entries: Vec<ConflictEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ConflictEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some entry applies to a choice owned by `owner` between
    /// alternatives headed by `heads`.
    pub fn covers(&self, owner: &str, heads: &[&str]) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.involves(owner) || heads.iter().any(|h| entry.involves(h)))
    }

    /// Pick the winner of a same-span tie between `first` (found earlier)
    /// and `second`. `None` leaves the decision to declaration order.
    pub fn resolve(&self, owner: &str, first: TieSide, second: TieSide) -> Option<Winner> {
        for entry in &self.entries {
            let applies = entry.involves(owner)
                || [first.head, second.head]
                    .into_iter()
                    .flatten()
                    .any(|head| entry.involves(head));
            if !applies {
                continue;
            }
            let decided = match entry.resolution {
                Resolution::PreferExtension => match (first.from_extension, second.from_extension) {
                    (true, false) => Some(Winner::First),
                    (false, true) => Some(Winner::Second),
                    _ => None,
                },
                Resolution::Prefer(rule) => {
                    match (first.head == Some(rule), second.head == Some(rule)) {
                        (true, false) => Some(Winner::First),
                        (false, true) => Some(Winner::Second),
                        _ => None,
                    }
                }
                Resolution::Marker(_) => None,
            };
            if let Some(winner) = decided {
                tracing::trace!("conflict {} settles tie in `{}`: {:?}", entry, owner, winner);
                return Some(winner);
            }
        }
        None
    }
}

/// Outcome of [`ConflictRegistry::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
}
