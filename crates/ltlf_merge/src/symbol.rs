use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};
use utils::natural_cmp;

/// A propositional symbol (`p1`, `p23`, ...)
///
/// Equality is plain string equality, ordering is [natural_cmp] so that
/// `p2 < p10`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Box<str>);

/// The role a [Symbol] is declared under in a `.part` file
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Input,
    Output,
}

impl Symbol {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'a> From<&'a str> for Symbol {
    fn from(value: &'a str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Input, Role::Output];

    /// The keyword of the role in a `.part` file, without the leading `.`
    pub fn keyword(&self) -> &'static str {
        match self {
            Role::Input => "inputs",
            Role::Output => "outputs",
        }
    }

    #[must_use]
    pub fn other(&self) -> Self {
        match self {
            Role::Input => Role::Output,
            Role::Output => Role::Input,
        }
    }

    /// Returns `true` if the role is [`Input`].
    ///
    /// [`Input`]: Role::Input
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }

    /// Returns `true` if the role is [`Output`].
    ///
    /// [`Output`]: Role::Output
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Input => write!(f, "input"),
            Role::Output => write!(f, "output"),
        }
    }
}

/// Hands out fresh symbol names `prefix1`, `prefix2`, ...
///
/// The renamer draws input and output names from the same namer which keeps
/// the two roles apart.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct SymbolNamer {
    prefix: Box<str>,
    first: usize,
}

impl SymbolNamer {
    pub const DEFAULT_PREFIX: &'static str = "p";

    pub fn new(prefix: impl Into<Box<str>>) -> Self {
        Self {
            prefix: prefix.into(),
            first: 1,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The `idx`-th fresh name (0-based)
    pub fn name(&self, idx: usize) -> Symbol {
        Symbol::new(format!("{}{}", self.prefix, self.first + idx))
    }

    /// All the fresh names in order, skipping the ones `taken` says are
    /// already in use
    pub fn names<'a>(
        &'a self,
        taken: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = Symbol> + 'a {
        (0..)
            .map(|idx| self.name(idx))
            .filter(move |s| !taken(s.as_str()))
    }
}

impl Default for SymbolNamer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}
