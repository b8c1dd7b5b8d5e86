use itertools::Itertools;

use crate::symbol::{Role, Symbol};

pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors of the merging core
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("the formula is empty")]
    EmptyFormula,

    #[error("no specification to compute a renaming for")]
    InsufficientSymbols,

    /// The renamer let a symbol through in both roles. This is a bug, not an
    /// input problem.
    #[error(
        "internal error: {} used both as input and output of the merged specification",
        .symbols.iter().join(", ")
    )]
    InvariantViolation { symbols: Vec<Symbol> },
}

/// Malformed role declarations (`.part` files)
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum FormatError {
    #[error("missing the .{} declaration", .0.keyword())]
    MissingDeclaration(Role),
    #[error(".{} is declared more than once", .0.keyword())]
    DuplicateDeclaration(Role),
    #[error("unrecognized declaration line: \"{0}\"")]
    UnknownKeyword(String),
}

impl MergeError {
    pub fn invariant_violation(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self::InvariantViolation {
            symbols: symbols.into_iter().sorted().collect(),
        }
    }

    /// Returns `true` if the error is a [`MergeError::Format`] error
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(..))
    }
}
