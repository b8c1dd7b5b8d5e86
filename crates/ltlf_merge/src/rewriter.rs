//! Whole-token substitution of symbols in formula text
//!
//! A formula is cut into maximal runs of symbol characters (alphanumerics and
//! `_`) and separators (everything else). Only complete symbol runs are ever
//! replaced, so renaming `p1` leaves `p10` alone whatever the order of the
//! substitution.

use hashbrown::HashMap;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum SegmentKind {
    Symbol,
    Separator,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

/// Iterator over the [Segment]s of a formula, see [tokenize]
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

#[inline]
pub fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `formula` into alternating symbol and separator segments
///
/// Concatenating the segments gives back `formula`.
pub fn tokenize(formula: &str) -> Tokens<'_> {
    Tokens { rest: formula }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let symbol = is_symbol_char(first);
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| is_symbol_char(c) != symbol)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        let kind = if symbol {
            SegmentKind::Symbol
        } else {
            SegmentKind::Separator
        };
        Some(Segment { text, kind })
    }
}

/// A token-level substitution `old -> new`
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Substitution<'a>(HashMap<&'a str, &'a str>);

impl<'a> Substitution<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds `old -> new`, returning the previous image of `old` if any
    pub fn insert(&mut self, old: &'a str, new: &'a str) -> Option<&'a str> {
        self.0.insert(old, new)
    }

    pub fn get(&self, token: &str) -> Option<&'a str> {
        self.0.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Substitution<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Applies `substitution` to every symbol token of `formula`
pub fn rewrite(formula: &str, substitution: &Substitution<'_>) -> String {
    let mut out = String::with_capacity(formula.len());
    for Segment { text, kind } in tokenize(formula) {
        match kind {
            SegmentKind::Symbol => out.push_str(substitution.get(text).unwrap_or(text)),
            SegmentKind::Separator => out.push_str(text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn tokens() {
        let segments = tokenize("G(p1 -> X[!](p10))").collect_vec();
        let texts = segments.iter().map(|s| s.text).collect_vec();
        assert_eq!(
            texts,
            ["G", "(", "p1", " -> ", "X", "[!](", "p10", "))"]
        );
        assert_eq!(segments[2].kind, SegmentKind::Symbol);
        assert_eq!(segments[3].kind, SegmentKind::Separator);
        assert_eq!(texts.concat(), "G(p1 -> X[!](p10))");
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn no_partial_match() {
        let sub: Substitution<'_> = [("p1", "p2")].into_iter().collect();
        assert_eq!(rewrite("p1 && p10 && p11 && xp1", &sub), "p2 && p10 && p11 && xp1");
    }

    #[test]
    fn simultaneous() {
        // a sequential rewrite would turn everything into p1
        let sub: Substitution<'_> = [("p1", "p2"), ("p2", "p1")].into_iter().collect();
        assert_eq!(rewrite("(p1 U p2) | !p1", &sub), "(p2 U p1) | !p2");
    }

    #[test]
    fn keeps_everything_else() {
        let sub: Substitution<'_> = [("a", "b")].into_iter().collect();
        assert_eq!(rewrite("  F (a_b & a)\n", &sub), "  F (a_b & b)\n");
        assert_eq!(rewrite("true", &Substitution::new()), "true");
    }
}
