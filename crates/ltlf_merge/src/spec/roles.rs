//! Parsing and printing of role declarations (`.part` files)
//!
//! ```text
//! .inputs: p1 p2 p3
//! .outputs: p4 p5
//! ```

use itertools::Itertools;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::FormatError,
    symbol::{Role, Symbol},
};

/// `<keyword> [:] <symbols>` where the keyword may start with a `.`
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\.?(?P<keyword>[A-Za-z_]+)\s*:?(?P<symbols>.*)$")
        .expect("invalid declaration regex")
});

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Declarations {
    pub inputs: Vec<Symbol>,
    pub outputs: Vec<Symbol>,
}

fn parse_keyword(keyword: &str) -> Option<Role> {
    Role::ALL
        .into_iter()
        .find(|r| r.keyword().eq_ignore_ascii_case(keyword))
}

/// Parses the content of a `.part` file
///
/// Both declarations must be present, in any order. Blank lines are skipped.
pub fn parse(text: &str) -> Result<Declarations, FormatError> {
    let mut inputs = None;
    let mut outputs = None;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let captures = DECLARATION
            .captures(line)
            .ok_or_else(|| FormatError::UnknownKeyword(line.trim().to_string()))?;
        let role = parse_keyword(&captures["keyword"])
            .ok_or_else(|| FormatError::UnknownKeyword(line.trim().to_string()))?;
        let symbols = captures["symbols"]
            .split_whitespace()
            .map(Symbol::from)
            .collect_vec();
        trace!("{role} declaration: {symbols:?}");

        let slot = match role {
            Role::Input => &mut inputs,
            Role::Output => &mut outputs,
        };
        if slot.replace(symbols).is_some() {
            return Err(FormatError::DuplicateDeclaration(role));
        }
    }

    Ok(Declarations {
        inputs: inputs.ok_or(FormatError::MissingDeclaration(Role::Input))?,
        outputs: outputs.ok_or(FormatError::MissingDeclaration(Role::Output))?,
    })
}

/// One declaration line, newline included, symbols sorted
pub fn declaration<'a>(role: Role, symbols: impl IntoIterator<Item = &'a Symbol>) -> String {
    let symbols = symbols.into_iter().sorted().join(" ");
    if symbols.is_empty() {
        format!(".{}:\n", role.keyword())
    } else {
        format!(".{}: {symbols}\n", role.keyword())
    }
}
