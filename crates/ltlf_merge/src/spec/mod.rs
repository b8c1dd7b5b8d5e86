use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    error::{MergeError, Result},
    rewriter::{tokenize, SegmentKind},
    symbol::{Role, Symbol},
};

pub mod roles;

/// File extension of the formula half of a specification
pub const FORMULA_EXTENSION: &str = "ltlf";
/// File extension of the role-declaration half of a specification
pub const ROLES_EXTENSION: &str = "part";

/// One specification: a formula and the roles of its symbols
///
/// The inputs and outputs of a [Specification] are expected to be disjoint,
/// this is not checked.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default, Serialize, Deserialize)]
pub struct Specification {
    formula: String,
    inputs: Vec<Symbol>,
    outputs: Vec<Symbol>,
}

impl Specification {
    pub fn new(
        formula: impl Into<String>,
        inputs: impl IntoIterator<Item = Symbol>,
        outputs: impl IntoIterator<Item = Symbol>,
    ) -> Self {
        Self {
            formula: formula.into(),
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().collect(),
        }
    }

    /// The specification with no formula and no symbols
    pub fn empty() -> Self {
        Default::default()
    }

    /// Builds a [Specification] from the content of a `.ltlf` file and of
    /// its `.part` file
    ///
    /// ## error
    /// - [MergeError::EmptyFormula] if `formula_text` is blank
    /// - [MergeError::Format] if `roles_text` isn't a valid declaration
    pub fn load(formula_text: &str, roles_text: &str) -> Result<Self> {
        let roles::Declarations { inputs, outputs } = roles::parse(roles_text)?;
        let formula = formula_text.trim();
        if formula.is_empty() {
            return Err(MergeError::EmptyFormula);
        }
        Ok(Self {
            formula: formula.to_string(),
            inputs,
            outputs,
        })
    }

    /// The content of the `.ltlf` and `.part` files for this specification
    pub fn serialize(&self) -> (String, String) {
        let roles = Role::ALL
            .map(|role| roles::declaration(role, self.symbols(role)))
            .concat();
        (self.formula.clone(), roles)
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn inputs(&self) -> &[Symbol] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Symbol] {
        &self.outputs
    }

    pub fn symbols(&self, role: Role) -> &[Symbol] {
        match role {
            Role::Input => self.inputs(),
            Role::Output => self.outputs(),
        }
    }

    /// The role `symbol` is declared with, inputs first
    pub fn role_of(&self, symbol: &Symbol) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|&r| self.symbols(r).contains(symbol))
    }

    /// The symbol tokens of the formula declared in neither role (`true`,
    /// free variables, ...), in order of appearance
    pub fn undeclared(&self) -> impl Iterator<Item = &str> + '_ {
        tokenize(&self.formula)
            .filter(|s| s.kind == SegmentKind::Symbol)
            .map(|s| s.text)
            .filter(|&t| !self.is_declared(t))
    }

    fn is_declared(&self, token: &str) -> bool {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .any(|s| s.as_str() == token)
    }

    /// Returns `true` if there is nothing in this specification
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formula.is_empty() && self.inputs.is_empty() && self.outputs.is_empty()
    }
}

impl Display for Specification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.formula.fmt(f)
    }
}
