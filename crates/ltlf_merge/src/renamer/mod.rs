//! Computes how symbols are renamed when specifications are merged
//!
//! The mapping is role-qualified: the same old symbol may be an input of one
//! specification and an output of another, and it gets a different name in
//! each role. Input classes are named first then output classes, all from the
//! same [SymbolNamer], so the two roles never share a name.

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{
    error::{MergeError, Result},
    rewriter::Substitution,
    spec::Specification,
    symbol::{Role, Symbol, SymbolNamer},
};

mod conflict;
pub use conflict::{color_classes, ConflictGraph, Occurrences};

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RenameMapping {
    inputs: HashMap<Symbol, Symbol>,
    outputs: HashMap<Symbol, Symbol>,
}

impl RenameMapping {
    /// Computes the renaming of all the symbols declared in `specs`
    ///
    /// ## error
    /// - [MergeError::InsufficientSymbols] if `specs` is empty
    pub fn compute(specs: &[Specification], namer: &SymbolNamer) -> Result<Self> {
        if specs.is_empty() {
            return Err(MergeError::InsufficientSymbols);
        }

        // names left as is in some formula can't be handed out
        let taken: HashSet<&str> = specs.iter().flat_map(Specification::undeclared).collect();
        if !taken.is_empty() {
            trace!("undeclared tokens: {}", taken.iter().sorted().join(" "));
        }

        let mut mapping = Self::default();
        let classes = Role::ALL
            .into_iter()
            .flat_map(|role| color_classes(specs, role).into_iter().map(move |c| (role, c)));
        let names = namer.names(|name| taken.contains(name));

        for ((role, class), name) in classes.zip(names) {
            trace!("{role} class [{}] -> {name}", class.iter().join(" "));
            let map = mapping.role_mut(role);
            map.extend(class.into_iter().map(|old| (old, name.clone())));
        }

        debug!(
            "renaming of {} specifications: {} inputs -> {}, {} outputs -> {}",
            specs.len(),
            mapping.inputs.len(),
            mapping.images(Role::Input).len(),
            mapping.outputs.len(),
            mapping.images(Role::Output).len(),
        );
        Ok(mapping)
    }

    fn role_mut(&mut self, role: Role) -> &mut HashMap<Symbol, Symbol> {
        match role {
            Role::Input => &mut self.inputs,
            Role::Output => &mut self.outputs,
        }
    }

    fn role_map(&self, role: Role) -> &HashMap<Symbol, Symbol> {
        match role {
            Role::Input => &self.inputs,
            Role::Output => &self.outputs,
        }
    }

    /// The new name of `old` when used with `role`
    pub fn get(&self, role: Role, old: &Symbol) -> Option<&Symbol> {
        self.role_map(role).get(old)
    }

    /// All the `(old, new)` pairs of `role`, sorted by old symbol
    pub fn role(&self, role: Role) -> impl Iterator<Item = (&Symbol, &Symbol)> {
        self.role_map(role).iter().sorted()
    }

    /// The distinct new names of `role`, sorted
    pub fn images(&self, role: Role) -> Vec<&Symbol> {
        self.role_map(role).values().unique().sorted().collect()
    }

    /// The token substitution to apply to the formula of `spec`
    ///
    /// Each declared symbol of `spec` is renamed according to the role it has
    /// in `spec`. Symbols this mapping doesn't know are left out.
    pub fn substitution<'a>(&'a self, spec: &'a Specification) -> Substitution<'a> {
        let mut substitution = Substitution::new();
        for role in Role::ALL {
            for old in spec.symbols(role) {
                if let Some(new) = self.get(role, old) {
                    if substitution.insert(old.as_str(), new.as_str()).is_some() {
                        warn!("{old} is declared both as input and output");
                    }
                }
            }
        }
        substitution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(inputs: &[&str], outputs: &[&str]) -> Specification {
        Specification::new(
            "true",
            inputs.iter().copied().map(Symbol::from),
            outputs.iter().copied().map(Symbol::from),
        )
    }

    fn sym(s: &str) -> Symbol {
        Symbol::from(s)
    }

    #[test]
    fn no_specification() {
        assert!(matches!(
            RenameMapping::compute(&[], &SymbolNamer::default()),
            Err(MergeError::InsufficientSymbols)
        ));
    }

    #[test]
    fn inputs_then_outputs() {
        let specs = [spec(&["a", "b"], &["c"])];
        let mapping = RenameMapping::compute(&specs, &SymbolNamer::default()).unwrap();
        assert_eq!(mapping.get(Role::Input, &sym("a")), Some(&sym("p1")));
        assert_eq!(mapping.get(Role::Input, &sym("b")), Some(&sym("p2")));
        assert_eq!(mapping.get(Role::Output, &sym("c")), Some(&sym("p3")));
        assert_eq!(mapping.get(Role::Output, &sym("a")), None);
    }

    #[test]
    fn role_qualified() {
        let specs = [spec(&["p1"], &["p2"]), spec(&["p3"], &["p1"])];
        let mapping = RenameMapping::compute(&specs, &SymbolNamer::default()).unwrap();
        let as_input = mapping.get(Role::Input, &sym("p1")).unwrap();
        let as_output = mapping.get(Role::Output, &sym("p1")).unwrap();
        assert_ne!(as_input, as_output);
        for i in mapping.images(Role::Input) {
            assert!(!mapping.images(Role::Output).contains(&i));
        }
    }

    #[test]
    fn shared_names() {
        let specs = [spec(&["a", "x"], &["o"]), spec(&["b", "x"], &["o"])];
        let mapping = RenameMapping::compute(&specs, &SymbolNamer::new("v")).unwrap();
        assert_eq!(
            mapping.role(Role::Input).collect_vec(),
            [
                (&sym("a"), &sym("v1")),
                (&sym("b"), &sym("v1")),
                (&sym("x"), &sym("v2"))
            ]
        );
        assert_eq!(mapping.images(Role::Output), [&sym("v3")]);
    }

    #[test]
    fn substitution() {
        let specs = [spec(&["p1"], &["p10"]), spec(&["p10"], &["p1"])];
        let mapping = RenameMapping::compute(&specs, &SymbolNamer::default()).unwrap();
        let sub = mapping.substitution(&specs[1]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get("p10"), mapping.get(Role::Input, &sym("p10")).map(|s| s.as_str()));
        assert_eq!(sub.get("p1"), mapping.get(Role::Output, &sym("p1")).map(|s| s.as_str()));
    }
}
