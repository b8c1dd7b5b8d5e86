use itertools::Itertools;
use log::{debug, trace};

use crate::{
    error::{MergeError, Result},
    renamer::RenameMapping,
    rewriter::rewrite,
    spec::Specification,
    symbol::{Role, Symbol, SymbolNamer},
};

/// The binary "and" of LTLf
pub const AND: &str = "&&";

/// How specifications are merged
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct MergeOptions {
    /// where the new symbol names come from
    pub namer: SymbolNamer,
    /// the conjunction placed between the formulas
    pub connective: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            namer: Default::default(),
            connective: AND.to_string(),
        }
    }
}

/// [merge_with] using the default [MergeOptions]
pub fn merge(specs: &[Specification]) -> Result<Specification> {
    merge_with(specs, &Default::default())
}

/// Merges `specs` into a single [Specification]
///
/// The formula is `((f1) && ... && (fn))` where `fi` is the `i`-th formula
/// with its symbols renamed, or `(f1)` if there is only one. Inputs and
/// outputs are the sorted new names.
///
/// Undeclared tokens of the formulas are left as they are, and no symbol is
/// renamed to one of them.
///
/// Merging nothing gives [Specification::empty].
///
/// ## error
/// - [MergeError::InvariantViolation] if the result would have a symbol both
///   as input and output. This should never happen.
pub fn merge_with(specs: &[Specification], options: &MergeOptions) -> Result<Specification> {
    if specs.is_empty() {
        debug!("nothing to merge");
        return Ok(Specification::empty());
    }
    trace!("merging {} specifications", specs.len());

    let mapping = RenameMapping::compute(specs, &options.namer)?;

    let parts = specs
        .iter()
        .map(|spec| {
            log_undeclared(spec);
            format!("({})", rewrite(spec.formula(), &mapping.substitution(spec)))
        })
        .collect_vec();
    let formula = match parts.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", parts.iter().join(&format!(" {} ", options.connective))),
    };

    let [inputs, outputs] = Role::ALL.map(|role| images(specs, &mapping, role));

    let shared = inputs
        .iter()
        .filter(|s| outputs.binary_search(s).is_ok())
        .cloned()
        .collect_vec();
    if !shared.is_empty() {
        return Err(MergeError::invariant_violation(shared));
    }

    debug!(
        "merged {} specifications into {} inputs and {} outputs",
        specs.len(),
        inputs.len(),
        outputs.len()
    );
    Ok(Specification::new(formula, inputs, outputs))
}

/// The sorted new names of all the symbols declared with `role`
fn images(specs: &[Specification], mapping: &RenameMapping, role: Role) -> Vec<Symbol> {
    specs
        .iter()
        .flat_map(|spec| spec.symbols(role))
        .filter_map(|old| mapping.get(role, old))
        .unique()
        .sorted()
        .cloned()
        .collect()
}

fn log_undeclared(spec: &Specification) {
    if log::log_enabled!(log::Level::Debug) {
        spec.undeclared()
            .unique()
            .for_each(|t| debug!("\"{t}\" is not declared, left as is"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(formula: &str, inputs: &[&str], outputs: &[&str]) -> Specification {
        Specification::new(
            formula,
            inputs.iter().copied().map(Symbol::from),
            outputs.iter().copied().map(Symbol::from),
        )
    }

    fn names(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn nothing() {
        let merged = merge(&[]).unwrap();
        assert_eq!(merged.formula(), "");
        assert!(merged.inputs().is_empty());
        assert!(merged.outputs().is_empty());
    }

    #[test]
    fn single() {
        let merged = merge(&[spec("G(a -> F(b))", &["a"], &["b"])]).unwrap();
        assert_eq!(merged.formula(), "(G(p1 -> F(p2)))");
        assert_eq!(names(merged.inputs()), ["p1"]);
        assert_eq!(names(merged.outputs()), ["p2"]);
    }

    #[test]
    fn two() {
        let merged = merge(&[
            spec("G(p1 -> X[!](p10))", &["p1"], &["p10"]),
            spec("G(p1 -> X[!](p10))", &["p10"], &["p1"]),
        ])
        .unwrap();
        // inputs p1 -> p1, p10 -> p2 ; outputs p1 -> p3, p10 -> p4
        assert_eq!(
            merged.formula(),
            "((G(p1 -> X[!](p4))) && (G(p3 -> X[!](p2))))"
        );
        assert_eq!(names(merged.inputs()), ["p1", "p2"]);
        assert_eq!(names(merged.outputs()), ["p3", "p4"]);
    }

    #[test]
    fn three_in_order() {
        let merged = merge(&[
            spec("a", &["a"], &[]),
            spec("b", &["b"], &[]),
            spec("c", &["c"], &[]),
        ])
        .unwrap();
        assert_eq!(merged.formula(), "((p1) && (p2) && (p3))");
    }

    #[test]
    fn options() {
        let options = MergeOptions {
            namer: SymbolNamer::new("v"),
            connective: "&".to_string(),
        };
        let merged = merge_with(
            &[spec("F(x)", &["x"], &[]), spec("G(!y)", &[], &["y"])],
            &options,
        )
        .unwrap();
        assert_eq!(merged.formula(), "((F(v1)) & (G(!v2)))");
    }

    #[test]
    fn undeclared_tokens_untouched() {
        let merged = merge(&[spec("G(true && q7 && a)", &["a"], &[])]).unwrap();
        assert_eq!(merged.formula(), "(G(true && q7 && p1))");
    }

    #[test]
    fn fresh_names_avoid_free_tokens() {
        let merged = merge(&[
            spec("G(p5 -> p6)", &["p5"], &["p6"]),
            spec("F(p1 && p7)", &["p7"], &[]),
        ])
        .unwrap();
        assert_eq!(merged.formula(), "((G(p2 -> p4)) && (F(p1 && p3)))");
        assert_eq!(names(merged.inputs()), ["p2", "p3"]);
        assert_eq!(names(merged.outputs()), ["p4"]);
    }
}
