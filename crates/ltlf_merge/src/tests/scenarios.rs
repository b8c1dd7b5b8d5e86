use itertools::Itertools;

use crate::{
    error::MergeError,
    merge, merge_with,
    renamer::RenameMapping,
    symbol::{Role, Symbol, SymbolNamer},
    MergeOptions, Specification,
};

macro_rules! fixture {
    ($name:literal) => {
        Specification::load(
            include_str!(concat!("../../../../tests/fixtures/", $name, ".ltlf")),
            include_str!(concat!("../../../../tests/fixtures/", $name, ".part")),
        )
        .unwrap()
    };
}

fn names(symbols: &[Symbol]) -> Vec<&str> {
    symbols.iter().map(Symbol::as_str).collect()
}

fn numbers(spec: &Specification, role: Role) -> Vec<usize> {
    spec.symbols(role)
        .iter()
        .map(|s| s.as_str().trim_start_matches('p').parse().unwrap())
        .collect()
}

fn is_balanced(formula: &str) -> bool {
    let mut depth = 0i64;
    for c in formula.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => (),
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

#[test]
fn disjoint_symbols() {
    let merged = merge(&[fixture!("disjoint_1"), fixture!("disjoint_2")]).unwrap();
    assert_eq!(merged.inputs().len(), 8);
    assert_eq!(merged.outputs().len(), 8);
    assert!(merged.inputs().iter().all(|s| !merged.outputs().contains(s)));
    assert_eq!(numbers(&merged, Role::Input), (1..=8).collect_vec());
    assert_eq!(numbers(&merged, Role::Output), (9..=16).collect_vec());
    assert_eq!(
        merged.formula(),
        "((G(p1 -> X[!](p9))) && (G(p5 -> X[!](p13))))"
    );
}

#[test]
fn input_output_clash() {
    let specs = [fixture!("conflict_1"), fixture!("conflict_2")];
    let mapping = RenameMapping::compute(&specs, &SymbolNamer::default()).unwrap();
    let p1 = Symbol::from("p1");
    let as_input = mapping.get(Role::Input, &p1).unwrap();
    let as_output = mapping.get(Role::Output, &p1).unwrap();
    assert_ne!(as_input, as_output);

    let merged = merge(&specs).unwrap();
    assert_eq!(names(merged.inputs()), ["p1", "p2", "p3", "p4"]);
    assert_eq!(names(merged.outputs()), ["p5", "p6", "p7", "p8"]);
    assert_eq!(
        merged.formula(),
        "((G(p1 -> X[!](p6))) && (G(p3 -> X[!](p5))))"
    );
}

#[test]
fn renumbering_closes_gaps() {
    let merged = merge(&[fixture!("gaps_1"), fixture!("gaps_2")]).unwrap();
    let all = numbers(&merged, Role::Input)
        .into_iter()
        .chain(numbers(&merged, Role::Output))
        .sorted()
        .collect_vec();
    assert_eq!(all, (1..=8).collect_vec());
    assert_eq!(
        merged.formula(),
        "((G(p1 -> X[!](p5))) && (G(p2 -> X[!](p6))))"
    );
}

#[test]
fn empty_roles() {
    let merged = merge(&[fixture!("empty_roles_1"), fixture!("empty_roles_2")]).unwrap();
    assert_eq!(names(merged.inputs()), ["p1", "p2"]);
    assert_eq!(names(merged.outputs()), ["p3", "p4"]);
    assert_eq!(merged.formula(), "((G(true)) && (G(p1)))");
}

#[test]
fn nothing_to_merge() {
    let merged = merge(&[]).unwrap();
    assert_eq!(merged, Specification::empty());
    assert!(matches!(
        RenameMapping::compute(&[], &SymbolNamer::default()),
        Err(MergeError::InsufficientSymbols)
    ));
}

#[test]
fn temporal_operators_kept() {
    let merged = merge(&[fixture!("temporal_1"), fixture!("temporal_2")]).unwrap();
    let formula = merged.formula();
    assert!(formula.contains("G(p1)"));
    assert!(formula.contains("F(p2)"));
    assert!(formula.contains("&&"));
    assert!(formula.starts_with('(') && formula.ends_with(')'));
    assert!(is_balanced(formula));
}

#[test]
fn bridged_symbols_share_a_name() {
    let merged = merge(&[fixture!("bridged_1"), fixture!("bridged_2")]).unwrap();
    assert_eq!(names(merged.inputs()), ["p1", "p2"]);
    assert_eq!(names(merged.outputs()), ["p3", "p4"]);
    assert_eq!(
        merged.formula(),
        "((G(p1 -> F(p3))) && (G(p2 -> F(p4)) && F(p1)))"
    );
}

#[test]
fn single_specification() {
    let spec = fixture!("conflict_2");
    let merged = merge(std::slice::from_ref(&spec)).unwrap();
    assert_eq!(merged.inputs().len(), spec.inputs().len());
    assert_eq!(merged.outputs().len(), spec.outputs().len());
    assert_eq!(merged.formula(), "(G(p1 -> X[!](p3)))");
}

#[test]
fn written_back() {
    let options = MergeOptions {
        namer: SymbolNamer::new("q"),
        ..Default::default()
    };
    let merged = merge_with(&[fixture!("temporal_1"), fixture!("temporal_2")], &options).unwrap();
    let (formula, roles) = merged.serialize();
    assert_eq!(formula, "((G(q1)) && (F(q2)))");
    assert_eq!(roles, ".inputs: q1 q2\n.outputs: q3 q4\n");
    assert_eq!(Specification::load(&formula, &roles).unwrap(), merged);
}

#[test]
fn invariant_violation_message() {
    let err = MergeError::invariant_violation(["p4", "p2"].map(Symbol::from));
    assert!(matches!(&err, MergeError::InvariantViolation { symbols } if names(symbols) == ["p2", "p4"]));
    assert!(err.to_string().contains("p2"));
}
