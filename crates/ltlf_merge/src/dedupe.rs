//! Detection of specifications with the same formula

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use utils::implvec;

use crate::spec::Specification;

/// Entries sharing one formula: the one to keep and the others
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DuplicateGroup<K> {
    pub kept: K,
    pub removed: Vec<K>,
}

/// The formula with all its whitespace removed
pub fn normalize_formula(formula: &str) -> String {
    formula.split_whitespace().collect()
}

/// Groups the keys whose formulas are the same once normalized
///
/// In each group the smallest key is kept. Only groups with at least two
/// entries are returned, ordered by kept key.
pub fn find_duplicates<'a, K>(entries: implvec!((&'a K, &'a str))) -> Vec<DuplicateGroup<K>>
where
    K: Ord + Clone + 'a,
{
    let mut by_formula: HashMap<String, Vec<&K>> = HashMap::new();
    for (key, formula) in entries {
        by_formula
            .entry(normalize_formula(formula))
            .or_default()
            .push(key)
    }

    by_formula
        .into_values()
        .filter(|keys| keys.len() > 1)
        .filter_map(|keys| {
            let mut keys = keys.into_iter().sorted().cloned();
            let kept = keys.next()?;
            let removed = keys.collect_vec();
            debug!("{} duplicated formulas", removed.len() + 1);
            Some(DuplicateGroup { kept, removed })
        })
        .sorted_by(|a, b| a.kept.cmp(&b.kept))
        .collect()
}

/// Keeps one entry per formula, the one with the smallest key
///
/// The result is sorted by key.
pub fn dedupe<K>(entries: implvec!((K, Specification))) -> Vec<(K, Specification)>
where
    K: Ord + Clone,
{
    let entries = entries.into_iter().collect_vec();
    let removed = find_duplicates(entries.iter().map(|(k, spec)| (k, spec.formula())))
        .into_iter()
        .flat_map(|g| g.removed)
        .collect_vec();
    entries
        .into_iter()
        .filter(|(k, _)| !removed.contains(k))
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect()
}
