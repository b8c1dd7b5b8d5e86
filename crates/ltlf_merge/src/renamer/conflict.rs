//! The conflict graph between the symbols of one role and its greedy coloring
//!
//! Two symbols of the same role conflict (and must keep distinct names) when
//! - they are declared in the same specification, or
//! - no third symbol of that role is declared alongside each of them, i.e.
//!   nothing ties their specifications together.
//!
//! Symbols that don't conflict may share a name in the merged specification.

use hashbrown::HashSet;
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    spec::Specification,
    symbol::{Role, Symbol},
};

/// The distinct symbols of one role, sorted, with the specifications they
/// are declared in
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Occurrences {
    symbols: Vec<Symbol>,
    /// `records[i]` are the indices of the specifications declaring `symbols[i]`
    records: Vec<Vec<usize>>,
}

impl Occurrences {
    pub fn collect(specs: &[Specification], role: Role) -> Self {
        let symbols = specs
            .iter()
            .flat_map(|s| s.symbols(role))
            .unique()
            .sorted()
            .cloned()
            .collect_vec();
        let records = symbols
            .iter()
            .map(|symbol| {
                specs
                    .iter()
                    .positions(|s| s.symbols(role).contains(symbol))
                    .collect_vec()
            })
            .collect_vec();
        for (symbol, records) in symbols.iter().zip(&records) {
            trace!("{role} {symbol}: declared in {} specifications", records.len());
        }
        Self { symbols, records }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Adjacency sets over the indices of an [Occurrences]
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ConflictGraph {
    edges: Vec<HashSet<usize>>,
}

impl ConflictGraph {
    pub fn new(occurrences: &Occurrences) -> Self {
        let n = occurrences.len();
        let n_records = occurrences
            .records
            .iter()
            .flatten()
            .max()
            .map(|m| m + 1)
            .unwrap_or(0);

        // symbols per specification
        let mut members = vec![Vec::new(); n_records];
        for (i, records) in occurrences.records.iter().enumerate() {
            for &r in records {
                members[r].push(i)
            }
        }

        // symbols declared alongside each symbol
        let neighbours = occurrences
            .records
            .iter()
            .enumerate()
            .map(|(i, records)| {
                records
                    .iter()
                    .flat_map(|&r| members[r].iter().copied())
                    .filter(|&j| j != i)
                    .collect::<HashSet<_>>()
            })
            .collect_vec();

        let edges = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| j != i)
                    .filter(|&j| {
                        let bridged = neighbours[i]
                            .intersection(&neighbours[j])
                            .any(|&k| k != i && k != j);
                        neighbours[i].contains(&j) || !bridged
                    })
                    .collect()
            })
            .collect();
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        self.edges[a].contains(&b)
    }

    /// Colors the vertices in index order, each one getting the lowest color
    /// none of its already colored neighbours has
    ///
    /// Colors are numbered from 0 in order of first use.
    pub fn greedy_coloring(&self) -> Vec<usize> {
        let mut colors: Vec<usize> = Vec::with_capacity(self.len());
        for v in 0..self.len() {
            let used: HashSet<usize> = colors
                .iter()
                .enumerate()
                .filter(|&(u, _)| self.conflicts(u, v))
                .map(|(_, &c)| c)
                .collect();
            let color = (0..).find(|c| !used.contains(c)).unwrap_or_default();
            colors.push(color);
        }
        colors
    }
}

/// Groups the symbols of `role` into classes that can share one name
///
/// Classes are ordered by their smallest symbol, and so is each class.
pub fn color_classes(specs: &[Specification], role: Role) -> Vec<Vec<Symbol>> {
    let occurrences = Occurrences::collect(specs, role);
    let colors = ConflictGraph::new(&occurrences).greedy_coloring();
    let n_colors = colors.iter().max().map(|m| m + 1).unwrap_or(0);

    let mut classes = vec![Vec::new(); n_colors];
    for (symbol, &c) in occurrences.symbols().iter().zip(&colors) {
        classes[c].push(symbol.clone())
    }
    debug!(
        "{role} classes: {}",
        classes
            .iter()
            .map(|c| format!("[{}]", c.iter().join(" ")))
            .join(", ")
    );
    classes
}
