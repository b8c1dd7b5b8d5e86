//! Filtering benchmark pairs with a results ledger (a CSV file)
//!
//! Two layouts are supported:
//! - flat: the second column holds the number of a pair, `NNN.ltlf` and
//!   `NNN.part` are looked up in a single source directory;
//! - grouped: rows are `tK, fN, status`, pairs `fN.ltlf`/`fN.part` live in
//!   `tree_size_K` subdirectories of the source directory and only the rows
//!   with the requested status are kept.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use log::{debug, trace, warn};

use super::{Result, SelectionError, SpecFile};

/// Subdirectories of a grouped source directory are `tree_size_K`
pub const GROUP_DIR_PREFIX: &str = "tree_size_";
/// The status kept by default in grouped ledgers
pub const DEFAULT_STATUS: &str = "Realizable";

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Layout {
    /// pair numbers are zero-padded to `width` digits
    Flat { width: usize },
    Grouped { status: String },
}

impl Default for Layout {
    fn default() -> Self {
        Self::Flat { width: 3 }
    }
}

fn fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|f| f.trim().trim_matches('"').trim())
        .collect()
}

/// The pair numbers of a flat ledger
///
/// Rows with less than two columns or with an empty second column are
/// skipped, invalid numbers are skipped with a warning.
pub fn parse_flat(ledger: &str) -> Vec<u64> {
    ledger
        .lines()
        .filter_map(|line| {
            let row = fields(line);
            let number = *row.get(1)?;
            if number.is_empty() {
                return None;
            }
            match number.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("invalid number format: {number}");
                    None
                }
            }
        })
        .collect()
}

/// For each group of a grouped ledger, the numbers of the files with `status`
pub fn parse_grouped(ledger: &str, status: &str) -> BTreeMap<String, BTreeSet<u64>> {
    let mut groups: BTreeMap<String, BTreeSet<u64>> = BTreeMap::new();
    for line in ledger.lines() {
        let row = fields(line);
        let [group, file, row_status] = match row.as_slice() {
            [g, f, s, ..] => [*g, *f, *s],
            _ => continue,
        };
        if row_status != status {
            continue;
        }
        let number = file.strip_prefix('f').unwrap_or(file);
        match number.parse() {
            Ok(n) => {
                groups.entry(group.to_string()).or_default().insert(n);
            }
            Err(_) => warn!("invalid file number: {file}"),
        }
    }
    groups
}

/// Copies the `stem` pair from `src_dir` into `dest_dir`
///
/// Returns `false` (and copies nothing) if one of the two files is missing.
pub fn copy_pair(src_dir: &Path, dest_dir: &Path, stem: &str) -> Result<bool> {
    let from = SpecFile::new(src_dir, stem);
    if !from.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dest_dir).map_err(SelectionError::io(dest_dir))?;
    let to = SpecFile::new(dest_dir, stem);
    fs::copy(&from.formula_path, &to.formula_path).map_err(SelectionError::io(&to.formula_path))?;
    fs::copy(&from.roles_path, &to.roles_path).map_err(SelectionError::io(&to.roles_path))?;
    trace!("copied {stem} to {}", dest_dir.display());
    Ok(true)
}

/// Copies the pairs listed in `ledger` from `source` to `dest`
///
/// Returns the number of pairs copied.
pub fn filter(ledger: &str, source: &Path, dest: &Path, layout: &Layout) -> Result<usize> {
    let copied = match layout {
        Layout::Flat { width } => filter_flat(ledger, source, dest, *width)?,
        Layout::Grouped { status } => filter_grouped(ledger, source, dest, status)?,
    };
    debug!("copied {copied} pairs to {}", dest.display());
    Ok(copied)
}

fn filter_flat(ledger: &str, source: &Path, dest: &Path, width: usize) -> Result<usize> {
    let mut copied = 0;
    for n in parse_flat(ledger) {
        let stem = format!("{n:0width$}");
        if copy_pair(source, dest, &stem)? {
            copied += 1;
        } else {
            warn!("files for number {stem} not found");
        }
    }
    Ok(copied)
}

fn filter_grouped(ledger: &str, source: &Path, dest: &Path, status: &str) -> Result<usize> {
    let groups = parse_grouped(ledger, status);
    let mut copied = 0;
    for entry in fs::read_dir(source).map_err(SelectionError::io(source))? {
        let dir = entry.map_err(SelectionError::io(source))?.path();
        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(size) = dir_name.strip_prefix(GROUP_DIR_PREFIX) else {
            continue;
        };
        if !dir.is_dir() {
            continue;
        }
        let Some(numbers) = groups.get(&format!("t{size}")) else {
            continue;
        };
        let out = dest.join(dir_name);
        for n in numbers {
            if copy_pair(&dir, &out, &format!("f{n}"))? {
                copied += 1;
                debug!("copied t{size}/f{n} from {dir_name}");
            }
        }
    }
    Ok(copied)
}
