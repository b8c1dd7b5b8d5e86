//! Everything touching the filesystem: finding `.ltlf`/`.part` pairs,
//! picking some of them, loading and writing them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{debug, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use utils::NaturalOrd;

use crate::{
    dedupe::{find_duplicates, DuplicateGroup},
    error::MergeError,
    spec::{Specification, FORMULA_EXTENSION, ROLES_EXTENSION},
};

pub mod ledger;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("io error on \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("in specification \"{name}\": {source}")]
    Spec {
        name: String,
        #[source]
        source: MergeError,
    },
    #[error("requested {requested} pairs but only {available} available")]
    NotEnoughPairs { requested: usize, available: usize },
    #[error("no pair named \"{0}\"")]
    UnknownPair(String),
    #[error("\"{}\" doesn't end with a file name", .0.display())]
    InvalidPrefix(PathBuf),
}

pub type Result<T> = std::result::Result<T, SelectionError>;

impl SelectionError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// A `name.ltlf` file and its `name.part` partner
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct SpecFile {
    pub name: String,
    pub formula_path: PathBuf,
    pub roles_path: PathBuf,
}

impl SpecFile {
    /// The pair `dir/name.ltlf`, `dir/name.part`, whether it exists or not
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            formula_path: dir.join(format!("{name}.{FORMULA_EXTENSION}")),
            roles_path: dir.join(format!("{name}.{ROLES_EXTENSION}")),
        }
    }

    /// Returns `true` if both files exist
    #[must_use]
    pub fn exists(&self) -> bool {
        self.formula_path.is_file() && self.roles_path.is_file()
    }

    pub fn load(&self) -> Result<Specification> {
        trace!("loading {}", self.name);
        let formula = fs::read_to_string(&self.formula_path)
            .map_err(SelectionError::io(&self.formula_path))?;
        let roles =
            fs::read_to_string(&self.roles_path).map_err(SelectionError::io(&self.roles_path))?;
        Specification::load(&formula, &roles).map_err(|source| SelectionError::Spec {
            name: self.name.clone(),
            source,
        })
    }

    /// Deletes both files
    pub fn remove(&self) -> Result<()> {
        for path in [&self.formula_path, &self.roles_path] {
            if path.exists() {
                fs::remove_file(path).map_err(SelectionError::io(path))?;
            }
        }
        Ok(())
    }

    pub fn sort_key(&self) -> NaturalOrd<&str> {
        NaturalOrd(self.name.as_str())
    }
}

/// Every `.ltlf` file of `dir`, with or without its `.part`, sorted by name
fn formula_files(dir: &Path) -> Result<Vec<SpecFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(SelectionError::io(dir))? {
        let path = entry.map_err(SelectionError::io(dir))?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(FORMULA_EXTENSION) {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(name) => files.push(SpecFile::new(dir, name)),
            None => warn!("skipping non-unicode file name {}", path.display()),
        }
    }
    files.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok(files)
}

/// All the complete pairs in `dir`, sorted by name (`2` before `10`)
pub fn discover(dir: &Path) -> Result<Vec<SpecFile>> {
    let files = formula_files(dir)?
        .into_iter()
        .filter(|file| {
            let complete = file.roles_path.is_file();
            if !complete {
                warn!(
                    "{} has no .{ROLES_EXTENSION} file, skipped",
                    file.formula_path.display()
                )
            }
            complete
        })
        .collect_vec();
    debug!("found {} pairs in {}", files.len(), dir.display());
    Ok(files)
}

/// Which pairs to merge
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Selection {
    All,
    /// `count` pairs drawn at random, reproducibly if `seed` is set
    Random {
        count: usize,
        seed: Option<u64>,
    },
    /// the pairs with these names, in this order
    Named(Vec<String>),
}

/// Picks the pairs described by `selection` among `files`
pub fn select(files: &[SpecFile], selection: &Selection) -> Result<Vec<SpecFile>> {
    match selection {
        Selection::All => Ok(files.to_vec()),
        Selection::Random { count, seed } => {
            if *count > files.len() {
                return Err(SelectionError::NotEnoughPairs {
                    requested: *count,
                    available: files.len(),
                });
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            let chosen = files.choose_multiple(&mut rng, *count).cloned().collect_vec();
            debug!(
                "randomly selected {}",
                chosen.iter().map(|f| f.name.as_str()).join(", ")
            );
            Ok(chosen)
        }
        Selection::Named(names) => names
            .iter()
            .map(|name| {
                files
                    .iter()
                    .find(|f| &f.name == name)
                    .cloned()
                    .ok_or_else(|| SelectionError::UnknownPair(name.clone()))
            })
            .collect(),
    }
}

/// Loads every pair of `files`
pub fn load_all(files: &[SpecFile]) -> Result<Vec<Specification>> {
    files.iter().map(SpecFile::load).collect()
}

/// Writes `spec` to `prefix.ltlf` and `prefix.part`
///
/// Missing parent directories are created.
///
/// ## error
/// - [SelectionError::InvalidPrefix] if `prefix` doesn't end with a file name
pub fn write_pair(prefix: &Path, spec: &Specification) -> Result<SpecFile> {
    let name = match prefix.file_name().map(|n| n.to_string_lossy()) {
        Some(name) if !name.is_empty() => name.into_owned(),
        _ => return Err(SelectionError::InvalidPrefix(prefix.to_path_buf())),
    };
    let dir = prefix.parent().unwrap_or(Path::new("")).to_path_buf();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir).map_err(SelectionError::io(&dir))?;
    }
    let file = SpecFile::new(&dir, &name);
    let (formula, roles) = spec.serialize();
    fs::write(&file.formula_path, formula).map_err(SelectionError::io(&file.formula_path))?;
    fs::write(&file.roles_path, roles).map_err(SelectionError::io(&file.roles_path))?;
    debug!("wrote {}", prefix.display());
    Ok(file)
}

/// Finds the `.ltlf` files of `dir` with the same formula
///
/// Only the formulas are read, `.part` files may be missing or malformed.
/// Unreadable formulas are skipped with a warning. In each group, the file
/// with the smallest name is kept.
pub fn duplicates_in(dir: &Path) -> Result<Vec<DuplicateGroup<SpecFile>>> {
    let entries = formula_files(dir)?
        .into_iter()
        .filter_map(|file| match fs::read_to_string(&file.formula_path) {
            Ok(formula) => Some((OrderedSpecFile(file), formula)),
            Err(e) => {
                warn!("couldn't read {}, skipped: {e}", file.formula_path.display());
                None
            }
        })
        .collect_vec();
    Ok(
        find_duplicates(entries.iter().map(|(file, formula)| (file, formula.as_str())))
            .into_iter()
            .map(|DuplicateGroup { kept, removed }| DuplicateGroup {
                kept: kept.0,
                removed: removed.into_iter().map(|f| f.0).collect(),
            })
            .collect(),
    )
}

/// Copies `dir` into `backup` unless `backup` already exists
///
/// Returns `false` if nothing was copied.
pub fn backup_dir(dir: &Path, backup: &Path) -> Result<bool> {
    if backup.exists() {
        debug!("{} already exists, no backup made", backup.display());
        return Ok(false);
    }
    fs::create_dir_all(backup).map_err(SelectionError::io(backup))?;
    for entry in fs::read_dir(dir).map_err(SelectionError::io(dir))? {
        let path = entry.map_err(SelectionError::io(dir))?.path();
        if let (true, Some(name)) = (path.is_file(), path.file_name()) {
            let to = backup.join(name);
            fs::copy(&path, &to).map_err(SelectionError::io(&to))?;
        }
    }
    Ok(true)
}

/// [SpecFile] ordered by name
#[derive(Debug, PartialEq, Eq, Clone)]
struct OrderedSpecFile(SpecFile);

impl PartialOrd for OrderedSpecFile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedSpecFile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .sort_key()
            .cmp(&other.0.sort_key())
            .then_with(|| self.0.formula_path.cmp(&other.0.formula_path))
    }
}
