use std::{fmt::Display, path::PathBuf};

use itertools::Itertools;
use serde::Serialize;

use crate::symbol::Symbol;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[non_exhaustive]
pub enum Return {
    Merged {
        /// names of the merged pairs, in merge order
        sources: Vec<String>,
        formula_file: PathBuf,
        roles_file: PathBuf,
        inputs: Vec<Symbol>,
        outputs: Vec<Symbol>,
    },
    Deduplicated {
        kept: Vec<String>,
        removed: Vec<String>,
        dry_run: bool,
    },
    Filtered {
        copied: usize,
        dest: PathBuf,
    },
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Return::Merged {
                sources,
                formula_file,
                roles_file,
                inputs,
                outputs,
            } => {
                write!(
                    f,
                    "merged {} into \"{}\" and \"{}\"",
                    sources.iter().join(", "),
                    formula_file.display(),
                    roles_file.display()
                )?;
                write!(f, "\n\t- inputs: {}", inputs.iter().join(" "))?;
                write!(f, "\n\t- outputs: {}", outputs.iter().join(" "))
            }
            Return::Deduplicated {
                removed,
                dry_run: true,
                ..
            } if !removed.is_empty() => {
                write!(f, "would remove {}", removed.iter().join(", "))
            }
            Return::Deduplicated { removed, kept, .. } => {
                if removed.is_empty() {
                    write!(f, "no duplicate found")
                } else {
                    write!(
                        f,
                        "removed {} (kept {})",
                        removed.iter().join(", "),
                        kept.iter().join(", ")
                    )
                }
            }
            Return::Filtered { copied, dest } => {
                write!(f, "copied {copied} pairs to \"{}\"", dest.display())
            }
        }
    }
}
