pub mod cli;
pub mod dedupe;
pub mod error;
pub mod merge;
pub mod renamer;
pub mod rewriter;
pub mod selection;
pub mod spec;
pub mod symbol;

pub use error::{FormatError, MergeError};
pub use merge::{merge, merge_with, MergeOptions};
pub use renamer::RenameMapping;
pub use spec::Specification;
pub use symbol::{Role, Symbol, SymbolNamer};

pub use return_value::Return;
mod return_value;

#[cfg(test)]
mod tests;

use std::{fs, io::Write};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    cli::{Args, Command, DedupeArgs, FilterArgs, MergeArgs},
    selection::{ledger, SpecFile},
};

/// Runs the subcommand of `args`
///
/// `completions` is taken care of by the binary, running it here fails.
pub fn run(args: &Args) -> anyhow::Result<Return> {
    match &args.command {
        Command::Merge(args) => run_merge(args),
        Command::Dedupe(args) => run_dedupe(args),
        Command::Filter(args) => run_filter(args),
        Command::Completions { .. } => anyhow::bail!("completions are printed by the binary"),
    }
}

pub fn run_merge(args: &MergeArgs) -> anyhow::Result<Return> {
    trace!("running merge");
    let files = selection::discover(&args.filtered_dir)
        .with_context(|| format!("looking for pairs in \"{}\"", args.filtered_dir.display()))?;
    let chosen = selection::select(&files, &args.selection())?;
    let specs = selection::load_all(&chosen)?;

    let merged = merge_with(&specs, &args.into())?;
    let SpecFile {
        formula_path,
        roles_path,
        ..
    } = selection::write_pair(&args.output_prefix, &merged)?;

    Ok(Return::Merged {
        sources: chosen.into_iter().map(|f| f.name).collect(),
        formula_file: formula_path,
        roles_file: roles_path,
        inputs: merged.inputs().to_vec(),
        outputs: merged.outputs().to_vec(),
    })
}

pub fn run_dedupe(args: &DedupeArgs) -> anyhow::Result<Return> {
    trace!("running dedupe");
    let groups = selection::duplicates_in(&args.dir)
        .with_context(|| format!("looking for duplicates in \"{}\"", args.dir.display()))?;

    if let (Some(backup), false) = (&args.backup, args.dry_run) {
        if selection::backup_dir(&args.dir, backup)? {
            debug!("backed up {} to {}", args.dir.display(), backup.display())
        }
    }

    for group in &groups {
        debug!(
            "keeping {}, duplicates: {}",
            group.kept.name,
            group.removed.iter().map(|f| &f.name).join(", ")
        );
        if !args.dry_run {
            group.removed.iter().try_for_each(SpecFile::remove)?;
        }
    }

    Ok(Return::Deduplicated {
        kept: groups.iter().map(|g| g.kept.name.clone()).collect(),
        removed: groups
            .iter()
            .flat_map(|g| &g.removed)
            .map(|f| f.name.clone())
            .collect(),
        dry_run: args.dry_run,
    })
}

pub fn run_filter(args: &FilterArgs) -> anyhow::Result<Return> {
    trace!("running filter");
    let content = fs::read_to_string(&args.ledger)
        .with_context(|| format!("reading the ledger \"{}\"", args.ledger.display()))?;
    let copied = ledger::filter(&content, &args.source, &args.dest, &args.layout())?;
    Ok(Return::Filtered {
        copied,
        dest: args.dest.clone(),
    })
}

pub fn init_logger() {
    env_logger::Builder::new()
        .format(|buf, record| {
            let str = record.args().to_string().replace('\n', "\n\t");
            writeln!(
                buf,
                "[{}] in {}:{}\n\t{}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                str
            )
        })
        .parse_default_env()
        .init();
}

utils::asssert_trait!(sync_send_spec; Specification; Sync, Send);
utils::asssert_trait!(sync_send_mapping; RenameMapping; Sync, Send);
utils::asssert_trait!(sync_send_options; MergeOptions; Sync, Send);
