use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::{
    merge::{MergeOptions, AND},
    selection::{
        ledger::{Layout, DEFAULT_STATUS},
        Selection,
    },
    symbol::SymbolNamer,
};

#[derive(Parser, Debug)]
#[command(name = "ltlf-merge", author, version, about, long_about = None)]
pub struct Args {
    /// how to report the outcome
    #[arg(long, value_enum, default_value_t = Output::Stdout, global = true)]
    pub output_format: Output,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge several .ltlf/.part pairs into a single pair
    Merge(MergeArgs),
    /// Delete the pairs whose formula already appears in another pair
    Dedupe(DedupeArgs),
    /// Copy the pairs listed in a results ledger
    Filter(FilterArgs),
    /// Print a completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// number of pairs to merge, picked at random
    #[arg(long, default_value_t = 2)]
    pub n: usize,

    /// merge these pairs (file names without extension) instead of random ones
    #[arg(long, num_args = 1.., conflicts_with = "n")]
    pub names: Vec<String>,

    /// seed of the random selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// directory containing the .ltlf/.part pairs
    #[arg(long, value_name = "DIR", default_value = "syft_1_filtered")]
    pub filtered_dir: PathBuf,

    /// the result goes to PREFIX.ltlf and PREFIX.part
    #[arg(long, value_name = "PREFIX", default_value = "merged")]
    pub output_prefix: PathBuf,

    /// prefix of the symbols of the merged pair
    #[arg(long, default_value = SymbolNamer::DEFAULT_PREFIX)]
    pub symbol_prefix: String,

    /// conjunction used between the merged formulas
    #[arg(long, default_value = AND)]
    pub connective: String,
}

#[derive(clap::Args, Debug)]
pub struct DedupeArgs {
    /// directory containing the .ltlf/.part pairs
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// only report the duplicates
    #[arg(long)]
    pub dry_run: bool,

    /// copy DIR there first (skipped if it already exists)
    #[arg(long, value_name = "DIR")]
    pub backup: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// the CSV results ledger
    #[arg(long, value_name = "FILE")]
    pub ledger: PathBuf,

    /// where the pairs are
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// where to copy them
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    #[arg(long, value_enum, default_value_t = LayoutKind::Flat)]
    pub layout: LayoutKind,

    /// status to keep (grouped layout)
    #[arg(long, default_value = DEFAULT_STATUS)]
    pub status: String,

    /// number of digits of the pair names (flat layout)
    #[arg(long, default_value_t = 3)]
    pub pad: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LayoutKind {
    /// `NNN.ltlf` files, the number is the second column of the ledger
    Flat,
    /// `tree_size_K/fN.ltlf` files, rows are `tK, fN, status`
    Grouped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum Output {
    Quiet,
    #[default]
    Stdout,
    Json,
    PrettyJson,
}

impl MergeArgs {
    pub fn selection(&self) -> Selection {
        if self.names.is_empty() {
            Selection::Random {
                count: self.n,
                seed: self.seed,
            }
        } else {
            Selection::Named(self.names.clone())
        }
    }
}

impl From<&MergeArgs> for MergeOptions {
    fn from(args: &MergeArgs) -> Self {
        MergeOptions {
            namer: SymbolNamer::new(args.symbol_prefix.as_str()),
            connective: args.connective.clone(),
        }
    }
}

impl FilterArgs {
    pub fn layout(&self) -> Layout {
        match self.layout {
            LayoutKind::Flat => Layout::Flat { width: self.pad },
            LayoutKind::Grouped => Layout::Grouped {
                status: self.status.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify() {
        Args::command().debug_assert()
    }

    #[test]
    fn merge_defaults() {
        let args = Args::parse_from(["ltlf-merge", "merge"]);
        let Command::Merge(m) = &args.command else {
            panic!("not a merge")
        };
        assert_eq!(m.selection(), Selection::Random { count: 2, seed: None });
        assert_eq!(MergeOptions::from(m), MergeOptions::default());
        assert_eq!(m.filtered_dir, PathBuf::from("syft_1_filtered"));
        assert_eq!(args.output_format, Output::Stdout);
    }

    #[test]
    fn merge_named() {
        let args = Args::parse_from([
            "ltlf-merge",
            "merge",
            "--names",
            "001",
            "017",
            "--symbol-prefix",
            "x",
            "--output-format",
            "json",
        ]);
        let Command::Merge(m) = &args.command else {
            panic!("not a merge")
        };
        assert_eq!(
            m.selection(),
            Selection::Named(vec!["001".into(), "017".into()])
        );
        assert_eq!(MergeOptions::from(m).namer.prefix(), "x");
        assert_eq!(args.output_format, Output::Json);
    }

    #[test]
    fn filter_layout() {
        let args = Args::parse_from([
            "ltlf-merge",
            "filter",
            "--ledger",
            "ok.csv",
            "--source",
            "Ascending",
            "--dest",
            "out",
            "--layout",
            "grouped",
        ]);
        let Command::Filter(f) = &args.command else {
            panic!("not a filter")
        };
        assert_eq!(
            f.layout(),
            Layout::Grouped {
                status: "Realizable".into()
            }
        );
    }
}
