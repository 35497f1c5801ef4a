use std::path::PathBuf;

use clap::{Args, Subcommand};
use tagscan_core::{CollationPolicy, InvalidNodePolicy, TagPolicy};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Summarize a corpus of HTML documents.
    Scan(ScanArgs),
    /// Additively collate summaries saved by earlier scans.
    Merge(MergeArgs),
    /// Print the effective configuration.
    Config,
}

/// Arguments for `tagscan scan`.
#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// Directories, files, or `-` to read newline-separated paths from stdin.
    #[arg(default_value = ".")]
    pub inputs: Vec<String>,

    /// Which tag names count: allow-listed or unrestricted.
    #[arg(long)]
    pub policy: Option<TagPolicy>,

    /// What happens below an invalid node: prune or transparent.
    #[arg(long)]
    pub invalid_nodes: Option<InvalidNodePolicy>,

    /// How page summaries combine: additive or average.
    #[arg(long)]
    pub collation: Option<CollationPolicy>,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write the summary to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process at most this many documents.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for `tagscan merge`.
#[derive(Clone, Debug, Args)]
pub struct MergeArgs {
    /// JSON totals written by `tagscan scan --collation additive`.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Write the merged summary to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
