use std::path::{Path, PathBuf};

use anyhow::Context;
use tagscan_config::TagscanConfig;
use tagscan_core::{OverallSummary, PageSummary};
use tagscan_pipeline::collate_additive;

use crate::cli::{GlobalFlags, MergeArgs};
use crate::output::{emit, render_summary};

/// Handle `tagscan merge`.
pub fn handle(args: &MergeArgs, config: &TagscanConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let merged = merge_files(&args.files)?;
    let format = flags.resolve_format(config.output.format);

    let rendered = render_summary(&OverallSummary::Totals(merged), None, format)?;
    let path = args
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));
    emit(&rendered, path.as_deref())
}

/// Read saved additive totals and sum them.
pub fn merge_files(files: &[PathBuf]) -> anyhow::Result<PageSummary> {
    let summaries = files
        .iter()
        .map(|path| read_totals(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(files = summaries.len(), "merging saved totals");
    Ok(collate_additive(&summaries))
}

fn read_totals(path: &Path) -> anyhow::Result<PageSummary> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "{} is not a saved additive summary (averaged output cannot be merged)",
            path.display()
        )
    })
}
