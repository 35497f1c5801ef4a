use std::path::PathBuf;

use anyhow::Context;
use tagscan_config::TagscanConfig;
use tagscan_parser::SummarizeOptions;
use tagscan_pipeline::{
    CancelFlag, Corpus, DistributorOptions, Input, Pipeline, ScanOutput, WalkOptions,
};

use crate::bootstrap;
use crate::cli::{GlobalFlags, ScanArgs};
use crate::output::{emit, render_summary};
use crate::progress::Progress;

/// Handle `tagscan scan`.
pub async fn handle(
    args: &ScanArgs,
    config: TagscanConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = bootstrap::apply_scan_overrides(config, args)?;
    let format = flags.resolve_format(config.output.format);

    let inputs: Vec<Input> = args.inputs.iter().map(|arg| Input::from_arg(arg)).collect();
    let mut corpus = Corpus::discover(&inputs, &walk_options(&config))
        .context("failed to resolve scan inputs")?;
    if let Some(limit) = args.limit {
        corpus = corpus.limit(limit);
    }

    let pipeline = Pipeline::new(distributor_options(&config), config.collation.policy)
        .context("failed to start worker pool")?;

    let progress = Progress::for_corpus(corpus.len());
    let output = run_until_interrupted(pipeline, corpus, progress.clone()).await;
    let output = match output {
        Ok(output) => {
            progress.finish_clear();
            output
        }
        Err(error) => {
            progress.finish_err("scan failed");
            return Err(error);
        }
    };

    let report = &output.report;
    if report.skipped() > 0 || report.cancelled {
        tracing::warn!("{}", report.summary_line());
    }

    let rendered = render_summary(&output.summary, Some(report), format)?;
    let path = config.output.path.as_ref().map(PathBuf::from);
    emit(&rendered, path.as_deref())
}

/// Run the pipeline on the blocking pool; Ctrl-C stops new documents from
/// starting and the partial result is returned.
async fn run_until_interrupted(
    pipeline: Pipeline,
    corpus: Corpus,
    progress: Progress,
) -> anyhow::Result<ScanOutput> {
    let cancel = CancelFlag::new();
    let mut worker = tokio::task::spawn_blocking({
        let cancel = cancel.clone();
        move || pipeline.run(corpus, &cancel, |outcome| progress.observe(outcome))
    });

    let joined = tokio::select! {
        joined = &mut worker => joined,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    tracing::warn!("interrupted; finishing documents already in flight");
                    cancel.cancel();
                }
                Err(error) => tracing::warn!(%error, "failed to listen for Ctrl-C"),
            }
            worker.await
        }
    };

    let result = joined.context("scan worker failed")?;
    result.context("scan failed")
}

fn walk_options(config: &TagscanConfig) -> WalkOptions {
    WalkOptions {
        include: config.corpus.include.clone(),
        max_depth: config.corpus.max_depth,
        hidden: config.corpus.hidden,
        follow_links: config.corpus.follow_links,
    }
}

fn distributor_options(config: &TagscanConfig) -> DistributorOptions {
    DistributorOptions {
        threads: config.workers.effective_threads(),
        stack_size: config.workers.stack_size_bytes(),
        queue_factor: config.workers.queue_factor,
        summarize: SummarizeOptions::new(config.grammar.tag_policy, config.grammar.invalid_nodes),
    }
}
