//! # tagscan-pipeline
//!
//! Runs the tag grammar over a corpus:
//!
//! 1. **Discover**: [`Corpus`] resolves directories, files and stdin path
//!    lists into a lazy document sequence
//! 2. **Distribute**: [`Distributor`] reads, parses and summarizes documents
//!    on a bounded rayon pool, yielding outcomes in completion order
//! 3. **Collate**: a [`Collator`] folds the per-document summaries into one
//!    [`OverallSummary`](tagscan_core::OverallSummary)
//!
//! [`Pipeline::run`] wires the three together and keeps a [`RunReport`].

pub mod collate;
pub mod corpus;
pub mod distribute;
pub mod error;
pub mod report;

pub use collate::{Collator, collate, collate_additive, collate_average};
pub use corpus::{Corpus, Input, WalkOptions};
pub use distribute::{
    CancelFlag, Distributor, DistributorOptions, DocumentOutcome, Outcomes, summarize_file,
};
pub use error::PipelineError;
pub use report::{Failure, RunReport};

use serde::Serialize;
use tagscan_core::{CollationPolicy, OverallSummary};

/// The collated summary of a run and what happened along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutput {
    pub summary: OverallSummary,
    pub report: RunReport,
}

/// A configured scan: worker pool plus collation policy.
#[derive(Debug)]
pub struct Pipeline {
    distributor: Distributor,
    collation: CollationPolicy,
}

impl Pipeline {
    /// Build the worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Pool`] if the pool cannot be started.
    pub fn new(
        options: DistributorOptions,
        collation: CollationPolicy,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            distributor: Distributor::new(options)?,
            collation,
        })
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.distributor.threads()
    }

    /// Summarize and collate every document of `corpus`.
    ///
    /// `observe` sees each outcome as it arrives, before it is collated.
    /// Per-document failures are logged, counted in the report and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Core`] with a configuration error when the
    /// collation policy cannot be applied to `corpus` (average collation of
    /// a streamed corpus). This is checked before any document is read.
    pub fn run(
        &self,
        corpus: Corpus,
        cancel: &CancelFlag,
        mut observe: impl FnMut(&DocumentOutcome),
    ) -> Result<ScanOutput, PipelineError> {
        let mut collator = Collator::new(self.collation, corpus.len())?;
        let mut report = RunReport::new();

        tracing::info!(
            documents = ?corpus.len(),
            threads = self.threads(),
            collation = %self.collation,
            "scan started"
        );

        for outcome in self.distributor.outcomes(corpus, cancel.clone()) {
            observe(&outcome);
            report.record(&outcome);
            if let DocumentOutcome::Summarized { summary, .. } = outcome {
                collator.push(summary);
            }
        }

        report.cancelled = cancel.is_cancelled();
        if report.cancelled {
            tracing::warn!(
                summarized = report.summarized,
                "scan cancelled; summary is partial"
            );
        }

        let summary = collator.finish();
        tracing::info!(
            seen = report.documents_seen,
            summarized = report.summarized,
            failed = report.failed,
            pairs = summary.pair_count(),
            "scan finished"
        );

        Ok(ScanOutput { summary, report })
    }
}
