//! Parallel work distribution.
//!
//! Each document is one task on a bounded rayon pool: read bytes, parse,
//! summarize. The html5ever tree is `!Send`, so parse and summarize stay on
//! the same worker; only the owned [`PageSummary`] travels back over a
//! channel. [`Outcomes`] hands results to the caller in completion order and
//! tops the pool back up lazily, so at most `queue_depth` documents are in
//! flight at once.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

use tagscan_core::PageSummary;
use tagscan_parser::{SummarizeOptions, summarize_html};

use crate::corpus::Corpus;
use crate::error::PipelineError;

/// Shared flag asking a run to stop starting new documents.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    Summarized { path: PathBuf, summary: PageSummary },
    Failed { error: PipelineError },
    /// Dequeued after cancellation; never read.
    Cancelled { path: PathBuf },
}

impl DocumentOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Summarized { path, .. } | Self::Cancelled { path } => Some(path.as_path()),
            Self::Failed {
                error:
                    PipelineError::Io { path, .. }
                    | PipelineError::Parse { path, .. }
                    | PipelineError::WorkerPanic { path, .. },
            } => Some(path.as_path()),
            Self::Failed { .. } => None,
        }
    }
}

/// Pool sizing and per-document walk settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributorOptions {
    pub threads: usize,
    pub stack_size: usize,
    /// Documents in flight per worker thread.
    pub queue_factor: usize,
    pub summarize: SummarizeOptions,
}

impl Default for DistributorOptions {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            stack_size: 8 * 1024 * 1024,
            queue_factor: 4,
            summarize: SummarizeOptions::default(),
        }
    }
}

/// Per-document work run on a worker.
type Work = fn(&Path, SummarizeOptions) -> Result<PageSummary, PipelineError>;

/// A worker pool that turns document paths into summaries.
pub struct Distributor {
    pool: rayon::ThreadPool,
    queue_depth: usize,
    summarize: SummarizeOptions,
    work: Work,
}

impl std::fmt::Debug for Distributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Distributor")
            .field("threads", &self.pool.current_num_threads())
            .field("queue_depth", &self.queue_depth)
            .field("summarize", &self.summarize)
            .finish()
    }
}

impl Distributor {
    /// Build the worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Pool`] if the threads cannot be spawned.
    pub fn new(options: DistributorOptions) -> Result<Self, PipelineError> {
        let threads = options.threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .stack_size(options.stack_size)
            .thread_name(|index| format!("tagscan-worker-{index}"))
            .build()?;

        tracing::debug!(threads, stack_size = options.stack_size, "worker pool ready");

        Ok(Self {
            pool,
            queue_depth: threads * options.queue_factor.max(1),
            summarize: options.summarize,
            work: summarize_file,
        })
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Process `corpus`, yielding one outcome per document as each finishes.
    ///
    /// Once `cancel` is set no further document is submitted; documents
    /// already submitted either finish or report [`DocumentOutcome::Cancelled`].
    pub fn outcomes(&self, corpus: Corpus, cancel: CancelFlag) -> Outcomes<'_> {
        let (tx, rx) = channel();
        Outcomes {
            distributor: self,
            corpus,
            cancel,
            tx: Some(tx),
            rx,
            in_flight: 0,
        }
    }

    fn submit(&self, path: PathBuf, tx: Sender<DocumentOutcome>, cancel: CancelFlag) {
        let options = self.summarize;
        let work = self.work;
        self.pool.spawn(move || {
            let outcome = if cancel.is_cancelled() {
                DocumentOutcome::Cancelled { path }
            } else {
                process_document(path, options, work)
            };
            // The receiver only goes away when the caller stops iterating.
            let _ = tx.send(outcome);
        });
    }
}

/// Completion-ordered results of [`Distributor::outcomes`].
pub struct Outcomes<'a> {
    distributor: &'a Distributor,
    corpus: Corpus,
    cancel: CancelFlag,
    tx: Option<Sender<DocumentOutcome>>,
    rx: Receiver<DocumentOutcome>,
    in_flight: usize,
}

impl Outcomes<'_> {
    /// Submit documents until the queue is full. Corpus entries that failed
    /// before reaching a worker are returned directly.
    fn fill(&mut self) -> Option<DocumentOutcome> {
        while self.in_flight < self.distributor.queue_depth {
            let Some(tx) = self.tx.as_ref() else {
                return None;
            };
            if self.cancel.is_cancelled() {
                self.tx = None;
                return None;
            }
            match self.corpus.next() {
                Some(Ok(path)) => {
                    self.distributor.submit(path, tx.clone(), self.cancel.clone());
                    self.in_flight += 1;
                }
                Some(Err(error)) => return Some(DocumentOutcome::Failed { error }),
                None => {
                    self.tx = None;
                    return None;
                }
            }
        }
        None
    }
}

impl Iterator for Outcomes<'_> {
    type Item = DocumentOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(outcome) = self.fill() {
            return Some(outcome);
        }
        if self.in_flight == 0 {
            return None;
        }
        match self.rx.recv() {
            Ok(outcome) => {
                self.in_flight -= 1;
                Some(outcome)
            }
            Err(_) => {
                tracing::error!(
                    in_flight = self.in_flight,
                    "worker channel closed with documents outstanding"
                );
                self.in_flight = 0;
                None
            }
        }
    }
}

/// Run `work` for one document, containing any panic.
fn process_document(path: PathBuf, options: SummarizeOptions, work: Work) -> DocumentOutcome {
    let result = catch_unwind(AssertUnwindSafe(|| work(&path, options)));
    match result {
        Ok(Ok(summary)) => {
            tracing::debug!(path = %path.display(), pairs = summary.pair_count(), "loaded");
            DocumentOutcome::Summarized { path, summary }
        }
        Ok(Err(error)) => DocumentOutcome::Failed { error },
        Err(panic) => DocumentOutcome::Failed {
            error: PipelineError::WorkerPanic {
                path,
                message: panic_message(panic.as_ref()),
            },
        },
    }
}

/// Read and summarize one file on the current thread.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] or [`PipelineError::Parse`] for this file.
pub fn summarize_file(
    path: &Path,
    options: SummarizeOptions,
) -> Result<PageSummary, PipelineError> {
    let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    summarize_html(&bytes, options).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
