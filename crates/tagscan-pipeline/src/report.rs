//! Run report: what happened to every document of a run.

use serde::Serialize;

use crate::distribute::DocumentOutcome;

/// One dropped document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Path of the document, when the failure happened after discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub error: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub documents_seen: usize,
    pub summarized: usize,
    pub failed: usize,
    /// Documents dequeued after cancellation and never read.
    pub cancelled_documents: usize,
    /// Whether the run was stopped early; the summary covers only part of
    /// the corpus.
    pub cancelled: bool,
    pub failures: Vec<Failure>,
}

impl RunReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome, logging the dropped ones.
    pub fn record(&mut self, outcome: &DocumentOutcome) {
        self.documents_seen += 1;
        match outcome {
            DocumentOutcome::Summarized { .. } => self.summarized += 1,
            DocumentOutcome::Failed { error } => {
                let path = outcome.path().map(|p| p.display().to_string());
                tracing::warn!(path = path.as_deref().unwrap_or("-"), %error, "document skipped");
                self.failed += 1;
                self.failures.push(Failure {
                    path,
                    error: error.to_string(),
                });
            }
            DocumentOutcome::Cancelled { .. } => self.cancelled_documents += 1,
        }
    }

    /// Documents seen but not summarized.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.failed + self.cancelled_documents
    }

    #[must_use]
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} of {} documents skipped",
            self.skipped(),
            self.documents_seen
        );
        if self.cancelled {
            line.push_str(" (cancelled)");
        }
        line
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary_line())
    }
}
