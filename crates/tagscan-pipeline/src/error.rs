//! Pipeline error types.
//!
//! Per-document variants (`Io`, `Parse`, `WorkerPanic`, `Walk`) drop one
//! document and the run continues. The rest are raised before any work
//! starts.

use std::path::PathBuf;

use tagscan_core::CoreError;
use tagscan_parser::ParserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    #[error("Worker panicked on {}: {message}", .path.display())]
    WorkerPanic { path: PathBuf, message: String },

    #[error("Directory walk failed: {0}")]
    Walk(String),

    #[error("Input path does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Invalid include glob: {0}")]
    Glob(#[from] ignore::Error),

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PipelineError {
    /// Whether this error only drops a single document.
    #[must_use]
    pub const fn is_per_document(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Parse { .. } | Self::WorkerPanic { .. } | Self::Walk(_)
        )
    }
}
