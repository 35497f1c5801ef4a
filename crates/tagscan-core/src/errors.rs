//! Cross-cutting error types for tagscan.
//!
//! Domain-specific errors (`ParserError`, `PipelineError`, `ConfigError`) live
//! in their own crates. They converge in `tagscan-cli` behind `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any tagscan crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A run was configured in a way that cannot be executed.
    ///
    /// Always reported before any document is processed.
    #[error("Configuration error: {setting}: {reason}")]
    Configuration { setting: String, reason: String },

    /// Data failed validation (tag names, summary invariants).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn configuration(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            setting: setting.into(),
            reason: reason.into(),
        }
    }
}
