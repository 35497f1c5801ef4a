//! Output settings.

use serde::{Deserialize, Serialize};

/// Rendering of the collated summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Compact single-line JSON.
    Raw,
    /// Aligned `parent child count` rows.
    Table,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Write the summary to this file instead of stdout.
    #[serde(default)]
    pub path: Option<String>,
}
