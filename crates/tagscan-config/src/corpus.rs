//! Corpus discovery settings.

use serde::{Deserialize, Serialize};

fn default_include() -> Vec<String> {
    vec!["*.html".to_string(), "*.htm".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Glob patterns a file name must match to be loaded from a directory.
    /// Explicitly listed files are never filtered.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Maximum directory depth below the corpus root. Unlimited when unset.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Whether hidden files and directories are scanned.
    #[serde(default)]
    pub hidden: bool,

    /// Whether symbolic links are followed.
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            max_depth: None,
            hidden: false,
            follow_links: false,
        }
    }
}
