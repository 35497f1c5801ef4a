//! Tag classification and tree-walk settings.

use serde::{Deserialize, Serialize};
use tagscan_core::{InvalidNodePolicy, TagPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GrammarConfig {
    /// Which element names count as tags (`allow_listed` or `unrestricted`).
    #[serde(default)]
    pub tag_policy: TagPolicy,

    /// What happens below a node that fails classification
    /// (`prune` or `transparent`).
    #[serde(default)]
    pub invalid_nodes: InvalidNodePolicy,
}
