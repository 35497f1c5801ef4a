//! Collation settings.

use serde::{Deserialize, Serialize};
use tagscan_core::CollationPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollationConfig {
    /// `additive` (raw totals) or `average` (mean per document).
    #[serde(default)]
    pub policy: CollationPolicy,
}
