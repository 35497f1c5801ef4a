//! Policy switches for classification, tree walking, and collation.
//!
//! All enums use `snake_case` serialization. `FromStr` additionally accepts
//! the kebab-case spelling used on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

// ---------------------------------------------------------------------------
// TagPolicy
// ---------------------------------------------------------------------------

/// Which element names the tag classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Only names from the fixed list of standard HTML elements.
    #[default]
    AllowListed,
    /// Any plain ASCII name.
    Unrestricted,
}

impl TagPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowListed => "allow_listed",
            Self::Unrestricted => "unrestricted",
        }
    }
}

impl fmt::Display for TagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "allow_listed" | "allowlisted" | "strict" => Ok(Self::AllowListed),
            "unrestricted" | "any" => Ok(Self::Unrestricted),
            other => Err(CoreError::Validation(format!("unknown tag policy '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// InvalidNodePolicy
// ---------------------------------------------------------------------------

/// What the summarizer does with the subtree of a node that fails
/// classification.
///
/// ```text
/// prune        invalid node and everything below it is skipped
/// transparent  invalid node is skipped, its valid descendants are walked
///              as fresh roots
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidNodePolicy {
    #[default]
    Prune,
    Transparent,
}

impl InvalidNodePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prune => "prune",
            Self::Transparent => "transparent",
        }
    }
}

impl fmt::Display for InvalidNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvalidNodePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "prune" => Ok(Self::Prune),
            "transparent" | "descend" => Ok(Self::Transparent),
            other => Err(CoreError::Validation(format!(
                "unknown invalid-node policy '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// CollationPolicy
// ---------------------------------------------------------------------------

/// How per-document summaries are merged into the overall summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollationPolicy {
    /// Sum raw counts. Order-independent and streamable.
    #[default]
    Additive,
    /// Mean per-document count. Needs the document count up front.
    Average,
}

impl CollationPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Additive => "additive",
            Self::Average => "average",
        }
    }

    /// Whether this policy can only run when the number of documents is
    /// known before collation starts.
    #[must_use]
    pub const fn requires_known_count(self) -> bool {
        matches!(self, Self::Average)
    }
}

impl fmt::Display for CollationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "additive" | "sum" => Ok(Self::Additive),
            "average" | "mean" | "normalized" => Ok(Self::Average),
            other => Err(CoreError::Validation(format!(
                "unknown collation policy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("allow_listed", TagPolicy::AllowListed)]
    #[case("allow-listed", TagPolicy::AllowListed)]
    #[case("Unrestricted", TagPolicy::Unrestricted)]
    fn tag_policy_parses(#[case] raw: &str, #[case] expected: TagPolicy) {
        assert_eq!(raw.parse::<TagPolicy>().unwrap(), expected);
    }

    #[test]
    fn defaults_match_strict_source_behaviour() {
        assert_eq!(TagPolicy::default(), TagPolicy::AllowListed);
        assert_eq!(InvalidNodePolicy::default(), InvalidNodePolicy::Prune);
        assert_eq!(CollationPolicy::default(), CollationPolicy::Additive);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&TagPolicy::AllowListed).unwrap();
        assert_eq!(json, "\"allow_listed\"");
        let back: CollationPolicy = serde_json::from_str("\"average\"").unwrap();
        assert_eq!(back, CollationPolicy::Average);
    }

    #[test]
    fn only_average_needs_a_known_count() {
        assert!(CollationPolicy::Average.requires_known_count());
        assert!(!CollationPolicy::Additive.requires_known_count());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!("sometimes".parse::<InvalidNodePolicy>().is_err());
        assert!("median".parse::<CollationPolicy>().is_err());
    }
}
