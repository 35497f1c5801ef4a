//! Nested `parent -> child -> count` maps.
//!
//! A [`Summary`] never stores a zero count. The only mutator, [`Summary::add`],
//! is an explicit increment-or-insert that ignores non-positive amounts, so
//! the invariant holds by construction. Deserialization re-checks it.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;
use crate::policy::CollationPolicy;
use crate::tag::{ChildKey, TagName};

/// A count type storable in a [`Summary`].
pub trait Count: Copy + PartialOrd + Default + AddAssign + Serialize + DeserializeOwned {
    /// Strictly greater than zero (NaN is not positive).
    fn is_positive(self) -> bool;

    fn as_f64(self) -> f64;
}

impl Count for u64 {
    fn is_positive(self) -> bool {
        self > 0
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Count for f64 {
    fn is_positive(self) -> bool {
        self > 0.0
    }

    fn as_f64(self) -> f64 {
        self
    }
}

type ChildCounts<C> = BTreeMap<ChildKey, C>;

/// Mapping from a parent tag to the counts of what it directly contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<C: Count> {
    counts: BTreeMap<TagName, ChildCounts<C>>,
}

/// Counts for one document.
pub type PageSummary = Summary<u64>;

impl<C: Count> Default for Summary<C> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<C: Count> Summary<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment-or-insert `amount` for the `(parent, child)` pair.
    ///
    /// Non-positive amounts are ignored.
    pub fn add(&mut self, parent: &TagName, child: ChildKey, amount: C) {
        if !amount.is_positive() {
            return;
        }
        if !self.counts.contains_key(parent) {
            self.counts.insert(parent.clone(), BTreeMap::new());
        }
        if let Some(children) = self.counts.get_mut(parent) {
            *children.entry(child).or_default() += amount;
        }
    }

    /// Add every pair of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (parent, child, count) in other.iter() {
            self.add(parent, child.clone(), count);
        }
    }

    /// Count stored for a pair, if any.
    #[must_use]
    pub fn get(&self, parent: &str, child: &ChildKey) -> Option<C> {
        self.counts.get(parent)?.get(child).copied()
    }

    /// Count stored for `(parent, child-tag)`, looked up by plain names.
    #[must_use]
    pub fn get_tag(&self, parent: &str, child: &str) -> Option<C> {
        let child = TagName::new(child).ok()?;
        self.get(parent, &ChildKey::Tag(child))
    }

    /// Count of text runs recorded directly under `parent`.
    #[must_use]
    pub fn get_text(&self, parent: &str) -> Option<C> {
        self.get(parent, &ChildKey::Text)
    }

    #[must_use]
    pub fn children(&self, parent: &str) -> Option<&BTreeMap<ChildKey, C>> {
        self.counts.get(parent)
    }

    pub fn parents(&self) -> impl Iterator<Item = &TagName> {
        self.counts.keys()
    }

    /// Every stored `(parent, child, count)` triple in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TagName, &ChildKey, C)> {
        self.counts.iter().flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |(child, count)| (parent, child, *count))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct parent tags.
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of distinct `(parent, child)` pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.counts.values().map(BTreeMap::len).sum()
    }

    /// A copy with every count multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Summary<f64> {
        let mut out = Summary::new();
        for (parent, child, count) in self.iter() {
            out.add(parent, child.clone(), count.as_f64() * factor);
        }
        out
    }

    fn from_raw(raw: BTreeMap<TagName, ChildCounts<C>>) -> Result<Self, CoreError> {
        for (parent, children) in &raw {
            if children.is_empty() {
                return Err(CoreError::Validation(format!(
                    "parent '{parent}' has no child counts"
                )));
            }
            if let Some((child, _)) = children.iter().find(|(_, count)| !count.is_positive()) {
                return Err(CoreError::Validation(format!(
                    "count for ('{parent}', '{child}') is not positive"
                )));
            }
        }
        Ok(Self { counts: raw })
    }
}

impl PageSummary {
    /// Add one occurrence of `(parent, child)`.
    pub fn increment(&mut self, parent: &TagName, child: ChildKey) {
        self.add(parent, child, 1);
    }

    /// Total number of recorded occurrences.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, _, count)| count).sum()
    }
}

impl<C: Count> Serialize for Summary<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'de, C: Count> Deserialize<'de> for Summary<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<TagName, ChildCounts<C>>::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// The collated result of a run.
///
/// Serializes as the bare nested map of whichever variant it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OverallSummary {
    /// Raw totals from additive collation.
    Totals(Summary<u64>),
    /// Mean per-document counts from average collation.
    Averages(Summary<f64>),
}

impl OverallSummary {
    /// An empty result shaped for `policy`.
    #[must_use]
    pub fn empty(policy: CollationPolicy) -> Self {
        match policy {
            CollationPolicy::Additive => Self::Totals(Summary::new()),
            CollationPolicy::Average => Self::Averages(Summary::new()),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> CollationPolicy {
        match self {
            Self::Totals(_) => CollationPolicy::Additive,
            Self::Averages(_) => CollationPolicy::Average,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Totals(summary) => summary.is_empty(),
            Self::Averages(summary) => summary.is_empty(),
        }
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        match self {
            Self::Totals(summary) => summary.pair_count(),
            Self::Averages(summary) => summary.pair_count(),
        }
    }

    /// Every stored triple with its count widened to `f64`.
    #[must_use]
    pub fn rows(&self) -> Vec<(&TagName, &ChildKey, f64)> {
        match self {
            Self::Totals(summary) => summary
                .iter()
                .map(|(parent, child, count)| (parent, child, count.as_f64()))
                .collect(),
            Self::Averages(summary) => summary.iter().collect(),
        }
    }

    #[must_use]
    pub const fn as_totals(&self) -> Option<&Summary<u64>> {
        match self {
            Self::Totals(summary) => Some(summary),
            Self::Averages(_) => None,
        }
    }

    #[must_use]
    pub const fn as_averages(&self) -> Option<&Summary<f64>> {
        match self {
            Self::Averages(summary) => Some(summary),
            Self::Totals(_) => None,
        }
    }
}
