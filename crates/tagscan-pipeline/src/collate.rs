//! Collation: many [`PageSummary`]s into one [`OverallSummary`].
//!
//! Additive collation is a streaming fold. Average collation buffers every
//! summary and divides each contribution by the number collated, so a
//! [`Collator`] for it can only be built for inputs of known size.

use tagscan_core::{CollationPolicy, CoreError, OverallSummary, PageSummary, Summary};

/// Sum every pair's counts.
pub fn collate_additive<'a, I>(summaries: I) -> PageSummary
where
    I: IntoIterator<Item = &'a PageSummary>,
{
    let mut totals = PageSummary::new();
    for summary in summaries {
        totals.merge(summary);
    }
    totals
}

/// Mean per-document count of every pair over `summaries.len()` documents.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn collate_average(summaries: &[PageSummary]) -> Summary<f64> {
    let mut averages = Summary::new();
    if summaries.is_empty() {
        return averages;
    }
    let share = 1.0 / summaries.len() as f64;
    for summary in summaries {
        averages.merge(&summary.scaled(share));
    }
    averages
}

/// Collate a complete sequence under `policy`.
pub fn collate<I>(summaries: I, policy: CollationPolicy) -> OverallSummary
where
    I: IntoIterator<Item = PageSummary>,
{
    match policy {
        CollationPolicy::Additive => {
            let mut totals = PageSummary::new();
            for summary in summaries {
                totals.merge(&summary);
            }
            OverallSummary::Totals(totals)
        }
        CollationPolicy::Average => {
            let buffered: Vec<PageSummary> = summaries.into_iter().collect();
            OverallSummary::Averages(collate_average(&buffered))
        }
    }
}

/// Incremental collation fed one summary at a time, in any order.
#[derive(Debug)]
pub enum Collator {
    Additive {
        totals: PageSummary,
        documents: usize,
    },
    Average {
        buffered: Vec<PageSummary>,
    },
}

impl Collator {
    /// Start collating.
    ///
    /// `known_count` is the number of documents expected, when it is known
    /// before the first summary arrives.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] when `policy` needs a known count
    /// and `known_count` is `None`.
    pub fn new(policy: CollationPolicy, known_count: Option<usize>) -> Result<Self, CoreError> {
        match policy {
            CollationPolicy::Additive => Ok(Self::Additive {
                totals: PageSummary::new(),
                documents: 0,
            }),
            CollationPolicy::Average => {
                let expected = known_count.ok_or_else(|| {
                    CoreError::configuration(
                        "collation.policy",
                        "average collation needs the document count up front; \
                         use additive collation for streamed input",
                    )
                })?;
                Ok(Self::Average {
                    buffered: Vec::with_capacity(expected),
                })
            }
        }
    }

    pub fn push(&mut self, summary: PageSummary) {
        match self {
            Self::Additive { totals, documents } => {
                totals.merge(&summary);
                *documents += 1;
            }
            Self::Average { buffered } => buffered.push(summary),
        }
    }

    /// Summaries collated so far.
    #[must_use]
    pub fn documents(&self) -> usize {
        match self {
            Self::Additive { documents, .. } => *documents,
            Self::Average { buffered } => buffered.len(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> CollationPolicy {
        match self {
            Self::Additive { .. } => CollationPolicy::Additive,
            Self::Average { .. } => CollationPolicy::Average,
        }
    }

    #[must_use]
    pub fn finish(self) -> OverallSummary {
        match self {
            Self::Additive { totals, .. } => OverallSummary::Totals(totals),
            Self::Average { buffered } => OverallSummary::Averages(collate_average(&buffered)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagscan_core::{ChildKey, TagName};

    fn page(pairs: &[(&str, &str, u64)]) -> PageSummary {
        let mut summary = PageSummary::new();
        for (parent, child, count) in pairs {
            let child = child.parse::<ChildKey>().unwrap();
            summary.add(&TagName::new(*parent).unwrap(), child, *count);
        }
        summary
    }

    #[test]
    fn single_summary_collates_to_itself() {
        let s = page(&[("p", "#text", 2), ("p", "b", 1), ("b", "#text", 1)]);
        let overall = collate([s.clone()], CollationPolicy::Additive);
        assert_eq!(overall, OverallSummary::Totals(s));
    }

    #[test]
    fn additive_collation_is_commutative() {
        let a = page(&[("div", "p", 2), ("p", "#text", 1)]);
        let b = page(&[("div", "p", 1), ("div", "span", 4)]);

        let ab = collate([a.clone(), b.clone()], CollationPolicy::Additive);
        let ba = collate([b, a], CollationPolicy::Additive);
        assert_eq!(ab, ba);
        assert_eq!(ab.as_totals().unwrap().get_tag("div", "p"), Some(3));
    }

    #[test]
    fn average_of_two_documents() {
        let a = page(&[("div", "p", 2)]);
        let b = page(&[("div", "p", 4)]);

        let overall = collate([a, b], CollationPolicy::Average);
        let averages = overall.as_averages().unwrap();
        assert_eq!(averages.get_tag("div", "p"), Some(3.0));
        assert_eq!(averages.pair_count(), 1);
    }

    #[test]
    fn average_counts_pairs_missing_from_some_documents_as_zero() {
        let a = page(&[("ul", "li", 3)]);
        let b = page(&[("ol", "li", 1)]);

        let averages = collate_average(&[a, b]);
        assert_eq!(averages.get_tag("ul", "li"), Some(1.5));
        assert_eq!(averages.get_tag("ol", "li"), Some(0.5));
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        assert!(collate(Vec::new(), CollationPolicy::Additive).is_empty());
        assert!(collate(Vec::new(), CollationPolicy::Average).is_empty());
    }

    #[test]
    fn collate_additive_borrows_inputs() {
        let pages = vec![page(&[("a", "#text", 1)]), page(&[("a", "#text", 2)])];
        let totals = collate_additive(&pages);
        assert_eq!(totals.get_text("a"), Some(3));
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn average_collator_needs_known_count() {
        let err = Collator::new(CollationPolicy::Average, None).unwrap_err();
        assert!(matches!(err, CoreError::Configuration { .. }));
        assert!(Collator::new(CollationPolicy::Additive, None).is_ok());
    }

    #[test]
    fn collator_matches_batch_collation() {
        let pages = vec![
            page(&[("div", "p", 2), ("p", "#text", 2)]),
            page(&[("div", "p", 4)]),
            page(&[("table", "tbody", 1)]),
        ];

        for policy in [CollationPolicy::Additive, CollationPolicy::Average] {
            let mut collator = Collator::new(policy, Some(pages.len())).unwrap();
            for summary in pages.iter().rev().cloned() {
                collator.push(summary);
            }
            assert_eq!(collator.documents(), 3);
            assert_eq!(collator.policy(), policy);
            assert_eq!(collator.finish(), collate(pages.clone(), policy));
        }
    }

    #[test]
    fn collated_output_has_no_zero_entries() {
        let pages = vec![page(&[("div", "p", 1)]), PageSummary::new()];
        for policy in [CollationPolicy::Additive, CollationPolicy::Average] {
            let overall = collate(pages.clone(), policy);
            assert!(overall.rows().iter().all(|(_, _, count)| *count > 0.0));
        }
    }
}
