//! Per-document summaries: which tags and text each tag directly contains.
//!
//! Depth-first pre-order walk over an explicit stack. For a valid node, its own leading text and
//! then each valid child (plus that child's tail text) are counted under the
//! node's tag before recursing into the child. Invalid nodes are never
//! counted; [`InvalidNodePolicy`] decides whether the walk continues below
//! them.

use tagscan_core::{ChildKey, InvalidNodePolicy, PageSummary, TagName, TagPolicy};

use crate::classify::TagClassifier;
use crate::tree::{ParsedNode, has_content};

/// Walk settings for [`summarize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub tag_policy: TagPolicy,
    pub invalid_nodes: InvalidNodePolicy,
}

impl SummarizeOptions {
    #[must_use]
    pub const fn new(tag_policy: TagPolicy, invalid_nodes: InvalidNodePolicy) -> Self {
        Self {
            tag_policy,
            invalid_nodes,
        }
    }
}

/// Summarize the tree below (and including) `root`.
///
/// The root itself is never recorded as anyone's child.
#[must_use]
pub fn summarize(root: &ParsedNode, options: SummarizeOptions) -> PageSummary {
    let walker = Walker {
        classifier: TagClassifier::new(options.tag_policy),
        invalid_nodes: options.invalid_nodes,
    };
    walker.run(root)
}

/// Pending work on the explicit walk stack.
enum Step<'a> {
    /// A node nobody records as a child.
    Root(&'a ParsedNode),
    /// A valid node whose text and children are still to be counted.
    Counted(&'a ParsedNode, TagName),
}

struct Walker {
    classifier: TagClassifier,
    invalid_nodes: InvalidNodePolicy,
}

impl Walker {
    fn run(&self, root: &ParsedNode) -> PageSummary {
        let mut summary = PageSummary::new();
        let mut stack = vec![Step::Root(root)];
        let mut next = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Root(node) => match self.classifier.classify(node) {
                    Ok(tag) => next.push(Step::Counted(node, tag)),
                    Err(reason) => {
                        tracing::trace!(%reason, "skipping invalid node");
                        self.pass_through(node, &mut next);
                    }
                },
                Step::Counted(node, tag) => self.count(node, &tag, &mut summary, &mut next),
            }
            // Reversed so siblings come off the stack in document order.
            stack.extend(next.drain(..).rev());
        }

        summary
    }

    fn count<'a>(
        &self,
        node: &'a ParsedNode,
        tag: &TagName,
        summary: &mut PageSummary,
        next: &mut Vec<Step<'a>>,
    ) {
        if has_content(node.text.as_deref()) {
            summary.increment(tag, ChildKey::Text);
        }

        for child in &node.children {
            let child_tag = match self.classifier.classify(child) {
                Ok(child_tag) => child_tag,
                Err(reason) => {
                    tracing::trace!(parent = %tag, %reason, "skipping invalid child");
                    self.pass_through(child, next);
                    continue;
                }
            };

            summary.increment(tag, ChildKey::Tag(child_tag.clone()));
            if has_content(child.tail.as_deref()) {
                summary.increment(tag, ChildKey::Text);
            }
            next.push(Step::Counted(child, child_tag));
        }
    }

    /// Continue below an invalid node when the policy allows it. Its valid
    /// children become fresh roots.
    fn pass_through<'a>(&self, node: &'a ParsedNode, next: &mut Vec<Step<'a>>) {
        if self.invalid_nodes == InvalidNodePolicy::Transparent {
            next.extend(node.children.iter().map(Step::Root));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strict() -> SummarizeOptions {
        SummarizeOptions::default()
    }

    fn transparent(policy: TagPolicy) -> SummarizeOptions {
        SummarizeOptions::new(policy, InvalidNodePolicy::Transparent)
    }

    fn json(summary: &PageSummary) -> serde_json::Value {
        serde_json::to_value(summary).unwrap()
    }

    #[test]
    fn text_sentinel_counts_text_and_tail() {
        let tree = ParsedNode::element("p")
            .with_text("hello")
            .with_child(ParsedNode::element("b").with_text("world").with_tail("tail"));

        let summary = summarize(&tree, strict());
        assert_eq!(
            json(&summary),
            serde_json::json!({"p": {"#text": 2, "b": 1}, "b": {"#text": 1}})
        );
    }

    #[test]
    fn whitespace_only_text_is_ignored() {
        let tree = ParsedNode::element("div")
            .with_text("   \n  ")
            .with_child(ParsedNode::element("span").with_tail("\t\n"));

        let summary = summarize(&tree, strict());
        assert_eq!(summary.get_text("div"), None);
        assert_eq!(summary.get_tag("div", "span"), Some(1));
    }

    #[test]
    fn leaf_without_text_has_no_entry_of_its_own() {
        let tree = ParsedNode::element("div").with_child(ParsedNode::element("br"));
        let summary = summarize(&tree, strict());
        assert!(summary.children("br").is_none());
        assert_eq!(summary.parent_count(), 1);
    }

    #[test]
    fn root_is_never_a_child() {
        let tree = ParsedNode::element("html").with_child(ParsedNode::element("body"));
        let summary = summarize(&tree, strict());
        assert!(summary.iter().all(|(_, child, _)| child.as_str() != "html"));
    }

    #[test]
    fn custom_element_subtree_is_excluded_under_allow_list() {
        let tree = ParsedNode::element("div").with_child(
            ParsedNode::element("custom-widget")
                .with_text("inside")
                .with_tail("after")
                .with_child(
                    ParsedNode::element("p")
                        .with_text("deep")
                        .with_child(ParsedNode::element("a")),
                ),
        );

        let summary = summarize(&tree, strict());
        assert!(summary.is_empty(), "{summary:?}");
        assert!(summary.children("p").is_none());
        assert!(summary.iter().all(|(_, child, _)| child.as_str() != "a"));
    }

    #[test]
    fn custom_element_is_counted_when_unrestricted() {
        let tree = ParsedNode::element("div")
            .with_child(ParsedNode::element("custom-widget").with_text("x"));

        let options = SummarizeOptions::new(TagPolicy::Unrestricted, InvalidNodePolicy::Prune);
        let summary = summarize(&tree, options);
        assert_eq!(summary.get_tag("div", "custom-widget"), Some(1));
        assert_eq!(summary.get_text("custom-widget"), Some(1));
    }

    #[test]
    fn transparent_policy_walks_below_invalid_child() {
        let tree = ParsedNode::element("div").with_child(
            ParsedNode::element("custom-widget")
                .with_text("ignored")
                .with_child(ParsedNode::element("p").with_text("kept").with_tail("ignored"))
                .with_tail("dropped"),
        );

        let summary = summarize(&tree, transparent(TagPolicy::AllowListed));
        assert_eq!(json(&summary), serde_json::json!({"p": {"#text": 1}}));
    }

    #[test]
    fn transparent_policy_walks_below_invalid_root() {
        let tree = ParsedNode::element("{urn:x}weird-root")
            .with_child(ParsedNode::element("ul").with_child(ParsedNode::element("li")));

        assert!(summarize(&tree, strict()).is_empty());

        let summary = summarize(&tree, transparent(TagPolicy::AllowListed));
        assert_eq!(summary.get_tag("ul", "li"), Some(1));
        assert!(summary.children("weird-root").is_none());
    }

    #[test]
    fn comments_and_their_tails_are_skipped() {
        let tree = ParsedNode::element("div")
            .with_child(ParsedNode::comment().with_tail("after comment"))
            .with_child(ParsedNode::element("span"));

        let summary = summarize(&tree, transparent(TagPolicy::Unrestricted));
        assert_eq!(json(&summary), serde_json::json!({"div": {"span": 1}}));
    }

    #[test]
    fn non_ascii_child_is_skipped_under_any_policy() {
        let tree = ParsedNode::element("div")
            .with_child(ParsedNode::element("dív").with_child(ParsedNode::element("b")))
            .with_child(ParsedNode::element("i"));

        let options = SummarizeOptions::new(TagPolicy::Unrestricted, InvalidNodePolicy::Prune);
        let summary = summarize(&tree, options);
        assert_eq!(json(&summary), serde_json::json!({"div": {"i": 1}}));
    }

    #[test]
    fn deep_nesting_is_walked_without_recursion() {
        let depth = 200_000_u64;
        let mut tree = ParsedNode::element("span").with_text("leaf");
        for _ in 1..depth {
            tree = ParsedNode::element("span").with_child(tree);
        }

        let summary = summarize(&tree, strict());
        assert_eq!(summary.get_tag("span", "span"), Some(depth - 1));
        assert_eq!(summary.get_text("span"), Some(1));
    }

    #[test]
    fn transparent_walk_over_deep_invalid_chain() {
        let mut tree = ParsedNode::element("p").with_text("kept");
        for _ in 0..100_000 {
            tree = ParsedNode::element("custom-widget").with_child(tree);
        }

        let summary = summarize(&tree, transparent(TagPolicy::AllowListed));
        assert_eq!(json(&summary), serde_json::json!({"p": {"#text": 1}}));
    }

    #[test]
    fn repeated_children_accumulate() {
        let tree = ParsedNode::element("ul").with_children(
            (0..3).map(|i| ParsedNode::element("li").with_text(format!("item {i}"))),
        );

        let summary = summarize(&tree, strict());
        assert_eq!(summary.get_tag("ul", "li"), Some(3));
        assert_eq!(summary.get_text("li"), Some(3));
    }
}
