//! Summaries of real HTML documents run through html5ever.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tagscan_core::{ChildKey, InvalidNodePolicy, TagName, TagPolicy};
use tagscan_parser::{SummarizeOptions, parse_html_str, summarize, summarize_html};

const ARTICLE: &str = include_str!("fixtures/article.html");
const TABLE_IMPLIED: &str = include_str!("fixtures/table_implied.html");
const CUSTOM_ELEMENTS: &str = include_str!("fixtures/custom_elements.html");
const SVG_INLINE: &str = include_str!("fixtures/svg_inline.html");

fn options(tag_policy: TagPolicy, invalid_nodes: InvalidNodePolicy) -> SummarizeOptions {
    SummarizeOptions::new(tag_policy, invalid_nodes)
}

#[test]
fn article_structure_is_counted() {
    let summary = summarize_html(ARTICLE.as_bytes(), SummarizeOptions::default()).unwrap();

    assert_eq!(summary.get_tag("html", "head"), Some(1));
    assert_eq!(summary.get_tag("html", "body"), Some(1));
    assert_eq!(summary.get_tag("head", "meta"), Some(1));
    assert_eq!(summary.get_tag("head", "title"), Some(1));
    assert_eq!(summary.get_tag("head", "link"), Some(1));
    assert_eq!(summary.get_text("head"), None);
    assert_eq!(summary.get_text("title"), Some(1));

    assert_eq!(summary.get_tag("body", "header"), Some(1));
    assert_eq!(summary.get_tag("body", "main"), Some(1));
    assert_eq!(summary.get_tag("body", "footer"), Some(1));
    assert_eq!(summary.get_tag("ul", "li"), Some(2));
    assert_eq!(summary.get_tag("li", "a"), Some(2));
    assert_eq!(summary.get_text("a"), Some(3));
}

#[test]
fn article_paragraph_text_and_tails() {
    let summary = summarize_html(ARTICLE.as_bytes(), SummarizeOptions::default()).unwrap();

    // "First paragraph with ", " and ", "." plus "Footer"; the blank <p> adds nothing.
    assert_eq!(summary.get_text("p"), Some(4));
    assert_eq!(summary.get_tag("p", "em"), Some(1));
    assert_eq!(summary.get_tag("p", "a"), Some(1));
    assert_eq!(summary.get_tag("article", "p"), Some(2));
    assert_eq!(summary.get_text("article"), None);
    assert_eq!(summary.get_tag("figure", "img"), Some(1));
    assert_eq!(summary.get_tag("figure", "figcaption"), Some(1));
}

#[test]
fn parser_inserts_implied_tbody() {
    let summary = summarize_html(TABLE_IMPLIED.as_bytes(), SummarizeOptions::default()).unwrap();

    assert_eq!(summary.get_tag("table", "tbody"), Some(1));
    assert_eq!(summary.get_tag("table", "tr"), None);
    assert_eq!(summary.get_tag("tbody", "tr"), Some(2));
    assert_eq!(summary.get_tag("tr", "td"), Some(4));
    assert_eq!(summary.get_text("td"), Some(4));
    assert_eq!(summary.get_text("table"), None);
}

#[rstest]
#[case(TagPolicy::AllowListed, InvalidNodePolicy::Prune, Some(1), None, None)]
#[case(TagPolicy::AllowListed, InvalidNodePolicy::Transparent, Some(1), None, Some(1))]
#[case(TagPolicy::Unrestricted, InvalidNodePolicy::Prune, Some(1), Some(1), Some(1))]
fn custom_elements_follow_policy(
    #[case] tag_policy: TagPolicy,
    #[case] invalid_nodes: InvalidNodePolicy,
    #[case] div_p: Option<u64>,
    #[case] div_shell: Option<u64>,
    #[case] section_p: Option<u64>,
) {
    let summary = summarize_html(
        CUSTOM_ELEMENTS.as_bytes(),
        options(tag_policy, invalid_nodes),
    )
    .unwrap();

    assert_eq!(summary.get_tag("div", "p"), div_p);
    assert_eq!(summary.get_tag("div", "app-shell"), div_shell);
    assert_eq!(summary.get_tag("section", "p"), section_p);
}

#[test]
fn allow_list_hides_everything_below_custom_element() {
    let summary =
        summarize_html(CUSTOM_ELEMENTS.as_bytes(), SummarizeOptions::default()).unwrap();

    assert!(summary.children("section").is_none());
    assert!(
        summary
            .iter()
            .all(|(_, child, _)| child.as_str() != "section")
    );
    // Only "Outside" survives; "Inside a custom element" is pruned.
    assert_eq!(summary.get_text("p"), Some(1));
}

#[test]
fn svg_text_element_is_not_the_text_sentinel() {
    let summary = summarize_html(
        SVG_INLINE.as_bytes(),
        options(TagPolicy::Unrestricted, InvalidNodePolicy::Prune),
    )
    .unwrap();

    let text_element = ChildKey::Tag(TagName::new("text").unwrap());
    assert_eq!(summary.get("svg", &text_element), Some(1));
    assert_eq!(summary.get_text("svg"), None);
    assert_eq!(summary.get_tag("svg", "rect"), Some(1));
    assert_eq!(summary.get_text("text"), Some(1));
    assert_eq!(summary.get_tag("div", "svg"), Some(1));
}

#[test]
fn svg_is_pruned_under_allow_list() {
    let summary = summarize_html(SVG_INLINE.as_bytes(), SummarizeOptions::default()).unwrap();
    assert_eq!(summary.get_tag("body", "div"), Some(1));
    assert!(summary.children("div").is_none());
    assert!(summary.children("svg").is_none());
}

#[test]
fn inline_markup_matches_hand_built_tree() {
    let root = parse_html_str("<p>hello<b>world</b>tail</p>").unwrap();
    let summary = summarize(&root, SummarizeOptions::default());

    assert_eq!(summary.get_text("p"), Some(2));
    assert_eq!(summary.get_tag("p", "b"), Some(1));
    assert_eq!(summary.get_text("b"), Some(1));
    assert_eq!(summary.get_tag("body", "p"), Some(1));
}

#[test]
fn every_stored_count_is_positive() {
    for source in [ARTICLE, TABLE_IMPLIED, CUSTOM_ELEMENTS, SVG_INLINE] {
        let summary = summarize_html(
            source.as_bytes(),
            options(TagPolicy::Unrestricted, InvalidNodePolicy::Transparent),
        )
        .unwrap();
        assert!(summary.iter().all(|(_, _, count)| count > 0));
    }
}
