//! End-to-end runs over on-disk corpora.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tagscan_core::{CollationPolicy, CoreError, PageSummary};
use tagscan_parser::SummarizeOptions;
use tagscan_pipeline::{
    CancelFlag, Corpus, DistributorOptions, DocumentOutcome, Input, Pipeline, PipelineError,
    WalkOptions, collate_additive, summarize_file,
};

const PAGES: [(&str, &str); 3] = [
    ("one.html", "<html><body><div><p>a</p><p>b</p></div></body></html>"),
    ("two.html", "<html><body><div><p>c</p></div><ul><li>x</li></ul></body></html>"),
    (
        "nested/three.htm",
        "<html><body><table><tr><td>1</td></tr></table></body></html>",
    ),
];

fn write_corpus(root: &Path) {
    for (name, html) in PAGES {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, html).unwrap();
    }
    fs::write(root.join("readme.txt"), "not a page").unwrap();
}

fn pipeline(collation: CollationPolicy) -> Pipeline {
    let options = DistributorOptions {
        threads: 2,
        queue_factor: 2,
        ..DistributorOptions::default()
    };
    Pipeline::new(options, collation).unwrap()
}

fn discover(root: &Path) -> Corpus {
    Corpus::discover(&[Input::Path(root.to_path_buf())], &WalkOptions::default()).unwrap()
}

#[test]
fn additive_run_matches_sum_of_page_summaries() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());

    let expected: Vec<PageSummary> = discover(tmp.path())
        .map(|path| summarize_file(&path.unwrap(), SummarizeOptions::default()).unwrap())
        .collect();
    let expected = collate_additive(&expected);

    let output = pipeline(CollationPolicy::Additive)
        .run(discover(tmp.path()), &CancelFlag::new(), |_| {})
        .unwrap();

    assert_eq!(output.summary.as_totals(), Some(&expected));
    assert_eq!(output.summary.as_totals().unwrap().get_tag("div", "p"), Some(3));
    assert_eq!(output.summary.as_totals().unwrap().get_tag("table", "tbody"), Some(1));
    assert_eq!(output.report.documents_seen, 3);
    assert_eq!(output.report.summarized, 3);
    assert_eq!(output.report.skipped(), 0);
    assert!(!output.report.cancelled);
}

#[test]
fn average_run_divides_by_summarized_documents() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());

    let output = pipeline(CollationPolicy::Average)
        .run(discover(tmp.path()), &CancelFlag::new(), |_| {})
        .unwrap();

    let averages = output.summary.as_averages().unwrap();
    let div_p = averages.get_tag("div", "p").unwrap();
    assert!((div_p - 1.0).abs() < 1e-9, "{div_p}");
    assert_eq!(averages.get_tag("ul", "li"), Some(1.0 / 3.0));
}

#[test]
fn unreadable_document_is_skipped_and_counted() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());
    let missing = tmp.path().join("gone.html");

    let mut paths: Vec<_> = discover(tmp.path()).map(Result::unwrap).collect();
    paths.push(missing.clone());

    let mut observed_failures = 0;
    let output = pipeline(CollationPolicy::Additive)
        .run(Corpus::from_paths(paths), &CancelFlag::new(), |outcome| {
            if matches!(outcome, DocumentOutcome::Failed { .. }) {
                observed_failures += 1;
            }
        })
        .unwrap();

    assert_eq!(observed_failures, 1);
    assert_eq!(output.report.summarized, 3);
    assert_eq!(output.report.summary_line(), "1 of 4 documents skipped");
    assert_eq!(
        output.report.failures[0].path.as_deref(),
        Some(missing.display().to_string().as_str())
    );
    assert_eq!(output.summary.as_totals().unwrap().get_tag("div", "p"), Some(3));
}

#[test]
fn deeply_nested_page_is_summarized_next_to_a_normal_one() {
    let tmp = tempfile::tempdir().unwrap();
    let ok = tmp.path().join("ok.html");
    let deep = tmp.path().join("deep.html");
    fs::write(&ok, PAGES[0].1).unwrap();
    fs::write(&deep, "<span>".repeat(200_000)).unwrap();

    let output = pipeline(CollationPolicy::Additive)
        .run(Corpus::from_paths(vec![ok, deep]), &CancelFlag::new(), |_| {})
        .unwrap();

    assert_eq!(output.report.summarized, 2);
    assert_eq!(output.report.summary_line(), "0 of 2 documents skipped");
    let totals = output.summary.as_totals().unwrap();
    assert_eq!(totals.get_tag("div", "p"), Some(2));
    assert_eq!(totals.get_tag("body", "span"), Some(1));
    assert_eq!(totals.get_tag("span", "span"), Some(199_999));
}

#[rstest]
#[case(CollationPolicy::Additive)]
#[case(CollationPolicy::Average)]
fn cancelled_before_start_gives_empty_flagged_summary(#[case] policy: CollationPolicy) {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());
    let cancel = CancelFlag::new();
    cancel.cancel();

    let output = pipeline(policy)
        .run(discover(tmp.path()), &cancel, |_| {})
        .unwrap();

    assert!(output.summary.is_empty());
    assert_eq!(output.summary.policy(), policy);
    assert!(output.report.cancelled);
    assert_eq!(output.report.summary_line(), "0 of 0 documents skipped (cancelled)");
}

#[test]
fn average_over_streamed_paths_is_rejected_before_work() {
    let corpus = Corpus::from_reader(Cursor::new("a.html\nb.html\n"));
    let mut observed = 0;

    let err = pipeline(CollationPolicy::Average)
        .run(corpus, &CancelFlag::new(), |_| observed += 1)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Core(CoreError::Configuration { .. })
    ));
    assert_eq!(observed, 0);
}

#[test]
fn additive_over_streamed_paths_is_allowed() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());
    let listing = PAGES
        .iter()
        .map(|(name, _)| tmp.path().join(name).display().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let output = pipeline(CollationPolicy::Additive)
        .run(Corpus::from_reader(Cursor::new(listing)), &CancelFlag::new(), |_| {})
        .unwrap();

    assert_eq!(output.report.summarized, 3);
    assert_eq!(output.summary.as_totals().unwrap().get_tag("body", "div"), Some(2));
}

#[test]
fn report_serializes_next_to_summary() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(tmp.path());

    let output = pipeline(CollationPolicy::Additive)
        .run(discover(tmp.path()), &CancelFlag::new(), |_| {})
        .unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["summary"]["ul"]["li"], 1);
    assert_eq!(json["summary"]["li"]["#text"], 1);
    assert_eq!(json["report"]["summarized"], 3);
    assert_eq!(json["report"]["cancelled"], false);
}
