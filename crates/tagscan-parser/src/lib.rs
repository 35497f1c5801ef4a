//! # tagscan-parser
//!
//! Turns HTML documents into per-document tag grammars.
//!
//! - [`charset`]: byte order mark and `<meta charset>` detection
//! - [`html`]: html5ever parsing into the owned [`ParsedNode`] tree
//! - [`classify`]: raw node identifiers to [`TagName`](tagscan_core::TagName)s
//!   under a [`TagPolicy`](tagscan_core::TagPolicy)
//! - [`summarize`]: the tree walk producing a
//!   [`PageSummary`](tagscan_core::PageSummary)

pub mod charset;
pub mod classify;
pub mod error;
pub mod html;
pub mod summarize;
pub mod tree;

pub use classify::{InvalidTag, STANDARD_TAGS, TagClassifier, is_standard_tag, strip_namespace};
pub use error::ParserError;
pub use html::{parse_html, parse_html_str};
pub use summarize::{SummarizeOptions, summarize};
pub use tree::{ParsedNode, RawTag};

use tagscan_core::PageSummary;

/// Parse one document and summarize it.
///
/// # Errors
///
/// Returns [`ParserError`] if the document cannot be parsed.
pub fn summarize_html(
    bytes: &[u8],
    options: SummarizeOptions,
) -> Result<PageSummary, ParserError> {
    let root = parse_html(bytes)?;
    Ok(summarize(&root, options))
}
