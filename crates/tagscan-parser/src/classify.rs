//! Tag classification: raw node identifier -> usable [`TagName`].

use tagscan_core::{TagName, TagPolicy};

use crate::tree::ParsedNode;

/// Standard HTML element names accepted under [`TagPolicy::AllowListed`].
///
/// Sorted, so membership is a binary search.
pub const STANDARD_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "applet", "area", "article", "aside", "audio", "b",
    "base", "basefont", "bdi", "bdo", "big", "blockquote", "body", "br", "button", "canvas",
    "caption", "center", "cite", "code", "col", "colgroup", "datalist", "dd", "del",
    "details", "dfn", "dialog", "dir", "div", "dl", "dt", "em", "embed", "fieldset",
    "figcaption", "figure", "font", "footer", "form", "frame", "frameset", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "keygen", "label", "legend", "li", "link", "main", "map", "mark", "menu",
    "menuitem", "meta", "meter", "nav", "noframes", "noscript", "object", "ol", "optgroup",
    "option", "output", "p", "param", "pre", "progress", "q", "rp", "rt", "ruby", "s",
    "samp", "script", "section", "select", "small", "source", "span", "strike", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "textarea", "tfoot", "th",
    "thead", "time", "title", "tr", "track", "tt", "u", "ul", "var", "video", "wbr",
];

/// Whether `name` is one of the [`STANDARD_TAGS`].
#[must_use]
pub fn is_standard_tag(name: &str) -> bool {
    STANDARD_TAGS.binary_search(&name).is_ok()
}

/// Why a node has no usable tag name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTag {
    #[error("node is not an element")]
    NotAnElement,

    #[error("tag name is empty")]
    Empty,

    #[error("tag name {0:?} is not plain ASCII")]
    NonAscii(String),

    #[error("tag {0:?} is not a standard HTML element")]
    NotAllowed(String),

    #[error("tag name {0:?} is reserved")]
    Reserved(String),
}

/// Drop a `{namespace}` prefix: everything up to and including the last `}`.
#[must_use]
pub fn strip_namespace(raw: &str) -> &str {
    raw.rfind('}').map_or(raw, |idx| &raw[idx + 1..])
}

/// Classifies nodes under one [`TagPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TagClassifier {
    policy: TagPolicy,
}

impl TagClassifier {
    #[must_use]
    pub const fn new(policy: TagPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> TagPolicy {
        self.policy
    }

    /// Canonical tag name of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTag`] when the node is not an element, its local name
    /// is empty or non-ASCII, or the policy rejects it. Callers skip such
    /// nodes; the condition is never fatal.
    pub fn classify(&self, node: &ParsedNode) -> Result<TagName, InvalidTag> {
        let raw = node.raw_name().ok_or(InvalidTag::NotAnElement)?;
        self.classify_name(raw)
    }

    /// Classify a raw identifier such as `{http://www.w3.org/1999/xhtml}div`.
    ///
    /// # Errors
    ///
    /// See [`Self::classify`].
    pub fn classify_name(&self, raw: &str) -> Result<TagName, InvalidTag> {
        let local = strip_namespace(raw);
        if local.is_empty() {
            return Err(InvalidTag::Empty);
        }
        if !local.is_ascii() {
            return Err(InvalidTag::NonAscii(local.to_string()));
        }
        if self.policy == TagPolicy::AllowListed && !is_standard_tag(local) {
            return Err(InvalidTag::NotAllowed(local.to_string()));
        }
        TagName::new(local).map_err(|_| InvalidTag::Reserved(local.to_string()))
    }
}
