//! HTML5 parsing via html5ever.
//!
//! Parses into an `RcDom`, then converts the document element into the
//! owned [`ParsedNode`] model. The `RcDom` is reference-counted and stays on
//! the calling thread; only the converted tree (or its summary) moves on.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::charset;
use crate::error::ParserError;
use crate::tree::{ParsedNode, RawTag};

/// Parse document bytes and return the document element (normally `<html>`).
///
/// Bytes are decoded with the encoding [`charset::detect`] picks, with
/// malformed sequences replaced, so arbitrary bytes never fail to decode.
///
/// # Errors
///
/// Returns [`ParserError::NoRootElement`] if the parser produced no element.
pub fn parse_html(bytes: &[u8]) -> Result<ParsedNode, ParserError> {
    let (text, encoding) = charset::decode(bytes);
    tracing::trace!(encoding = encoding.name(), "decoded document");
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(&*text);

    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find_map(|child| match &child.data {
            NodeData::Element { name, .. } => Some(convert_element(child, name)),
            _ => None,
        });

    root.ok_or(ParserError::NoRootElement)
}

/// Parse a string slice. Convenience for tests and in-memory documents.
///
/// # Errors
///
/// See [`parse_html`].
pub fn parse_html_str(html: &str) -> Result<ParsedNode, ParserError> {
    parse_html(html.as_bytes())
}

/// Convert an element subtree without recursing, so nesting depth is bounded
/// by heap rather than stack.
fn convert_element(handle: &Handle, name: &QualName) -> ParsedNode {
    let mut ancestors: Vec<Frame> = Vec::new();
    let mut current = Frame::open(handle, name);

    loop {
        if let Some(child) = current.pending.next() {
            match &child.data {
                NodeData::Element { name, .. } => {
                    let frame = Frame::open(&child, name);
                    ancestors.push(std::mem::replace(&mut current, frame));
                }
                NodeData::Text { contents } => {
                    let run = contents.borrow();
                    match current.node.children.last_mut() {
                        Some(previous) => previous.push_tail(&run),
                        None => current.node.push_text(&run),
                    }
                }
                NodeData::Comment { .. } => current.node.children.push(ParsedNode::comment()),
                NodeData::ProcessingInstruction { .. } => current
                    .node
                    .children
                    .push(ParsedNode::new(RawTag::ProcessingInstruction)),
                NodeData::Document | NodeData::Doctype { .. } => {}
            }
            continue;
        }

        let Some(parent) = ancestors.pop() else {
            return current.node;
        };
        let finished = std::mem::replace(&mut current, parent);
        current.node.children.push(finished.node);
    }
}

/// An element under conversion and the DOM children it has yet to absorb.
struct Frame {
    node: ParsedNode,
    pending: std::vec::IntoIter<Handle>,
}

impl Frame {
    fn open(handle: &Handle, name: &QualName) -> Self {
        let mut pending: Vec<Handle> = handle.children.borrow().clone();

        // <template> keeps its parsed content in a separate fragment.
        if let NodeData::Element {
            template_contents, ..
        } = &handle.data
            && let Some(fragment) = template_contents.borrow().as_ref()
        {
            pending.extend(fragment.children.borrow().iter().cloned());
        }

        Self {
            node: ParsedNode::element(qualified_name(name)),
            pending: pending.into_iter(),
        }
    }
}

/// `{namespace}local`, or the bare local name when there is no namespace.
fn qualified_name(name: &QualName) -> String {
    let ns: &str = &name.ns;
    let local: &str = &name.local;
    if ns.is_empty() {
        local.to_string()
    } else {
        format!("{{{ns}}}{local}")
    }
}
