//! Element-tree model handed to the summarizer.
//!
//! Text is attached the element-tree way: text before an element's first
//! child node is that element's `text`, text after a child node (up to the
//! next node) is the child's `tail`.

/// The identifier a parser gave a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTag {
    /// Element name; `{namespace}local` when the element is namespaced.
    Name(String),
    Comment,
    ProcessingInstruction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNode {
    pub tag: RawTag,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<ParsedNode>,
}

impl ParsedNode {
    #[must_use]
    pub const fn new(tag: RawTag) -> Self {
        Self {
            tag,
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// An element node named `name` (plain or `{ns}local`).
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(RawTag::Name(name.into()))
    }

    #[must_use]
    pub const fn comment() -> Self {
        Self::new(RawTag::Comment)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Raw element name, or `None` for comments and processing instructions.
    #[must_use]
    pub fn raw_name(&self) -> Option<&str> {
        match &self.tag {
            RawTag::Name(name) => Some(name),
            RawTag::Comment | RawTag::ProcessingInstruction => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Append a text run to this node's leading text.
    pub fn push_text(&mut self, run: &str) {
        append_run(&mut self.text, run);
    }

    /// Append a text run to this node's tail.
    pub fn push_tail(&mut self, run: &str) {
        append_run(&mut self.tail, run);
    }
}

impl Drop for ParsedNode {
    // Flatten the subtree first so dropping a deeply nested tree never
    // recurses.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

fn append_run(slot: &mut Option<String>, run: &str) {
    match slot {
        Some(existing) => existing.push_str(run),
        None => *slot = Some(run.to_string()),
    }
}

/// Whether a text slot holds anything other than whitespace.
#[must_use]
pub fn has_content(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}
