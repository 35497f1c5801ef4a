//! Parser error types for tagscan-parser.

/// Errors that can occur while turning document bytes into a tree.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Document has no root element")]
    NoRootElement,
}
