//! # tagscan-core
//!
//! Core types shared across all tagscan crates:
//! - [`TagName`] and [`ChildKey`], the keys of a tag grammar
//! - [`Summary`], the nested `parent -> child -> count` map, with the
//!   [`PageSummary`] and [`OverallSummary`] aliases built on it
//! - Policy enums selecting classifier, walk, and collation behaviour
//! - Cross-cutting error types

pub mod errors;
pub mod policy;
pub mod summary;
pub mod tag;

pub use errors::CoreError;
pub use policy::{CollationPolicy, InvalidNodePolicy, TagPolicy};
pub use summary::{Count, OverallSummary, PageSummary, Summary};
pub use tag::{ChildKey, TagName, TEXT_KEY};
