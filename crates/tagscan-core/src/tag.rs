//! Keys of the tag grammar: element names and the text sentinel.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Serialized form of [`ChildKey::Text`].
///
/// Uses the DOM `#text` node name so it can never collide with a real
/// element such as SVG `<text>`.
pub const TEXT_KEY: &str = "#text";

/// A plain (non-namespaced) ASCII element name, e.g. `div`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagName(String);

impl TagName {
    /// Validate and wrap an element name.
    ///
    /// The name must be non-empty ASCII and must not start with `#`, which is
    /// reserved for sentinel keys.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is unusable as a key.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::Validation("tag name is empty".to_string()));
        }
        if !name.is_ascii() {
            return Err(CoreError::Validation(format!(
                "tag name {name:?} is not plain ASCII"
            )));
        }
        if name.starts_with('#') {
            return Err(CoreError::Validation(format!(
                "tag name {name:?} uses the reserved '#' prefix"
            )));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for TagName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TagName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// What a parent element directly contains: another element, or free text.
///
/// `Text` sorts before every tag so it leads each child listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildKey {
    /// A run of non-whitespace text directly inside the parent.
    Text,
    /// A direct child element.
    Tag(TagName),
}

impl ChildKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => TEXT_KEY,
            Self::Tag(name) => name.as_str(),
        }
    }
}

impl From<TagName> for ChildKey {
    fn from(name: TagName) -> Self {
        Self::Tag(name)
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChildKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == TEXT_KEY {
            Ok(Self::Text)
        } else {
            TagName::new(s).map(Self::Tag)
        }
    }
}

impl Serialize for ChildKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChildKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
