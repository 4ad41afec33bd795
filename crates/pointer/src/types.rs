//! Type definitions for document paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single step in a document path.
///
/// Object members are addressed by name, array elements by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

/// A path from the document root to a nested value. The empty path is the root.
pub type Path = Vec<PathSegment>;

impl PathSegment {
    /// Returns the key if this segment addresses an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    /// Returns the position if this segment addresses an array element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(_) => None,
        }
    }

    /// Resolves this segment as an array position.
    ///
    /// A `Key` that is a canonical non-negative integer also resolves, so
    /// paths parsed from pointer strings behave like paths built by the differ.
    pub fn to_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(k) if crate::is_valid_index(k) => k.parse().ok(),
            PathSegment::Key(_) => None,
        }
    }

    /// Resolves this segment as an object key.
    pub fn to_key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            PathSegment::Key(k) => std::borrow::Cow::Borrowed(k.as_str()),
            PathSegment::Index(i) => std::borrow::Cow::Owned(i.to_string()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        PathSegment::Key(k.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self {
        PathSegment::Key(k)
    }
}
