//! Core types for patches and patch sets.

use serde_json::Value;
use thiserror::Error;

pub use patch_history_pointer::{Path, PathSegment};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("INVALID_INDEX: {0}")]
    InvalidIndex(String),
    #[error("INVALID_TARGET: {0}")]
    InvalidTarget(String),
    #[error("MISSING_VALUE: {0}")]
    MissingValue(String),
    #[error("INVALID_PATCH: {0}")]
    InvalidPatch(String),
}

/// The kind of structural edit a [`Patch`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
}

impl PatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Replace => "replace",
            PatchOp::Remove => "remove",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, PatchError> {
        match s {
            "add" => Ok(PatchOp::Add),
            "replace" => Ok(PatchOp::Replace),
            "remove" => Ok(PatchOp::Remove),
            other => Err(PatchError::InvalidPatch(format!("unknown op: {other}"))),
        }
    }
}

/// A single structural edit on a document.
///
/// `Add` and `Replace` carry the value to write; `Remove` carries none.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub op: PatchOp,
    pub path: Path,
    pub value: Option<Value>,
}

/// An ordered group of patches applied together.
pub type PatchSet = Vec<Patch>;

impl Patch {
    pub fn add(path: Path, value: Value) -> Self {
        Self { op: PatchOp::Add, path, value: Some(value) }
    }

    pub fn replace(path: Path, value: Value) -> Self {
        Self { op: PatchOp::Replace, path, value: Some(value) }
    }

    pub fn remove(path: Path) -> Self {
        Self { op: PatchOp::Remove, path, value: None }
    }

    /// Returns the path rendered as a JSON Pointer.
    pub fn pointer(&self) -> String {
        patch_history_pointer::format_json_pointer(&self.path)
    }
}

/// Number of leading path segments compared by [`is_similar`].
pub const SIMILAR_PATH_DEPTH: usize = 2;

/// Reports whether two patch sets touch the same entities the same way.
///
/// Sets are similar when they have equal length and, index by index, share
/// the op kind and the first two path segments. Values and deeper segments
/// are ignored, so successive ticks of a drag on one widget compare equal.
pub fn is_similar(a: &[Patch], b: &[Patch]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.op == y.op
                && patch_history_pointer::prefix(&x.path, SIMILAR_PATH_DEPTH)
                    == patch_history_pointer::prefix(&y.path, SIMILAR_PATH_DEPTH)
        })
}
