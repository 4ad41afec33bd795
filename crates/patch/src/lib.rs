//! Patch codec for patch-history.
//!
//! Computes forward and inverse patch sets between two versions of a
//! `serde_json::Value` document and replays either set to materialize a new
//! version.
//!
//! # Example
//!
//! ```
//! use patch_history_patch::{apply_patches, produce};
//! use serde_json::json;
//!
//! let base = json!({"widgets": {"a": {"x": 0}}});
//! let out = produce(&base, |draft| {
//!     draft["widgets"]["a"]["x"] = json!(10);
//!     Ok::<(), ()>(())
//! })
//! .unwrap();
//!
//! assert_eq!(out.doc, json!({"widgets": {"a": {"x": 10}}}));
//! assert_eq!(apply_patches(&out.doc, &out.inverse_patches), base);
//! ```

pub mod apply;
pub mod codec;
pub mod diff;
pub mod types;

pub use apply::{apply_patch_in_place, apply_patches, apply_patches_owned, try_apply_patches};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use diff::{diff, produce, Produced};
pub use types::{is_similar, Path, PathSegment, Patch, PatchError, PatchOp, PatchSet, SIMILAR_PATH_DEPTH};
