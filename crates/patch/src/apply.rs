//! Patch application.
//!
//! [`try_apply_patches`] is the fallible primitive. [`apply_patches`] and
//! [`apply_patches_owned`] treat a patch that does not resolve as a broken
//! invariant and panic instead of returning a partially patched document.

use serde_json::Value;

use patch_history_pointer::get_mut;

use crate::types::{Patch, PatchError, PatchOp};

/// Applies a single patch to `doc` in place.
pub fn apply_patch_in_place(doc: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    let Some((last, parent_path)) = patch.path.split_last() else {
        return apply_at_root(doc, patch);
    };
    let parent = get_mut(doc, parent_path).ok_or_else(|| PatchError::NotFound(patch.pointer()))?;
    match patch.op {
        PatchOp::Add => {
            let value = take_value(patch)?;
            match parent {
                Value::Object(map) => {
                    map.insert(last.to_key().into_owned(), value);
                    Ok(())
                }
                Value::Array(arr) => {
                    let idx = if last.as_key() == Some("-") {
                        arr.len()
                    } else {
                        last.to_index().ok_or_else(|| PatchError::InvalidIndex(patch.pointer()))?
                    };
                    if idx > arr.len() {
                        return Err(PatchError::InvalidIndex(patch.pointer()));
                    }
                    arr.insert(idx, value);
                    Ok(())
                }
                _ => Err(PatchError::InvalidTarget(patch.pointer())),
            }
        }
        PatchOp::Replace => {
            let value = take_value(patch)?;
            let slot = match parent {
                Value::Object(map) => map.get_mut(&*last.to_key()),
                Value::Array(arr) => {
                    let idx = last.to_index().ok_or_else(|| PatchError::InvalidIndex(patch.pointer()))?;
                    arr.get_mut(idx)
                }
                _ => return Err(PatchError::InvalidTarget(patch.pointer())),
            };
            let slot = slot.ok_or_else(|| PatchError::NotFound(patch.pointer()))?;
            *slot = value;
            Ok(())
        }
        PatchOp::Remove => match parent {
            Value::Object(map) => map
                .remove(&*last.to_key())
                .map(|_| ())
                .ok_or_else(|| PatchError::NotFound(patch.pointer())),
            Value::Array(arr) => {
                let idx = last.to_index().ok_or_else(|| PatchError::InvalidIndex(patch.pointer()))?;
                if idx >= arr.len() {
                    return Err(PatchError::NotFound(patch.pointer()));
                }
                arr.remove(idx);
                Ok(())
            }
            _ => Err(PatchError::InvalidTarget(patch.pointer())),
        },
    }
}

fn apply_at_root(doc: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    match patch.op {
        PatchOp::Add | PatchOp::Replace => {
            *doc = take_value(patch)?;
            Ok(())
        }
        PatchOp::Remove => Err(PatchError::InvalidTarget(patch.pointer())),
    }
}

fn take_value(patch: &Patch) -> Result<Value, PatchError> {
    patch.value.clone().ok_or_else(|| PatchError::MissingValue(patch.pointer()))
}

/// Replays `patches` in order against `doc`.
///
/// On error the partially patched document is dropped, so callers only ever
/// observe the input or the fully patched result.
pub fn try_apply_patches(mut doc: Value, patches: &[Patch]) -> Result<Value, PatchError> {
    for patch in patches {
        apply_patch_in_place(&mut doc, patch)?;
    }
    Ok(doc)
}

/// Replays `patches` against a copy of `doc`, leaving `doc` untouched.
///
/// # Panics
///
/// Panics if any patch path does not resolve against the document. That
/// means the patch set was recorded against a document of a different shape.
pub fn apply_patches(doc: &Value, patches: &[Patch]) -> Value {
    apply_patches_owned(doc.clone(), patches)
}

/// Like [`apply_patches`], but consumes the document instead of cloning it.
///
/// # Panics
///
/// Panics if any patch path does not resolve against the document.
pub fn apply_patches_owned(doc: Value, patches: &[Patch]) -> Value {
    match try_apply_patches(doc, patches) {
        Ok(doc) => doc,
        Err(err) => panic!("patch set does not apply to the current document: {err}"),
    }
}
