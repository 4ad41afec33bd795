//! Structural diff: generate forward and inverse patch sets from two
//! document versions.

use serde_json::{Map, Value};

use crate::types::{Path, PathSegment, Patch, PatchSet};

/// The output of [`produce`]: the new document and the patch sets that move
/// between it and the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Produced {
    pub doc: Value,
    pub patches: PatchSet,
    pub inverse_patches: PatchSet,
}

impl Produced {
    /// True when the mutation left the document unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.patches.is_empty()
    }
}

/// Runs `mutator` against a draft copy of `base` and diffs the result.
///
/// `base` itself is never modified. An error from the mutator is returned
/// unchanged and the draft is discarded.
pub fn produce<F, E>(base: &Value, mutator: F) -> Result<Produced, E>
where
    F: FnOnce(&mut Value) -> Result<(), E>,
{
    let mut draft = base.clone();
    mutator(&mut draft)?;
    let (patches, inverse_patches) = diff(base, &draft);
    Ok(Produced { doc: draft, patches, inverse_patches })
}

/// Generates `(patches, inverse_patches)` such that applying `patches` to
/// `src` yields `dst`, and applying `inverse_patches` to `dst` yields `src`.
pub fn diff(src: &Value, dst: &Value) -> (PatchSet, PatchSet) {
    let mut differ = Differ::default();
    let mut path = Vec::new();
    differ.diff_at_path(&mut path, src, dst);
    differ.inverse.reverse();
    (differ.forward, differ.inverse)
}

#[derive(Default)]
struct Differ {
    forward: PatchSet,
    // Collected in forward order, reversed once at the end.
    inverse: PatchSet,
}

impl Differ {
    fn diff_at_path(&mut self, path: &mut Path, src: &Value, dst: &Value) {
        if src == dst {
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => self.diff_obj(path, s, d),
            (Value::Array(s), Value::Array(d)) => self.diff_arr(path, s, d),
            _ => self.replace(path, src, dst),
        }
    }

    fn diff_obj(&mut self, path: &mut Path, src: &Map<String, Value>, dst: &Map<String, Value>) {
        for (key, src_val) in src {
            if !dst.contains_key(key) {
                path.push(PathSegment::Key(key.clone()));
                self.remove(path, src_val);
                path.pop();
            }
        }
        for (key, dst_val) in dst {
            path.push(PathSegment::Key(key.clone()));
            match src.get(key) {
                Some(src_val) => self.diff_at_path(path, src_val, dst_val),
                None => self.add(path, dst_val),
            }
            path.pop();
        }
    }

    fn diff_arr(&mut self, path: &mut Path, src: &[Value], dst: &[Value]) {
        let shared = src.len().min(dst.len());
        for i in 0..shared {
            path.push(PathSegment::Index(i));
            self.diff_at_path(path, &src[i], &dst[i]);
            path.pop();
        }
        // Appends ascend and truncations descend, so every index stays valid
        // while the set is replayed in order.
        for (i, val) in dst.iter().enumerate().skip(shared) {
            path.push(PathSegment::Index(i));
            self.add(path, val);
            path.pop();
        }
        for i in (shared..src.len()).rev() {
            path.push(PathSegment::Index(i));
            self.remove(path, &src[i]);
            path.pop();
        }
    }

    fn add(&mut self, path: &Path, value: &Value) {
        self.forward.push(Patch::add(path.clone(), value.clone()));
        self.inverse.push(Patch::remove(path.clone()));
    }

    fn remove(&mut self, path: &Path, old: &Value) {
        self.forward.push(Patch::remove(path.clone()));
        self.inverse.push(Patch::add(path.clone(), old.clone()));
    }

    fn replace(&mut self, path: &Path, old: &Value, new: &Value) {
        self.forward.push(Patch::replace(path.clone(), new.clone()));
        self.inverse.push(Patch::replace(path.clone(), old.clone()));
    }
}
