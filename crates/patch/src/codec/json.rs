//! JSON codec for patches.
//!
//! Converts patches to/from `serde_json::Value` in RFC 6902 shape:
//! `{"op": "replace", "path": "/widgets/0/x", "value": 10}`.

use serde_json::{json, Map, Value};

use patch_history_pointer::{format_json_pointer, parse_json_pointer};

use crate::types::{Patch, PatchError, PatchOp};

/// Serialize a [`Patch`] to its JSON form.
pub fn to_json(patch: &Patch) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), json!(patch.op.as_str()));
    m.insert("path".into(), Value::String(format_json_pointer(&patch.path)));
    if let Some(value) = &patch.value {
        m.insert("value".into(), value.clone());
    }
    Value::Object(m)
}

/// Serialize a patch set to a JSON array.
pub fn to_json_patch(patches: &[Patch]) -> Value {
    Value::Array(patches.iter().map(to_json).collect())
}

/// Deserialize a [`Patch`] from its JSON form.
pub fn from_json(v: &Value) -> Result<Patch, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidPatch("patch must be an object".into()))?;
    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidPatch("missing op".into()))?;
    let op = PatchOp::from_str(op)?;
    let pointer = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidPatch("path must be a string".into()))?;
    let path = parse_json_pointer(pointer).map_err(|e| PatchError::InvalidPatch(e.to_string()))?;
    let value = obj.get("value").cloned();
    match (op, value.is_some()) {
        (PatchOp::Add | PatchOp::Replace, false) => Err(PatchError::MissingValue(pointer.to_string())),
        (PatchOp::Remove, true) => Err(PatchError::InvalidPatch("remove takes no value".into())),
        _ => Ok(Patch { op, path, value }),
    }
}

/// Deserialize a patch set from a JSON array.
pub fn from_json_patch(v: &Value) -> Result<Vec<Patch>, PatchError> {
    v.as_array()
        .ok_or_else(|| PatchError::InvalidPatch("patch set must be an array".into()))?
        .iter()
        .map(from_json)
        .collect()
}
