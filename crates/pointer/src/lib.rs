//! Typed document paths for patch-history.
//!
//! A [`Path`] is a sequence of [`PathSegment`]s addressing a value nested
//! inside a `serde_json::Value` document. Paths can be rendered to and parsed
//! from [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! strings for logging and for the patch JSON codec.
//!
//! # Example
//!
//! ```
//! use patch_history_pointer::{format_json_pointer, get, parse_json_pointer, PathSegment};
//!
//! let path = parse_json_pointer("/widgets/0/x").unwrap();
//! assert_eq!(path[1], PathSegment::Index(0));
//! assert_eq!(format_json_pointer(&path), "/widgets/0/x");
//!
//! let doc = serde_json::json!({"widgets": [{"x": 10}]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(10)));
//! ```

use serde_json::Value;

pub mod types;
pub use types::{Path, PathSegment};

pub mod validate;
pub use validate::{PointerError, MAX_PATH_DEPTH, MAX_POINTER_BYTES};

/// Unescapes a JSON Pointer component: `~1` becomes `/`, `~0` becomes `~`.
///
/// ```
/// use patch_history_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer component: `~` becomes `~0`, `/` becomes `~1`.
///
/// ```
/// use patch_history_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parses a JSON Pointer into a typed path.
///
/// Canonical non-negative integers become [`PathSegment::Index`], every
/// other component becomes [`PathSegment::Key`]. The empty string is the
/// root path. Pointers longer than [`MAX_POINTER_BYTES`] or deeper than
/// [`MAX_PATH_DEPTH`] are rejected.
///
/// ```
/// use patch_history_pointer::{parse_json_pointer, PathSegment};
///
/// assert!(parse_json_pointer("").unwrap().is_empty());
/// assert_eq!(
///     parse_json_pointer("/a~1b/3").unwrap(),
///     vec![PathSegment::Key("a/b".into()), PathSegment::Index(3)]
/// );
/// assert!(parse_json_pointer("missing-slash").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Path, PointerError> {
    validate::check_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let path: Path = pointer[1..]
        .split('/')
        .map(|component| {
            let component = unescape_component(component);
            if is_valid_index(&component) {
                match component.parse() {
                    Ok(i) => PathSegment::Index(i),
                    Err(_) => PathSegment::Key(component),
                }
            } else {
                PathSegment::Key(component)
            }
        })
        .collect();
    validate::check_depth(&path)?;
    Ok(path)
}

/// Formats a path as a JSON Pointer. The root path formats as `""`.
///
/// ```
/// use patch_history_pointer::{format_json_pointer, PathSegment};
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["a".into(), PathSegment::Index(0)]), "/a/0");
/// ```
pub fn format_json_pointer(path: &[PathSegment]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    for segment in path {
        out.push('/');
        match segment {
            PathSegment::Index(i) => out.push_str(&i.to_string()),
            PathSegment::Key(k) => out.push_str(&escape_component(k)),
        }
    }
    out
}

/// Returns the first `n` segments of `path`, or the whole path if shorter.
pub fn prefix(path: &[PathSegment], n: usize) -> &[PathSegment] {
    &path[..n.min(path.len())]
}

/// Check if a string is a canonical non-negative integer (no leading zeros).
///
/// ```
/// use patch_history_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(&*segment.to_key()),
        Value::Array(arr) => arr.get(segment.to_index()?),
        _ => None,
    }
}

fn step_mut<'a>(current: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => map.get_mut(&*segment.to_key()),
        Value::Array(arr) => arr.get_mut(segment.to_index()?),
        _ => None,
    }
}

/// Returns the value at `path`, or `None` if any step does not resolve.
pub fn get<'a>(doc: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(doc, step)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(doc: &'a mut Value, path: &[PathSegment]) -> Option<&'a mut Value> {
    path.iter().try_fold(doc, step_mut)
}
