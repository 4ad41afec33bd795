//! Limits enforced when parsing pointers.

use thiserror::Error;

use crate::PathSegment;

/// Longest pointer string accepted, in bytes.
pub const MAX_POINTER_BYTES: usize = 1024;

/// Deepest path accepted, in segments.
pub const MAX_PATH_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("POINTER_INVALID: must be empty or start with '/'")]
    MissingLeadingSlash,
    #[error("POINTER_TOO_LONG: {0} bytes")]
    TooLong(usize),
    #[error("PATH_TOO_DEEP: {0} segments")]
    TooDeep(usize),
}

pub(crate) fn check_pointer(pointer: &str) -> Result<(), PointerError> {
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(PointerError::MissingLeadingSlash);
    }
    if pointer.len() > MAX_POINTER_BYTES {
        return Err(PointerError::TooLong(pointer.len()));
    }
    Ok(())
}

pub(crate) fn check_depth(path: &[PathSegment]) -> Result<(), PointerError> {
    if path.len() > MAX_PATH_DEPTH {
        return Err(PointerError::TooDeep(path.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_pointer_rejected() {
        let pointer = format!("/{}", "a".repeat(MAX_POINTER_BYTES));
        assert_eq!(check_pointer(&pointer), Err(PointerError::TooLong(MAX_POINTER_BYTES + 1)));
        assert!(check_pointer("").is_ok());
    }

    #[test]
    fn depth_limit() {
        let deep: Vec<PathSegment> = (0..=MAX_PATH_DEPTH).map(PathSegment::Index).collect();
        assert_eq!(check_depth(&deep), Err(PointerError::TooDeep(MAX_PATH_DEPTH + 1)));
        assert!(check_depth(&deep[..MAX_PATH_DEPTH]).is_ok());
    }
}
