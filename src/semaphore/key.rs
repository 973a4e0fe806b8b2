//! Key validation.
//!
//! A key becomes a filename directly under the root directory, so it must be
//! exactly one path segment.

use crate::error::{Result, SemaphoreError};

/// Check that `key` can be used as a lease record filename.
///
/// Rejected:
/// - the empty string, `.` and `..`
/// - names starting with `.` (reserved for temporary and scratch files)
/// - names containing `/`, `\` or NUL
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SemaphoreError::InvalidKey("key must not be empty".to_string()));
    }

    if key.starts_with('.') {
        return Err(SemaphoreError::InvalidKey(format!(
            "key \"{}\" must not start with '.'",
            key
        )));
    }

    if let Some(c) = key.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(SemaphoreError::InvalidKey(format!(
            "key \"{}\" contains forbidden character {:?}",
            key.escape_default(),
            c
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys_are_valid() {
        for key in ["jobs", "nightly-report", "TASK_001", "a.b.c", "ünïcödé", "with space"] {
            assert!(validate_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_traversal_and_separators_are_rejected() {
        for key in ["", ".", "..", ".hidden", "../escape", "a/b", "a\\b", "nul\0byte", "/abs"] {
            let err = validate_key(key).unwrap_err();
            assert!(
                matches!(err, SemaphoreError::InvalidKey(_)),
                "{key:?} should be rejected"
            );
        }
    }
}
