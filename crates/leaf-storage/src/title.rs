//! Page title validation.
//!
//! Titles are used directly as file name stems, so anything that could
//! address a file outside the pages directory is rejected up front.

use crate::storage::{StorageError, StorageErrorKind};

/// Longest file name most filesystems accept, in bytes.
const MAX_FILE_NAME_LEN: usize = 255;

/// Suffix added to a title to form its file name.
const FILE_SUFFIX: &str = ".txt";

/// Validate that a title is safe to use as a file name stem.
///
/// Rejects:
/// - empty titles
/// - titles containing `/`, `\` or NUL
/// - titles starting with `.` (covers `.`, `..` and hidden files)
/// - titles whose file name would exceed 255 bytes
///
/// # Errors
///
/// Returns [`StorageErrorKind::InvalidPath`] for any rejected title.
pub fn validate_title(title: &str) -> Result<(), StorageError> {
    let invalid = title.is_empty()
        || title.starts_with('.')
        || title.contains(['/', '\\', '\0'])
        || title.len() + FILE_SUFFIX.len() > MAX_FILE_NAME_LEN;

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidPath).with_path(title));
    }
    Ok(())
}
