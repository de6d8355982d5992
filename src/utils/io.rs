//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read raw file bytes with standardized error handling.
pub fn read_bytes(path: &Path, operation: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Replace a file's content by writing a sibling temp file and renaming it
/// over the original. Existing permissions are carried over.
pub fn write_bytes_atomic(path: &Path, content: &[u8], operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!(".{}.detemplate-tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation)))
    })?;

    if let Ok(meta) = fs::metadata(path) {
        // Best effort; a failure only loses the mode bits.
        let _ = fs::set_permissions(&tmp_path, meta.permissions());
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation)))
    })?;

    Ok(())
}

/// Whether `path` itself is a symbolic link (the link is not followed).
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Create a directory and all of its parents.
pub fn create_dir_all(path: &Path, operation: &str) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Whether a directory exists and has no entries.
///
/// Unreadable directories count as non-empty so they are never removed.
pub fn is_empty_dir(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => false,
    }
}
