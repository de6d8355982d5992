//! Per-path problems that are reported but never abort a run.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// File could not be read; its content was left alone.
    ReadFailed,
    /// File could not be written back.
    WriteFailed,
    /// Rename destination already exists; the rename is skipped.
    RenameCollision,
    /// Directory destination already exists and the source still has
    /// entries; those entries stay under the old name.
    RenameIncomplete,
    /// Both `git mv` and the filesystem rename failed.
    RenameFailed,
    /// Empty placeholder directory could not be removed.
    RemoveFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Path relative to the repository root.
    pub path: String,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Warning {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}
