//! Removal of leftover placeholder directories.
//!
//! After renaming, a directory named exactly `template` or `Template` that
//! is now empty existed only as scaffolding. Non-empty ones are left alone.

use serde::Serialize;
use std::path::Path;

use crate::exclude::ExclusionRules;
use crate::naming::{OLD_LOWER, OLD_TITLE};
use crate::report::{Warning, WarningKind};
use crate::utils::io;
use crate::utils::path as rel_path;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    /// Removed (or, in a dry run, removable) directories.
    pub removed: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Directories whose whole name is a token, deepest first.
pub fn find_placeholder_dirs(root: &Path, rules: &ExclusionRules) -> Vec<String> {
    let mut found = Vec::new();
    walk_dirs(root, root, rules, &mut found);
    found.sort_by(|a, b| {
        rel_path::depth(b)
            .cmp(&rel_path::depth(a))
            .then_with(|| a.cmp(b))
    });
    found
}

fn walk_dirs(dir: &Path, root: &Path, rules: &ExclusionRules, found: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let Some(rel) = rel_path::relative(root, &path) else {
            continue;
        };
        if rules.is_excluded(&rel) {
            continue;
        }

        walk_dirs(&path, root, rules, found);

        let name = rel_path::file_name(&rel);
        if name == OLD_LOWER || name == OLD_TITLE {
            found.push(rel);
        }
    }
}

/// Remove every empty placeholder directory.
///
/// Deepest-first order lets `template/template` collapse in one pass. In a
/// dry run nothing is removed and only directories that are empty right now
/// are reported.
pub fn cleanup(root: &Path, rules: &ExclusionRules, dry_run: bool) -> CleanupReport {
    let mut report = CleanupReport::default();

    for rel in find_placeholder_dirs(root, rules) {
        let path = root.join(&rel);
        if !io::is_empty_dir(&path) {
            continue;
        }

        if dry_run {
            report.removed.push(rel);
            continue;
        }

        match std::fs::remove_dir(&path) {
            Ok(()) => report.removed.push(rel),
            Err(e) => report.warnings.push(Warning::new(
                WarningKind::RemoveFailed,
                rel,
                e.to_string(),
            )),
        }
    }

    report
}
