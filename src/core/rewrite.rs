//! Content rewriting: replace placeholder tokens inside candidate files.
//!
//! Planning reads every candidate and computes the new content; applying
//! writes it back. A file that cannot be read or written is reported as a
//! warning and skipped, never aborting the run. Symbolic links are renamed
//! like any other path but their targets are never rewritten.

use serde::Serialize;
use std::path::Path;

use crate::classify::{ContentClassifier, ContentKind};
use crate::naming::{ReplacementPair, TokenCounts};
use crate::report::{Warning, WarningKind};
use crate::utils::io;

/// An edit to apply to a file's content.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Token occurrences found in the original content.
    pub counts: TokenCounts,
    /// New content after all replacements.
    #[serde(skip)]
    pub new_content: Vec<u8>,
    /// Whether the new content differs from what is on disk.
    #[serde(skip)]
    pub differs: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RewritePlan {
    pub edits: Vec<FileEdit>,
    /// Files with tokens that the classifier reported as binary.
    pub skipped_binary: Vec<String>,
    /// Symbolic links whose target contains tokens; left untouched.
    pub skipped_links: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl RewritePlan {
    pub fn total_replacements(&self) -> usize {
        self.edits.iter().map(|e| e.counts.total()).sum()
    }
}

/// Files actually written by [`apply_rewrites`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteOutcome {
    pub updated: Vec<String>,
    pub warnings: Vec<Warning>,
}

pub fn plan_rewrites(
    root: &Path,
    files: &[String],
    pair: &ReplacementPair,
    classifier: &dyn ContentClassifier,
) -> RewritePlan {
    let mut plan = RewritePlan::default();
    if pair.is_noop() {
        return plan;
    }

    for file in files {
        let path = root.join(file);

        if io::is_symlink(&path) {
            // A dangling link has no content to report.
            let linked = std::fs::read(&path).unwrap_or_default();
            if pair.count(&linked).total() > 0 {
                plan.skipped_links.push(file.clone());
            }
            continue;
        }

        let content = match io::read_bytes(&path, &format!("read {}", file)) {
            Ok(bytes) => bytes,
            Err(err) => {
                plan.warnings
                    .push(Warning::new(WarningKind::ReadFailed, file, err.describe()));
                continue;
            }
        };

        let counts = pair.count(&content);
        if counts.total() == 0 {
            continue;
        }

        // Probe only files that would otherwise change.
        if classifier.classify(&path) == ContentKind::Binary {
            plan.skipped_binary.push(file.clone());
            continue;
        }

        let new_content = pair.apply_bytes(&content);
        let differs = new_content != content;
        plan.edits.push(FileEdit {
            file: file.clone(),
            counts,
            new_content,
            differs,
        });
    }

    plan
}

/// Write every edit whose content differs from disk.
///
/// Each file is replaced atomically, so an interrupted run leaves either the
/// old or the new content, never a truncated file.
pub fn apply_rewrites(root: &Path, plan: &RewritePlan) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();

    for edit in plan.edits.iter().filter(|e| e.differs) {
        let path = root.join(&edit.file);
        match io::write_bytes_atomic(&path, &edit.new_content, &format!("write {}", edit.file)) {
            Ok(()) => outcome.updated.push(edit.file.clone()),
            Err(err) => outcome.warnings.push(Warning::new(
                WarningKind::WriteFailed,
                &edit.file,
                err.describe(),
            )),
        }
    }

    outcome
}
