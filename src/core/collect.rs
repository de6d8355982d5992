//! Candidate collection: which files and directories a run operates on.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::exclude::ExclusionRules;
use crate::git;
use crate::utils::path as rel_path;

/// How candidates are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectMode {
    /// Tracked files plus untracked files that are not ignored.
    TrackedOnly,
    /// Every filesystem entry under the root.
    AllFiles,
}

impl CollectMode {
    pub fn from_all_flag(all: bool) -> Self {
        if all {
            CollectMode::AllFiles
        } else {
            CollectMode::TrackedOnly
        }
    }
}

/// Root-relative candidate paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Candidates {
    /// Regular files (and symlinks), sorted, unique.
    pub files: Vec<String>,
    /// Directories, deepest first.
    pub dirs: Vec<String>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

pub fn collect(root: &Path, mode: CollectMode, rules: &ExclusionRules) -> Result<Candidates> {
    let candidates = match mode {
        CollectMode::TrackedOnly => collect_tracked(root, rules)?,
        CollectMode::AllFiles => collect_all(root, rules)?,
    };

    crate::log_status!(
        "collect",
        "{} file(s), {} director(ies) under {}",
        candidates.files.len(),
        candidates.dirs.len(),
        root.display()
    );

    Ok(candidates)
}

fn collect_tracked(root: &Path, rules: &ExclusionRules) -> Result<Candidates> {
    let mut files = BTreeSet::new();
    for rel in git::tracked_files(root)?
        .into_iter()
        .chain(git::untracked_files(root)?)
    {
        if rules.is_excluded(&rel) {
            continue;
        }
        // Deleted-but-still-indexed paths and submodule gitlinks are not files here.
        match std::fs::symlink_metadata(root.join(&rel)) {
            Ok(meta) if !meta.is_dir() => {
                files.insert(rel);
            }
            _ => {}
        }
    }

    let mut dirs = BTreeSet::new();
    for file in &files {
        for dir in rel_path::ancestors(file) {
            if !rules.is_excluded(dir) {
                dirs.insert(dir.to_string());
            }
        }
    }

    Ok(Candidates {
        files: files.into_iter().collect(),
        dirs: deepest_first(dirs),
    })
}

fn collect_all(root: &Path, rules: &ExclusionRules) -> Result<Candidates> {
    let mut files = BTreeSet::new();
    let mut dirs = BTreeSet::new();
    walk_recursive(root, root, rules, &mut files, &mut dirs)?;

    Ok(Candidates {
        files: files.into_iter().collect(),
        dirs: deepest_first(dirs),
    })
}

fn walk_recursive(
    dir: &Path,
    root: &Path,
    rules: &ExclusionRules,
    files: &mut BTreeSet<String>,
    dirs: &mut BTreeSet<String>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(rel) = rel_path::relative(root, &path) else {
            continue;
        };
        if rules.is_excluded(&rel) {
            continue;
        }

        // Do not follow directory symlinks out of the tree.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            walk_recursive(&path, root, rules, files, dirs)?;
            dirs.insert(rel);
        } else {
            files.insert(rel);
        }
    }

    Ok(())
}

/// Order directories so every child precedes its parent.
fn deepest_first(dirs: BTreeSet<String>) -> Vec<String> {
    let mut dirs: Vec<String> = dirs.into_iter().collect();
    dirs.sort_by(|a, b| {
        rel_path::depth(b)
            .cmp(&rel_path::depth(a))
            .then_with(|| a.cmp(b))
    });
    dirs
}
