//! Path renaming: move files and directories whose path contains a token.
//!
//! Targets are processed longest path first. A child path is always longer
//! than its parent, so every entry inside a directory is moved before the
//! directory itself and no pending path is invalidated by an earlier move.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::collect::Candidates;
use crate::git;
use crate::naming::ReplacementPair;
use crate::report::{Warning, WarningKind};
use crate::utils::io;

/// A file or directory rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRename {
    /// Original path relative to root.
    pub from: String,
    /// New path relative to root.
    pub to: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenamePlan {
    /// Renames in application order.
    pub renames: Vec<FileRename>,
    /// File renames whose destination already exists.
    pub collisions: Vec<Warning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveMethod {
    Git,
    Filesystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRename {
    pub from: String,
    pub to: String,
    pub method: MoveMethod,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameOutcome {
    pub renamed: Vec<AppliedRename>,
    /// Directories whose contents had already been moved into an existing
    /// destination; the emptied source was removed.
    pub merged: Vec<FileRename>,
    pub warnings: Vec<Warning>,
}

/// Compute renames for every candidate whose path contains a token.
pub fn plan_renames(root: &Path, candidates: &Candidates, pair: &ReplacementPair) -> RenamePlan {
    let mut plan = RenamePlan::default();
    if pair.is_noop() {
        return plan;
    }

    let mut targets: BTreeMap<&str, bool> = BTreeMap::new();
    for file in &candidates.files {
        if pair.matches(file) {
            targets.insert(file, false);
        }
    }
    for dir in &candidates.dirs {
        if pair.matches(dir) {
            targets.insert(dir, true);
        }
    }

    let mut ordered: Vec<(&str, bool)> = targets.into_iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    for (from, is_dir) in ordered {
        let to = pair.apply(from);
        if to == from {
            continue;
        }

        if !is_dir && root.join(&to).symlink_metadata().is_ok() {
            plan.collisions.push(Warning::new(
                WarningKind::RenameCollision,
                &to,
                format!("Rename target '{}' already exists on disk (from '{}')", to, from),
            ));
        }

        plan.renames.push(FileRename {
            from: from.to_string(),
            to,
            is_dir,
        });
    }

    plan
}

/// Apply planned renames in order, isolating failures per path.
///
/// With `use_git`, each move is first attempted with `git mv`; untracked
/// paths (or a missing git) fall back to a plain filesystem rename.
pub fn apply_renames(root: &Path, plan: &RenamePlan, use_git: bool) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();

    for rename in &plan.renames {
        let from = root.join(&rename.from);
        let to = root.join(&rename.to);

        // Carried along by an earlier move.
        if from.symlink_metadata().is_err() {
            continue;
        }

        if to.symlink_metadata().is_ok() {
            if rename.is_dir && to.is_dir() {
                if io::is_empty_dir(&from) {
                    match std::fs::remove_dir(&from) {
                        Ok(()) => outcome.merged.push(rename.clone()),
                        Err(e) => outcome.warnings.push(Warning::new(
                            WarningKind::RenameFailed,
                            &rename.from,
                            format!("remove emptied directory: {}", e),
                        )),
                    }
                } else {
                    outcome.warnings.push(Warning::new(
                        WarningKind::RenameIncomplete,
                        &rename.from,
                        format!(
                            "'{}' already exists; entries left behind in '{}'",
                            rename.to, rename.from
                        ),
                    ));
                }
            } else if !plan.collisions.iter().any(|w| w.path == rename.to) {
                // Appeared after planning; planned collisions are already reported.
                outcome.warnings.push(Warning::new(
                    WarningKind::RenameCollision,
                    &rename.to,
                    format!("'{}' already exists, not overwriting '{}'", rename.to, rename.from),
                ));
            }
            continue;
        }

        if let Some(parent) = to.parent() {
            if let Err(err) = io::create_dir_all(parent, &format!("create {}", parent.display())) {
                outcome.warnings.push(Warning::new(
                    WarningKind::RenameFailed,
                    &rename.from,
                    err.describe(),
                ));
                continue;
            }
        }

        match move_entry(root, rename, use_git) {
            Ok(method) => outcome.renamed.push(AppliedRename {
                from: rename.from.clone(),
                to: rename.to.clone(),
                method,
            }),
            Err(message) => outcome.warnings.push(Warning::new(
                WarningKind::RenameFailed,
                &rename.from,
                message,
            )),
        }
    }

    outcome
}

fn move_entry(root: &Path, rename: &FileRename, use_git: bool) -> Result<MoveMethod, String> {
    if use_git {
        match git::move_path(root, &rename.from, &rename.to) {
            Ok(()) => return Ok(MoveMethod::Git),
            Err(err) => crate::log_status!(
                "rename",
                "git mv {} failed ({}), using a plain rename",
                rename.from,
                err.describe()
            ),
        }
    }

    std::fs::rename(root.join(&rename.from), root.join(&rename.to))
        .map(|()| MoveMethod::Filesystem)
        .map_err(|e| format!("rename {} → {}: {}", rename.from, rename.to, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::AcronymSet;
    use std::fs;

    fn pair(name: &str) -> ReplacementPair {
        ReplacementPair::derive(name, &AcronymSet::default())
    }

    fn candidates(files: &[&str], dirs: &[&str]) -> Candidates {
        Candidates {
            files: files.iter().map(|s| s.to_string()).collect(),
            dirs: dirs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn plan_orders_longest_path_first() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan_renames(
            dir.path(),
            &candidates(
                &["template/sub/template-file.txt", "README.md", "src/Template.rs"],
                &["template/sub", "template", "src"],
            ),
            &pair("acme"),
        );

        let order: Vec<(&str, &str)> = plan
            .renames
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("template/sub/template-file.txt", "acme/sub/acme-file.txt"),
                ("src/Template.rs", "src/Acme.rs"),
                ("template/sub", "acme/sub"),
                ("template", "acme"),
            ]
        );
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn nested_rename_lands_under_new_parent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("template/sub")).unwrap();
        fs::write(root.join("template/sub/template-file.txt"), "x").unwrap();

        let plan = plan_renames(
            root,
            &candidates(&["template/sub/template-file.txt"], &["template/sub", "template"]),
            &pair("acme"),
        );
        let outcome = apply_renames(root, &plan, false);

        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
        assert_eq!(outcome.renamed.len(), 1);
        assert_eq!(outcome.renamed[0].method, MoveMethod::Filesystem);
        assert_eq!(outcome.merged.len(), 2);
        assert!(root.join("acme/sub/acme-file.txt").is_file());
        assert!(!root.join("template").exists());
    }

    #[test]
    fn directory_without_moved_children_is_renamed_whole() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("template-assets")).unwrap();
        fs::write(root.join("template-assets/logo.svg"), "<svg/>").unwrap();

        // logo.svg itself is not a candidate (e.g. excluded), only its directory.
        let plan = plan_renames(root, &candidates(&[], &["template-assets"]), &pair("acme"));
        let outcome = apply_renames(root, &plan, false);

        assert_eq!(outcome.renamed.len(), 1);
        assert!(outcome.merged.is_empty());
        assert!(root.join("acme-assets/logo.svg").is_file());
        assert!(!root.join("template-assets").exists());
    }

    #[test]
    fn partially_moved_directory_keeps_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("template")).unwrap();
        fs::write(root.join("template/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("template/local.env"), "SECRET=1").unwrap();

        let plan = plan_renames(
            root,
            &candidates(&["template/main.rs"], &["template"]),
            &pair("acme"),
        );
        let outcome = apply_renames(root, &plan, false);

        assert_eq!(outcome.renamed.len(), 1);
        assert!(outcome.merged.is_empty());
        assert!(root.join("acme/main.rs").is_file());
        assert!(root.join("template/local.env").is_file());

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind, WarningKind::RenameIncomplete);
        assert_eq!(outcome.warnings[0].path, "template");
    }

    #[test]
    fn directory_blocked_by_existing_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("template")).unwrap();
        fs::write(root.join("template/vendored.txt"), "x").unwrap();
        fs::create_dir_all(root.join("acme")).unwrap();
        fs::write(root.join("acme/existing.txt"), "y").unwrap();

        let plan = plan_renames(root, &candidates(&[], &["template"]), &pair("acme"));
        let outcome = apply_renames(root, &plan, false);

        assert!(outcome.renamed.is_empty());
        assert!(outcome.merged.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind, WarningKind::RenameIncomplete);
        assert!(root.join("template/vendored.txt").is_file());
        assert!(root.join("acme/existing.txt").is_file());
    }

    #[test]
    fn existing_destination_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("template.txt"), "old").unwrap();
        fs::write(root.join("acme.txt"), "keep me").unwrap();

        let plan = plan_renames(root, &candidates(&["template.txt", "acme.txt"], &[]), &pair("acme"));
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(plan.collisions[0].kind, WarningKind::RenameCollision);

        let outcome = apply_renames(root, &plan, false);
        assert!(outcome.renamed.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(fs::read_to_string(root.join("acme.txt")).unwrap(), "keep me");
        assert!(root.join("template.txt").exists());
    }

    #[test]
    fn destination_created_after_planning_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("template.txt"), "old").unwrap();

        let plan = plan_renames(root, &candidates(&["template.txt"], &[]), &pair("acme"));
        assert!(plan.collisions.is_empty());

        fs::write(root.join("acme.txt"), "raced in").unwrap();
        let outcome = apply_renames(root, &plan, false);

        assert!(outcome.renamed.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind, WarningKind::RenameCollision);
        assert_eq!(outcome.warnings[0].path, "acme.txt");
        assert_eq!(fs::read_to_string(root.join("acme.txt")).unwrap(), "raced in");
    }

    #[test]
    fn vanished_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let plan = RenamePlan {
            renames: vec![FileRename {
                from: "template.txt".to_string(),
                to: "acme.txt".to_string(),
                is_dir: false,
            }],
            collisions: Vec::new(),
        };
        let outcome = apply_renames(dir.path(), &plan, false);
        assert!(outcome.renamed.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn git_move_preserves_tracking() {
        if !git::is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        crate::utils::command::run_in(root, "git", &["init", "-q"], "git init").unwrap();
        fs::write(root.join("template.md"), "doc").unwrap();
        fs::write(root.join("template-notes.md"), "untracked").unwrap();
        crate::utils::command::run_in(root, "git", &["add", "template.md"], "git add").unwrap();

        let plan = plan_renames(
            root,
            &candidates(&["template-notes.md", "template.md"], &[]),
            &pair("acme"),
        );
        let outcome = apply_renames(root, &plan, true);

        let methods: Vec<(&str, MoveMethod)> = outcome
            .renamed
            .iter()
            .map(|r| (r.to.as_str(), r.method))
            .collect();
        assert_eq!(
            methods,
            vec![
                ("acme-notes.md", MoveMethod::Filesystem),
                ("acme.md", MoveMethod::Git),
            ]
        );
        assert_eq!(git::tracked_files(root).unwrap(), vec!["acme.md"]);
    }

    #[test]
    fn noop_pair_plans_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan_renames(dir.path(), &candidates(&["template.txt"], &[]), &pair("template"));
        assert!(plan.renames.is_empty());
    }
}
