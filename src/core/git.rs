use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::command;

/// Find the root of the git repository enclosing `start`.
pub fn find_root(start: &Path) -> Result<PathBuf> {
    let top = command::run_in_optional(start, "git", &["rev-parse", "--show-toplevel"])
        .ok_or_else(|| Error::repo_not_found(start.display().to_string()))?;

    let root = PathBuf::from(top);
    Ok(root.canonicalize().unwrap_or(root))
}

/// Files in the index, relative to the repository root.
pub fn tracked_files(root: &Path) -> Result<Vec<String>> {
    ls_files(root, &["ls-files", "-z", "--cached"])
}

/// Untracked files that are not ignored, relative to the repository root.
pub fn untracked_files(root: &Path) -> Result<Vec<String>> {
    ls_files(root, &["ls-files", "-z", "--others", "--exclude-standard"])
}

fn ls_files(root: &Path, args: &[&str]) -> Result<Vec<String>> {
    let stdout = command::run_in(root, "git", args, "git ls-files")
        .map_err(|e| Error::git_command_failed(e.describe()))?;

    Ok(stdout
        .split('\0')
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Move a path with `git mv` so history follows the file.
///
/// Fails for paths git does not know about; callers fall back to a plain rename.
pub fn move_path(root: &Path, from: &str, to: &str) -> Result<()> {
    command::run_in(root, "git", &["mv", "--", from, to], "git mv")
        .map_err(|e| Error::git_command_failed(e.describe()))?;
    Ok(())
}

pub fn is_available() -> bool {
    command::is_available("git")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_root_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_root(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "repo.not_found");
    }

    #[test]
    fn listing_a_fresh_repository() {
        if !is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        command::run_in(&root, "git", &["init", "-q"], "git init").unwrap();
        std::fs::write(root.join("tracked.txt"), "a").unwrap();
        std::fs::write(root.join("loose.txt"), "b").unwrap();
        std::fs::write(root.join("noise.log"), "c").unwrap();
        std::fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        command::run_in(&root, "git", &["add", "tracked.txt"], "git add").unwrap();

        assert_eq!(find_root(&root).unwrap(), root);
        assert_eq!(tracked_files(&root).unwrap(), vec!["tracked.txt"]);

        let mut untracked = untracked_files(&root).unwrap();
        untracked.sort();
        assert_eq!(untracked, vec![".gitignore", "loose.txt"]);
    }
}
