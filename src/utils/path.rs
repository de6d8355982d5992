//! Root-relative path strings.
//!
//! Candidate paths travel through the pipeline as `/`-separated strings
//! relative to the repository root, the same shape `git ls-files` prints.

use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators.
///
/// Returns None when `path` does not live under `root`.
pub fn relative(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Number of segments in a relative path.
pub fn depth(rel: &str) -> usize {
    rel.split('/').filter(|s| !s.is_empty()).count()
}

/// Every proper ancestor directory of a relative path, deepest first.
///
/// `a/b/c.txt` yields `a/b`, then `a`.
pub fn ancestors(rel: &str) -> impl Iterator<Item = &str> {
    let mut current = rel;
    std::iter::from_fn(move || {
        let idx = current.rfind('/')?;
        current = &current[..idx];
        Some(current)
    })
}

/// Final segment of a relative path.
pub fn file_name(rel: &str) -> &str {
    rel.rsplit('/').next().unwrap_or(rel)
}
