//! Exclusion rules shared by collection, rewriting, renaming and cleanup.
//!
//! Every phase asks the same question of a root-relative path: is it off
//! limits? The rules are built once per run and evaluated per candidate.

use std::path::Path;

use crate::utils::path as rel_path;

/// Reserved directory at the repository root. Never scanned, rewritten,
/// renamed or cleaned up; it also hosts the optional `config.json`.
pub const RESERVED_DIR: &str = ".detemplate";

/// Version-control metadata directory.
pub const VCS_DIR: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// A root-relative directory and everything beneath it.
    Subtree(String),
    /// Exactly one root-relative path.
    Path(String),
    /// Any path with a segment of this name, at any depth.
    Segment(String),
    /// Glob matched against the whole root-relative path.
    Glob(String),
}

impl ExclusionRule {
    pub fn matches(&self, rel: &str) -> bool {
        match self {
            ExclusionRule::Subtree(dir) => {
                rel == dir
                    || rel
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            ExclusionRule::Path(path) => rel == path,
            ExclusionRule::Segment(name) => rel.split('/').any(|segment| segment == name),
            ExclusionRule::Glob(pattern) => glob_match::glob_match(pattern, rel),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    /// VCS metadata anywhere, plus the reserved directory at the root.
    pub fn standard() -> Self {
        ExclusionRules::default()
            .with(ExclusionRule::Segment(VCS_DIR.to_string()))
            .with(ExclusionRule::Subtree(RESERVED_DIR.to_string()))
    }

    pub fn with(mut self, rule: ExclusionRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Add user-configured glob patterns.
    pub fn with_globs<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        patterns
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.trim().is_empty())
            .fold(self, |rules, p| rules.with(ExclusionRule::Glob(p)))
    }

    /// Exclude the running executable when it lives inside the repository.
    ///
    /// Covers each form the program may have been invoked by: the resolved
    /// absolute executable path, the `argv[0]` path (relative to `cwd` when
    /// not absolute), and the bare file name at the repository root.
    pub fn with_self(
        mut self,
        root: &Path,
        cwd: &Path,
        exe: Option<&Path>,
        argv0: Option<&str>,
    ) -> Self {
        let mut invoked = Vec::new();
        if let Some(exe) = exe {
            invoked.push(exe.to_path_buf());
        }
        if let Some(argv0) = argv0.filter(|a| a.contains('/') || a.contains('\\')) {
            invoked.push(cwd.join(argv0));
        }

        for path in invoked {
            let resolved = path.canonicalize().unwrap_or(path);
            let Some(rel) = rel_path::relative(root, &resolved) else {
                continue;
            };
            if rel.is_empty() {
                continue;
            }
            let name = rel_path::file_name(&rel).to_string();
            self = self
                .with(ExclusionRule::Path(rel))
                .with(ExclusionRule::Path(name));
        }

        self
    }

    pub fn is_excluded(&self, rel: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(rel))
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }
}
