//! The full run: derive names, collect, plan, then apply or preview.
//!
//! Each stage takes the previous stage's value and returns its own, so a
//! plan can be inspected (and confirmed) before anything touches disk.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::classify::ContentClassifier;
use crate::cleanup::{self, CleanupReport};
use crate::collect::{self, CollectMode};
use crate::config::Settings;
use crate::error::Result;
use crate::exclude::ExclusionRules;
use crate::naming::ReplacementPair;
use crate::rename::{self, RenameOutcome, RenamePlan};
use crate::report::Warning;
use crate::rewrite::{self, RewriteOutcome, RewritePlan};

/// Everything a run would do, computed without side effects.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub root: PathBuf,
    pub names: ReplacementPair,
    pub mode: CollectMode,
    pub scanned_files: usize,
    pub scanned_dirs: usize,
    pub rewrites: RewritePlan,
    pub renames: RenamePlan,
}

impl Plan {
    /// No content edits and no renames: the tree is already scaffolded.
    pub fn is_empty(&self) -> bool {
        self.rewrites.edits.is_empty() && self.renames.renames.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub plan: Plan,
    pub dry_run: bool,
    pub applied: bool,
    pub rewrites: RewriteOutcome,
    pub renames: RenameOutcome,
    pub cleanup: CleanupReport,
}

impl RunReport {
    /// Every per-path problem from planning and applying, in pipeline order.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.plan
            .rewrites
            .warnings
            .iter()
            .chain(&self.plan.renames.collisions)
            .chain(&self.rewrites.warnings)
            .chain(&self.renames.warnings)
            .chain(&self.cleanup.warnings)
    }
}

/// Name of the repository directory; empty for a filesystem root.
pub fn repo_basename(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn derive_names(root: &Path, settings: &Settings) -> ReplacementPair {
    ReplacementPair::derive(&repo_basename(root), &settings.acronyms)
}

/// Build the exclusion rules for a run from settings.
pub fn exclusion_rules(settings: &Settings) -> ExclusionRules {
    ExclusionRules::standard().with_globs(settings.exclude.iter().cloned())
}

pub fn plan(
    root: &Path,
    names: &ReplacementPair,
    mode: CollectMode,
    rules: &ExclusionRules,
    classifier: &dyn ContentClassifier,
) -> Result<Plan> {
    let candidates = collect::collect(root, mode, rules)?;

    let rewrites = rewrite::plan_rewrites(root, &candidates.files, names, classifier);
    let renames = rename::plan_renames(root, &candidates, names);

    crate::log_status!(
        "plan",
        "{} file(s) to update, {} path(s) to rename",
        rewrites.edits.len(),
        renames.renames.len()
    );

    Ok(Plan {
        root: root.to_path_buf(),
        names: names.clone(),
        mode,
        scanned_files: candidates.files.len(),
        scanned_dirs: candidates.dirs.len(),
        rewrites,
        renames,
    })
}

/// Rewrite contents, rename paths, then clean up placeholders.
pub fn apply(plan: Plan, rules: &ExclusionRules, use_git: bool) -> RunReport {
    let rewrites = rewrite::apply_rewrites(&plan.root, &plan.rewrites);
    let renames = rename::apply_renames(&plan.root, &plan.renames, use_git);
    let cleanup = cleanup::cleanup(&plan.root, rules, false);

    RunReport {
        plan,
        dry_run: false,
        applied: true,
        rewrites,
        renames,
        cleanup,
    }
}

/// Report what [`apply`] would do without writing anything.
pub fn preview(plan: Plan, rules: &ExclusionRules) -> RunReport {
    let cleanup = cleanup::cleanup(&plan.root, rules, true);

    RunReport {
        plan,
        dry_run: true,
        applied: false,
        rewrites: RewriteOutcome::default(),
        renames: RenameOutcome::default(),
        cleanup,
    }
}
