use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use detemplate::classify::EncodingProbe;
use detemplate::collect::CollectMode;
use detemplate::config::{Settings, ACRONYM_ENV};
use detemplate::error::Error;
use detemplate::exclude::ExclusionRules;
use detemplate::pipeline::{self, Plan, RunReport};
use detemplate::prompt::Confirmation;
use detemplate::{git, ReplacementPair};

use crate::commands::CmdResult;
use crate::tty;

#[derive(Args, Debug, Default)]
pub struct ScaffoldArgs {
    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Scan every file under the repository instead of tracked and unignored files
    #[arg(long)]
    pub all: bool,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the JSON response envelope instead of text
    #[arg(long)]
    pub json: bool,

    /// Start repository discovery here instead of the current directory
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScaffoldOutput {
    /// Nothing in scope can be rewritten or renamed.
    NothingToDo {
        root: PathBuf,
        names: ReplacementPair,
        mode: CollectMode,
        /// Files that contain tokens but were left alone.
        skipped_binary: Vec<String>,
        skipped_links: Vec<String>,
    },
    /// The confirmation prompt was declined (or could not be shown).
    Aborted {
        root: PathBuf,
        names: ReplacementPair,
        pending_edits: usize,
        pending_renames: usize,
    },
    Completed {
        report: RunReport,
    },
}

pub fn run(args: ScaffoldArgs) -> CmdResult<ScaffoldOutput> {
    if args.json && !args.yes && !args.dry_run {
        return Err(Error::validation_invalid_argument(
            "json",
            "--json cannot be combined with the interactive confirmation prompt",
            None,
            Some(vec![
                "Add --yes to apply without confirmation".to_string(),
                "Add --dry-run to preview only".to_string(),
            ]),
        ));
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::internal_io(e.to_string(), Some("read current dir".to_string())))?;
    let start = match &args.path {
        Some(path) => cwd.join(path),
        None => cwd.clone(),
    };

    let root = git::find_root(&start)?;
    let settings = Settings::resolve(&root, std::env::var(ACRONYM_ENV).ok().as_deref())?;
    let rules = run_rules(&root, &cwd, &settings);
    let names = pipeline::derive_names(&root, &settings);
    let mode = CollectMode::from_all_flag(args.all);

    let classifier = EncodingProbe::new();
    let plan = pipeline::plan(&root, &names, mode, &rules, &classifier)?;

    if plan.is_empty() {
        return Ok((
            ScaffoldOutput::NothingToDo {
                root,
                names,
                mode,
                skipped_binary: plan.rewrites.skipped_binary,
                skipped_links: plan.rewrites.skipped_links,
            },
            0,
        ));
    }

    if args.dry_run {
        return Ok((
            ScaffoldOutput::Completed {
                report: pipeline::preview(plan, &rules),
            },
            0,
        ));
    }

    if !args.yes && !confirm(&plan) {
        return Ok((
            ScaffoldOutput::Aborted {
                pending_edits: plan.rewrites.edits.len(),
                pending_renames: plan.renames.renames.len(),
                root,
                names,
            },
            0,
        ));
    }

    let report = pipeline::apply(plan, &rules, git::is_available());
    Ok((ScaffoldOutput::Completed { report }, 0))
}

fn run_rules(root: &Path, cwd: &Path, settings: &Settings) -> ExclusionRules {
    let exe = std::env::current_exe().ok();
    let argv0 = std::env::args_os()
        .next()
        .map(|a| a.to_string_lossy().into_owned());

    pipeline::exclusion_rules(settings).with_self(root, cwd, exe.as_deref(), argv0.as_deref())
}

/// Without a terminal there is nobody to ask, so the run is declined.
fn confirm(plan: &Plan) -> bool {
    tty::require_tty_for_interactive() && Confirmation::for_plan(plan).ask_terminal()
}
