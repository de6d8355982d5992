//! Human-readable rendering of a scaffold run.

use std::fmt::Write as _;
use std::io::{self, Write};

use detemplate::{Error, Result, RunReport};

use crate::commands::scaffold::ScaffoldOutput;

pub fn render(output: &ScaffoldOutput) -> String {
    let mut out = String::new();

    match output {
        ScaffoldOutput::NothingToDo {
            root,
            names,
            skipped_binary,
            skipped_links,
            ..
        } => {
            let _ = writeln!(
                out,
                "Nothing to do: no '{}' or '{}' to replace in {}",
                names.old_lower,
                names.old_title,
                root.display()
            );
            render_skipped(&mut out, skipped_binary, skipped_links);
        }
        ScaffoldOutput::Aborted {
            pending_edits,
            pending_renames,
            ..
        } => {
            let _ = writeln!(
                out,
                "Aborted; no changes made ({} file(s) and {} path(s) pending). Re-run with --yes to apply.",
                pending_edits, pending_renames
            );
        }
        ScaffoldOutput::Completed { report } if report.dry_run => render_preview(&mut out, report),
        ScaffoldOutput::Completed { report } => render_applied(&mut out, report),
    }

    out
}

fn render_preview(out: &mut String, report: &RunReport) {
    let plan = &report.plan;

    for edit in &plan.rewrites.edits {
        let _ = writeln!(
            out,
            "would update {} ({} replacement(s))",
            edit.file,
            edit.counts.total()
        );
    }
    for rename in &plan.renames.renames {
        let _ = writeln!(out, "would rename {} → {}", rename.from, rename.to);
    }
    for dir in &report.cleanup.removed {
        let _ = writeln!(out, "would remove {}/", dir);
    }
    render_skipped(
        out,
        &report.plan.rewrites.skipped_binary,
        &report.plan.rewrites.skipped_links,
    );
    render_warnings(out, report);

    let _ = writeln!(
        out,
        "Dry run: {} replacement(s) in {} file(s), {} path(s) to rename in {}",
        plan.rewrites.total_replacements(),
        plan.rewrites.edits.len(),
        plan.renames.renames.len(),
        plan.root.display()
    );
}

fn render_applied(out: &mut String, report: &RunReport) {
    for file in &report.rewrites.updated {
        let _ = writeln!(out, "updated {}", file);
    }
    for rename in &report.renames.renamed {
        let _ = writeln!(out, "renamed {} → {}", rename.from, rename.to);
    }
    for merged in &report.renames.merged {
        let _ = writeln!(out, "merged {} into {}", merged.from, merged.to);
    }
    for dir in &report.cleanup.removed {
        let _ = writeln!(out, "removed {}/", dir);
    }
    render_skipped(
        out,
        &report.plan.rewrites.skipped_binary,
        &report.plan.rewrites.skipped_links,
    );
    render_warnings(out, report);

    let names = &report.plan.names;
    let _ = writeln!(
        out,
        "Done: '{}' → '{}', '{}' → '{}'; {} file(s) updated, {} path(s) renamed, {} warning(s)",
        names.old_lower,
        names.new_lower,
        names.old_title,
        names.new_title,
        report.rewrites.updated.len(),
        report.renames.renamed.len(),
        report.warnings().count()
    );
}

fn render_skipped(out: &mut String, binary: &[String], links: &[String]) {
    for file in binary {
        let _ = writeln!(out, "skipped {} (binary content)", file);
    }
    for file in links {
        let _ = writeln!(out, "skipped {} (symbolic link, target not rewritten)", file);
    }
}

fn render_warnings(out: &mut String, report: &RunReport) {
    for warning in report.warnings() {
        let _ = writeln!(out, "warning: {}: {}", warning.path, warning.message);
    }
}

pub fn print(output: &ScaffoldOutput) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = handle.write_all(render(output).as_bytes()) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_error(err: &Error) {
    eprintln!("error: {}", err.describe());
    for hint in &err.hints {
        eprintln!("hint: {}", hint.message);
    }
}
