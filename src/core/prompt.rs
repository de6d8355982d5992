//! Confirmation of a plan before anything is written.

use std::io::{self, BufRead, Write};

use crate::pipeline::Plan;

/// What the user is asked to approve: a header, one line per pending change,
/// and the closing question. Declining is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub header: String,
    pub items: Vec<String>,
    pub question: String,
}

impl Confirmation {
    pub fn for_plan(plan: &Plan) -> Self {
        let names = &plan.names;
        let mut items: Vec<String> = plan
            .rewrites
            .edits
            .iter()
            .map(|e| format!("update {} ({} replacement(s))", e.file, e.counts.total()))
            .collect();
        items.extend(
            plan.renames
                .renames
                .iter()
                .map(|r| format!("rename {} → {}", r.from, r.to)),
        );
        items.extend(
            plan.renames
                .collisions
                .iter()
                .map(|w| format!("skip {}: {}", w.path, w.message)),
        );

        Confirmation {
            header: format!(
                "Replacing '{}' → '{}' and '{}' → '{}' in {}:",
                names.old_lower,
                names.new_lower,
                names.old_title,
                names.new_title,
                plan.root.display()
            ),
            items,
            question: "Apply these changes?".to_string(),
        }
    }

    /// Show the list on `out` and read one answer line from `input`.
    ///
    /// Only `y`/`yes` (any case) accepts; end of input declines.
    pub fn ask<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> bool {
        let shown = self.render(out).and_then(|()| out.flush());
        if shown.is_err() {
            return false;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => accepts(&answer),
            Err(_) => false,
        }
    }

    /// [`ask`](Self::ask) on the terminal: list on stderr, answer from stdin.
    pub fn ask_terminal(&self) -> bool {
        let stdin = io::stdin();
        self.ask(&mut stdin.lock(), &mut io::stderr())
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.header)?;
        for item in &self.items {
            writeln!(out, "  - {}", item)?;
        }
        write!(out, "\n{} [y/N]: ", self.question)
    }
}

fn accepts(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
