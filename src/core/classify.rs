//! Binary-vs-text classification for content rewriting.
//!
//! Classification is best-effort. The default classifier asks the `file`
//! utility for the content encoding; when `file` is missing or fails, the
//! file is treated as text. Classification never fails a run.

use serde::Serialize;
use std::cell::Cell;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Binary,
}

pub trait ContentClassifier {
    fn classify(&self, path: &Path) -> ContentKind;
}

/// Probe the encoding with `file --brief --mime-encoding`.
pub struct EncodingProbe {
    program: String,
    missing: Cell<bool>,
}

impl EncodingProbe {
    pub fn new() -> Self {
        Self::with_program("file")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        EncodingProbe {
            program: program.into(),
            missing: Cell::new(false),
        }
    }
}

impl Default for EncodingProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentClassifier for EncodingProbe {
    fn classify(&self, path: &Path) -> ContentKind {
        if self.missing.get() {
            return ContentKind::Text;
        }

        let output = match Command::new(&self.program)
            .args(["--brief", "--mime-encoding"])
            .arg(path)
            .output()
        {
            Ok(output) => output,
            Err(_) => {
                // Probe not installed; stop spawning it for the rest of the run.
                self.missing.set(true);
                crate::log_status!(
                    "classify",
                    "'{}' unavailable, treating all files as text",
                    self.program
                );
                return ContentKind::Text;
            }
        };

        if !output.status.success() {
            return ContentKind::Text;
        }

        if String::from_utf8_lossy(&output.stdout).trim() == "binary" {
            ContentKind::Binary
        } else {
            ContentKind::Text
        }
    }
}

/// Treats everything as text. Used when probing is disabled.
pub struct AssumeText;

impl ContentClassifier for AssumeText {
    fn classify(&self, _path: &Path) -> ContentKind {
        ContentKind::Text
    }
}
