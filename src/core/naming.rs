//! Project naming: turn the repository directory name into replacement names.
//!
//! A repository cloned as `my-api-tool` yields:
//! - `template` → `my-api-tool` (the directory name, verbatim)
//! - `Template` → `My API Tool` (title, with acronym words upper-cased)

use memchr::memmem;
use serde::Serialize;
use std::collections::BTreeSet;

/// Lowercase placeholder token.
pub const OLD_LOWER: &str = "template";
/// Title-case placeholder token.
pub const OLD_TITLE: &str = "Template";

pub const DEFAULT_ACRONYMS: &[&str] = &["ai", "api", "http", "https", "xml", "json", "sql", "id", "ip"];

/// Words rendered fully upper-case in a derived title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AcronymSet(BTreeSet<String>);

impl AcronymSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AcronymSet(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list such as `ai,api,gpu`.
    pub fn parse_list(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AcronymSet {
    fn default() -> Self {
        Self::new(DEFAULT_ACRONYMS.iter())
    }
}

/// Per-token occurrence counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub lower: usize,
    pub title: usize,
}

impl TokenCounts {
    pub fn total(&self) -> usize {
        self.lower + self.title
    }
}

/// The two placeholder tokens and what they become.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementPair {
    pub old_lower: String,
    pub new_lower: String,
    pub old_title: String,
    pub new_title: String,
}

impl ReplacementPair {
    /// Derive both replacement names from a repository directory name.
    pub fn derive(basename: &str, acronyms: &AcronymSet) -> Self {
        ReplacementPair {
            old_lower: OLD_LOWER.to_string(),
            new_lower: basename.to_string(),
            old_title: OLD_TITLE.to_string(),
            new_title: derive_title(basename, acronyms),
        }
    }

    /// True when applying the pair cannot change anything: an empty
    /// directory name, or a repository that is itself named `template`.
    pub fn is_noop(&self) -> bool {
        self.new_lower.is_empty()
            || (self.new_lower == self.old_lower && self.new_title == self.old_title)
    }

    /// Count exact, case-sensitive occurrences of each token.
    ///
    /// Works on raw bytes so content in any ASCII-compatible encoding is
    /// counted, not only UTF-8.
    pub fn count(&self, content: &[u8]) -> TokenCounts {
        TokenCounts {
            lower: memmem::find_iter(content, self.old_lower.as_bytes()).count(),
            title: memmem::find_iter(content, self.old_title.as_bytes()).count(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.old_lower.as_str()) || text.contains(self.old_title.as_str())
    }

    /// Replace every `old_lower`, then every `old_title`.
    pub fn apply(&self, text: &str) -> String {
        text.replace(self.old_lower.as_str(), &self.new_lower)
            .replace(self.old_title.as_str(), &self.new_title)
    }

    /// Byte-level [`apply`](Self::apply) for file content.
    pub fn apply_bytes(&self, content: &[u8]) -> Vec<u8> {
        let lowered = replace_all(content, self.old_lower.as_bytes(), self.new_lower.as_bytes());
        replace_all(&lowered, self.old_title.as_bytes(), self.new_title.as_bytes())
    }
}

fn replace_all(haystack: &[u8], needle: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for at in memmem::find_iter(haystack, needle) {
        out.extend_from_slice(&haystack[last..at]);
        out.extend_from_slice(with);
        last = at + needle.len();
    }
    out.extend_from_slice(&haystack[last..]);
    out
}

/// Build a display title from a hyphenated name.
///
/// Empty words (doubled, leading or trailing hyphens) are dropped. Acronym
/// words are upper-cased entirely; every other word only has its first
/// character upper-cased.
pub fn derive_title(basename: &str, acronyms: &AcronymSet) -> String {
    basename
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if acronyms.contains(word) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}
