//! Regex scanners over raw template text.
//!
//! Four independent passes, each first-match, left to right, non-overlapping:
//! - `{{#each P}}…{{/each}}` loops (non-greedy, so nested loops pair wrongly)
//! - `{{P}}` bare references
//! - `{{#if P}}` and `{{#unless P}}` guards (close markers are not required)
//!
//! Every scan restarts from the beginning of the text.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Regex};

use crate::path::Path;

static LOOP_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#each\s+([\w.]+)\}\}(.*?)\{\{/each\}\}").unwrap()
});
static VARIABLE_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([\w.\[\]]+)\}\}").unwrap());
static IF_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{#if\s+([\w.]+)\}\}").unwrap());
static UNLESS_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{#unless\s+([\w.]+)\}\}").unwrap());
static SELF_FIELD_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{this\.([\w.]+)\}\}").unwrap());

/// Bare block keywords that look like references but are control markers.
const CONTROL_KEYWORDS: &[&str] = &["else"];

const BARE_SELF_MARKER: &str = "{{this}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Loop,
    Variable,
    If,
    Unless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'t> {
    pub path: Path,
    /// Raw inner text; only loops carry one.
    pub body: Option<&'t str>,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Pattern::Loop => &LOOP_RX,
            Pattern::Variable => &VARIABLE_RX,
            Pattern::If => &IF_RX,
            Pattern::Unless => &UNLESS_RX,
        }
    }

    pub fn scan(self, text: &str) -> Matches<'_> {
        Matches { pattern: self, inner: self.regex().captures_iter(text) }
    }
}

/// Lazy sequence of extractions for one pattern.
pub struct Matches<'t> {
    pattern: Pattern,
    inner: CaptureMatches<'static, 't>,
}

impl<'t> Iterator for Matches<'t> {
    type Item = Extracted<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.inner.by_ref() {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let Some(path) = Path::parse(raw) else {
                tracing::trace!(raw, pattern = ?self.pattern, "skipping malformed path");
                continue;
            };
            if self.pattern == Pattern::Variable
                && (path.is_self_reference() || CONTROL_KEYWORDS.contains(&raw))
            {
                continue;
            }
            let body = match self.pattern {
                Pattern::Loop => caps.get(2).map(|m| m.as_str()),
                _ => None,
            };
            return Some(Extracted { path, body });
        }
        None
    }
}

/// Every path guarded by an `if` or `unless` anywhere in `text`.
pub fn guard_paths(text: &str) -> HashSet<Path> {
    Pattern::If
        .scan(text)
        .chain(Pattern::Unless.scan(text))
        .map(|x| x.path)
        .collect()
}

/// `{{this}}` with no field suffix.
pub fn has_bare_self_reference(body: &str) -> bool {
    body.contains(BARE_SELF_MARKER)
}

/// Suffix paths of every `{{this.sub.path}}` in a loop body.
pub fn self_references(body: &str) -> impl Iterator<Item = Path> + '_ {
    SELF_FIELD_RX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).and_then(|m| Path::parse(m.as_str())))
}
