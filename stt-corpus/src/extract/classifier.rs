//! Role classification for a single span run.

use super::Run;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading "<digits>." numbering on title runs.
static NUMBERING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("numbering regex should compile"));

/// What a run contributes to the record being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Starts a new record; carries the title with numbering removed.
    Title(String),
    /// A standalone body line.
    Body,
    /// A fragment split out of a paragraph that must be stitched to its neighbours.
    ContinuationBody,
    /// Empty, or tagged with nothing we recognise.
    Ignorable,
}

/// Style tags that give a run its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTags {
    pub title: Vec<String>,
    pub body: Vec<String>,
    pub continuation: String,
}

impl Default for StyleTags {
    fn default() -> Self {
        Self {
            title: vec!["c3".to_string(), "c35".to_string()],
            body: vec!["c1".to_string(), "c24".to_string()],
            continuation: "c24".to_string(),
        }
    }
}

/// Classify one run.
///
/// Order matters: emptiness first, then title, continuation, body. The
/// continuation tag may also appear in the body tag set.
pub fn classify(run: &Run, tags: &StyleTags) -> Classification {
    let text = run.text.trim();
    if text.is_empty() {
        return Classification::Ignorable;
    }

    if tags.title.iter().any(|tag| run.has_class(tag)) {
        return match title_text(text) {
            Some(title) => Classification::Title(title),
            None => Classification::Ignorable,
        };
    }

    if run.has_class(&tags.continuation) {
        return Classification::ContinuationBody;
    }

    if tags.body.iter().any(|tag| run.has_class(tag)) {
        return Classification::Body;
    }

    Classification::Ignorable
}

/// Title line for a trimmed title run, or `None` if only numbering remains.
fn title_text(text: &str) -> Option<String> {
    let flattened: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{00a0}' => ' ',
            _ => c,
        })
        .collect();
    let title = NUMBERING_PREFIX.replace(flattened.trim(), "");
    let title = title.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
