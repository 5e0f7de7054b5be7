//! XHTML document reading: flatten `<span>` elements into runs.

use super::Run;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::borrow::Cow;

/// The HTML parser synthesizes a body for any input, so presence is checked
/// on the source text.
static BODY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<body[\s>/]").expect("body regex should compile"));

/// XHTML self-closing tag, e.g. `<span class="c1"/>`.
static SELF_CLOSING_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9:_-]*)((?:\s+[^<>"']*(?:"[^"]*"|'[^']*')?)*)\s*/>"#)
        .expect("self-closing regex should compile")
});

/// Elements the HTML parser already treats as empty.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Expand `<tag .../>` into `<tag ...></tag>` for non-void elements.
///
/// The HTML5 tree builder ignores `/>` on non-void elements, so an empty
/// `<span/>` would otherwise stay open and swallow its following siblings.
fn expand_self_closing(xhtml: &str) -> Cow<'_, str> {
    SELF_CLOSING_TAG.replace_all(xhtml, |caps: &Captures| {
        let name = &caps[1];
        if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            caps[0].to_string()
        } else {
            format!("<{}{}></{}>", name, &caps[2], name)
        }
    })
}

/// Read every span under `<body>` in document order.
///
/// Nested spans are yielded as their own runs after their parent, whose text
/// already includes theirs. Returns `None` when the document has no body.
pub fn read_runs(xhtml: &str) -> Option<Vec<Run>> {
    if !BODY_TAG.is_match(xhtml) {
        return None;
    }

    let document = Html::parse_document(&expand_self_closing(xhtml));
    let spans = Selector::parse("body span").expect("span selector should parse");

    let runs = document
        .select(&spans)
        .map(|span| Run {
            classes: span.value().classes().map(str::to_string).collect(),
            text: span.text().collect(),
        })
        .collect();

    Some(runs)
}
