//! Flattens press-release markup into plain paragraph text.
//!
//! The pages this crate consumes are hand-edited and inconsistently marked
//! up: labels wrapped in stray `<strong>`/`<span>` tags, `&nbsp;` padding,
//! and `<br>` line breaks doing the work of paragraphs. Tree construction
//! itself is delegated to the `scraper` crate; this module only turns the
//! tree into text the pattern rules can run over.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());
static P_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Flattened page text. `paragraphs` holds one entry per `<p>` element in
/// document order (or the whole text when the input has no paragraphs);
/// newlines inside a paragraph mark `<br>` breaks. `full` is the complete
/// document text for patterns that may match outside any paragraph.
pub struct PageText {
    pub paragraphs: Vec<String>,
    pub full: String,
}

pub fn extract(page: &str) -> PageText {
    // Source newlines are insignificant in markup; flatten them first so
    // the only newlines surviving into text nodes come from <br> tags.
    // Adjacent tags get a separating space so the flattened document text
    // never glues two blocks into one word.
    let flat = page.replace(['\r', '\n', '\t'], " ").replace("><", "> <");
    let flat = BR_RE.replace_all(&flat, "\n");
    let doc = Html::parse_document(&flat);

    let mut paragraphs: Vec<String> = doc
        .select(&P_SEL)
        .map(|p| tidy(&p.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .collect();

    let full = tidy(&doc.root_element().text().collect::<String>());
    if paragraphs.is_empty() && !full.is_empty() {
        paragraphs.push(full.clone());
    }

    PageText { paragraphs, full }
}

/// Collapse all whitespace runs (including `&nbsp;` and newlines) into
/// single spaces. Used for single-line inputs such as meta-tag content.
pub fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize one block of text: nbsp to space, space runs collapsed, each
/// line trimmed, empty lines dropped.
fn tidy(text: &str) -> String {
    text.lines()
        .map(|line| SPACE_RUN_RE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
