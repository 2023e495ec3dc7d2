//! Isolates and splits the "Deceased" segment of a press release.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static DECEASED_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDeceased\s*(\d*)\s*:").unwrap());
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap());

struct LabelAt {
    para: usize,
    start: usize,
    end: usize,
    numbered: bool,
}

/// Split the deceased segment into one descriptor per decedent, in document
/// order. Numbered labels ("Deceased 1:", "Deceased 2:") each start a
/// descriptor; an unnumbered "Deceased:" starts exactly one.
///
/// Known limitation, kept on purpose: an unnumbered label introducing
/// several decedents on separate lines cannot be split reliably, so the
/// whole segment is rejected and an empty sequence returned.
pub fn split_deceased_field(paragraphs: &[String]) -> Vec<String> {
    let mut labels: Vec<LabelAt> = Vec::new();
    for (para, text) in paragraphs.iter().enumerate() {
        for caps in DECEASED_LABEL_RE.captures_iter(text) {
            let m = caps.get(0).unwrap();
            labels.push(LabelAt {
                para,
                start: m.start(),
                end: m.end(),
                numbered: !caps[1].is_empty(),
            });
        }
    }
    if labels.is_empty() {
        return Vec::new();
    }

    let mut descriptors = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let text = &paragraphs[label.para];
        // The next label in the same paragraph bounds this segment;
        // otherwise it runs to the end of the paragraph.
        let end = labels
            .get(i + 1)
            .filter(|next| next.para == label.para)
            .map_or(text.len(), |next| next.start);
        let segment = &text[label.end..end];

        let mut lines = segment.lines().map(str::trim).filter(|l| !l.is_empty());
        let Some(descriptor) = lines.next() else { continue };

        if !label.numbered && lines.any(looks_like_inline_descriptor) {
            debug!("unnumbered deceased label followed by an inline list; refusing to split");
            return Vec::new();
        }
        descriptors.push(descriptor.to_string());
    }
    descriptors
}

/// A line that reads like another decedent rather than narrative: either
/// pipe-delimited or carrying a numeric date of birth.
fn looks_like_inline_descriptor(line: &str) -> bool {
    line.contains('|') || NUMERIC_DATE_RE.is_match(line)
}
