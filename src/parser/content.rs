//! Content-block parser: extracts the labeled fields, deceased descriptors,
//! and trailing narrative from a press-release page body.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::deceased;
use crate::error::ParseError;
use crate::fields::{Field, FieldMap, FieldValue};
use crate::person;
use crate::text;

static CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCase(?:\s*(?:No\.?|Number))?\s*:?\s*(\d+-\d+)").unwrap());
static CRASHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Traffic Fatality\s*#\s*(\d+)").unwrap());
static DATE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bDate\s*:").unwrap());
static TIME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bTime\s*:").unwrap());
static LOCATION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLocation\s*:").unwrap());
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Case|Date|Time|Location|Deceased(?:\s+\d+)?)\s*:").unwrap()
});

/// How a labeled value is validated and stored.
enum Shape {
    Date,
    Time,
    Text,
}

/// Everything the content block yields for one page: the page-level raw
/// field map (including `Notes` and the raw `Deceased` list), one raw map
/// per decedent, and the non-fatal errors accumulated along the way.
#[derive(Debug)]
pub struct ContentFields {
    pub page: FieldMap,
    pub people: Vec<FieldMap>,
    pub errors: Vec<String>,
}

/// Parse the press-release body into raw fields.
///
/// The case number is the one mandatory field: a page without it is not a
/// fatality report, and [`ParseError::MissingCaseNumber`] propagates to the
/// caller. Every per-decedent failure is recovered locally and recorded.
pub fn parse_page_content(page: &str) -> Result<ContentFields, ParseError> {
    let page_text = text::extract(page);
    let full = &page_text.full;

    let case = CASE_RE
        .captures(full)
        .ok_or(ParseError::MissingCaseNumber)?;

    let mut fields = FieldMap::new();
    fields.insert(Field::Case, FieldValue::text(&case[1]));

    if let Some(caps) = CRASHES_RE.captures(full) {
        fields.insert(Field::Crashes, FieldValue::text(&caps[1]));
    }

    // Ordered label rules; evaluation order is fixed so behavior stays
    // deterministic when labels overlap.
    let rules: [(Field, &Regex, Shape); 3] = [
        (Field::Date, &DATE_LABEL_RE, Shape::Date),
        (Field::Time, &TIME_LABEL_RE, Shape::Time),
        (Field::Location, &LOCATION_LABEL_RE, Shape::Text),
    ];
    for (field, label_re, shape) in rules {
        let Some(value) = labeled_value(full, label_re) else {
            continue;
        };
        let value = match shape {
            Shape::Date => crate::dates::parse_date(value).map(FieldValue::Date),
            Shape::Time => crate::dates::parse_time(value).map(FieldValue::Time),
            Shape::Text => Some(FieldValue::text(value)),
        };
        if let Some(value) = value {
            fields.insert(field, value);
        }
    }

    let crash_date = fields.get(&Field::Date).and_then(FieldValue::as_date);

    let descriptors = deceased::split_deceased_field(&page_text.paragraphs);
    let mut people = Vec::new();
    let mut errors = Vec::new();
    for descriptor in &descriptors {
        match person::parse_person(descriptor, crash_date) {
            Ok(map) => people.push(map),
            Err(e) => {
                warn!(descriptor = descriptor.as_str(), "decedent extraction failed");
                errors.push(e.to_string());
            }
        }
    }

    if let Some(last) = descriptors.last() {
        if let Some(notes) = parse_notes_field(&page_text.paragraphs, last) {
            fields.insert(Field::Notes, FieldValue::text(notes));
        }
    }
    if !descriptors.is_empty() {
        fields.insert(Field::Deceased, FieldValue::List(descriptors));
    }

    Ok(ContentFields { page: fields, people, errors })
}

/// The narrative following the last deceased entry, through the end of the
/// content. Spans paragraph boundaries and never includes the descriptor.
pub fn parse_notes_field(paragraphs: &[String], last_descriptor: &str) -> Option<String> {
    let index = paragraphs.iter().position(|p| p.contains(last_descriptor))?;

    let mut chunks: Vec<String> = Vec::new();
    let within = &paragraphs[index];
    let offset = within.find(last_descriptor).unwrap() + last_descriptor.len();
    let remainder = text::collapse(&within[offset..]);
    if !remainder.is_empty() {
        chunks.push(remainder);
    }
    for paragraph in &paragraphs[index + 1..] {
        chunks.push(text::collapse(paragraph));
    }

    let notes = chunks.join("\n\n").trim().to_string();
    (!notes.is_empty()).then_some(notes)
}

fn labeled_value<'a>(full: &'a str, label_re: &Regex) -> Option<&'a str> {
    let m = label_re.find(full)?;
    let rest = &full[m.end()..];
    let mut end = rest.find('\n').unwrap_or(rest.len());
    if let Some(boundary) = BOUNDARY_RE.find(&rest[..end]) {
        end = boundary.start();
    }
    let value = rest[..end].trim();
    (!value.is_empty()).then_some(value)
}

// ── Tests ──
