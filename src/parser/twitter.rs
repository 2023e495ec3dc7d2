//! Social-post metadata parser.
//!
//! Each press release is promoted with a Twitter card whose title carries
//! the year's crash count and whose description compresses the main fields
//! into one `Label: value` line. Both tags ride along in the page markup,
//! so the same page feeds this parser and the content-block parser.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::dates;
use crate::fields::{Field, FieldMap, FieldValue};
use crate::person;
use crate::text;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Traffic Fatality\s*#\s*(\d+)").unwrap());
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Case|Date|Time|Location|Deceased)(?:\s+\d+)?\s*:").unwrap()
});
static CASE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+-\d+").unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="twitter:title"], meta[property="twitter:title"]"#).unwrap()
});
static DESCRIPTION_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="twitter:description"], meta[property="twitter:description"]"#)
        .unwrap()
});

/// Extract the crash sequence number from a card title. Absent or
/// unmatched titles yield an empty map, not an error.
pub fn parse_twitter_title(title: Option<&str>) -> FieldMap {
    let mut fields = FieldMap::new();
    if let Some(caps) = title.and_then(|t| TITLE_RE.captures(t)) {
        fields.insert(Field::Crashes, FieldValue::text(&caps[1]));
    }
    fields
}

/// Parse the card description: space-separated `Label: value` tokens with
/// no delimiter other than the next recognized label, which bounds the
/// current value (values themselves contain spaces and punctuation).
pub fn parse_twitter_description(description: Option<&str>) -> FieldMap {
    let mut fields = FieldMap::new();
    let Some(description) = description else {
        return fields;
    };
    let line = text::collapse(description);

    let labels: Vec<regex::Captures> = LABEL_RE.captures_iter(&line).collect();
    for (i, caps) in labels.iter().enumerate() {
        let whole = caps.get(0).unwrap();
        let end = labels
            .get(i + 1)
            .map_or(line.len(), |next| next.get(0).unwrap().start());
        let value = line[whole.end()..end].trim();
        if value.is_empty() {
            continue;
        }
        match caps[1].to_lowercase().as_str() {
            "case" => {
                if let Some(case) = CASE_NUMBER_RE.find(value) {
                    fields.insert(Field::Case, FieldValue::text(case.as_str()));
                }
            }
            "date" => {
                if let Some(date) = dates::parse_date(value) {
                    fields.insert(Field::Date, FieldValue::Date(date));
                }
            }
            "time" => {
                if let Some(time) = dates::parse_time(value) {
                    fields.insert(Field::Time, FieldValue::Time(time));
                }
            }
            "location" => {
                fields.insert(Field::Location, FieldValue::text(value));
            }
            "deceased" => parse_deceased_value(value, &mut fields),
            _ => {}
        }
    }
    fields
}

/// Parse the twitter fields straight off a page's meta tags.
pub fn parse_twitter_fields(page: &str) -> FieldMap {
    let doc = Html::parse_document(page);
    let title = meta_content(&doc, &TITLE_SEL);
    let description = meta_content(&doc, &DESCRIPTION_SEL);

    let mut fields = parse_twitter_title(title.as_deref());
    fields.extend(parse_twitter_description(description.as_deref()));
    fields
}

/// The deceased value runs to the end of the description, so the labeled
/// DOB inside it does double duty: it completes the descriptor and bounds
/// it. Whatever follows the date is the narrative. Identity fields other
/// than the DOB are left to the content-block pipeline.
fn parse_deceased_value(value: &str, fields: &mut FieldMap) {
    let mut descriptor = value;
    if let Some((label_start, tail)) = person::split_dob_label(value) {
        descriptor = value[..label_start].trim_end();
        if let Some((range, date)) = dates::find_date(tail) {
            fields.entry(Field::Dob).or_insert(FieldValue::Date(date));
            let rest = tail[range.end..].trim();
            // Short trailing fragments ("(passenger)") belong to the
            // descriptor, not the narrative.
            if rest.split_whitespace().count() >= 3 {
                fields.entry(Field::Notes).or_insert(FieldValue::text(rest));
            }
        }
    }
    if descriptor.is_empty() {
        return;
    }
    match fields.entry(Field::Deceased).or_insert(FieldValue::List(Vec::new())) {
        FieldValue::List(items) => items.push(descriptor.to_string()),
        _ => {}
    }
}

fn meta_content(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

// ── Tests ──
