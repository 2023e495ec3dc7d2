//! Two-source parsing pipeline: content block + social-post metadata →
//! sanitized, merged fatality records, one per decedent.

pub mod content;
pub mod deceased;
pub mod merge;
pub mod twitter;

use tracing::debug;

use crate::error::ParseError;
use crate::fields::{FatalityRecord, Field, FieldMap};

/// Lazy sequence of merged records for one page.
///
/// Single-pass and non-restartable: each decedent's record is assembled on
/// demand, and once the iterator is exhausted it stays exhausted. The
/// non-fatal errors accumulated while parsing remain inspectable through
/// [`Records::errors`] at any point.
#[derive(Debug)]
pub struct Records {
    shared: FieldMap,
    people: std::vec::IntoIter<FieldMap>,
    errors: Vec<String>,
}

impl Records {
    /// Non-fatal parse errors collected while extracting decedents.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Iterator for Records {
    type Item = FatalityRecord;

    fn next(&mut self) -> Option<FatalityRecord> {
        let person = self.people.next()?;
        // Shared page-level fields are duplicated by value into every
        // decedent's record; identity fields come from the person map and
        // take precedence over anything page-wide.
        let mut record = self.shared.clone();
        record.extend(person);
        record.remove(&Field::Deceased);
        Some(record)
    }
}

/// Parse one press-release page into fatality records.
///
/// Both pipelines run over the same input: the content block provides the
/// narrative and per-decedent identity, the social-post metadata fills in
/// and overrides the shared incident fields. The `url` is used only to
/// annotate diagnostics.
///
/// A page without any case-number pattern fails with
/// [`ParseError::MissingCaseNumber`]; a page with a case number but no
/// usable decedents yields an empty (but valid) sequence.
pub fn parse_page(page: &str, url: Option<&str>) -> Result<Records, ParseError> {
    let parsed = content::parse_page_content(page)?;
    let social = twitter::parse_twitter_fields(page);

    let content_fields = merge::sanitize_fatality_entity(parsed.page);
    let social_fields = merge::sanitize_fatality_entity(social);
    let shared = merge::merge_fields(&content_fields, &social_fields);

    let people: Vec<FieldMap> = parsed
        .people
        .into_iter()
        .map(merge::sanitize_fatality_entity)
        .collect();

    debug!(
        url = url.unwrap_or("<unknown>"),
        decedents = people.len(),
        errors = parsed.errors.len(),
        "parsed page"
    );

    Ok(Records {
        shared,
        people: people.into_iter(),
        errors: parsed.errors,
    })
}

// ── Tests ──
