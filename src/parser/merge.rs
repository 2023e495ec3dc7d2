//! Field sanitization and the two-source merge.

use crate::fields::{Field, FieldMap, FieldValue};

/// Which source wins when both supply a value for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precedence {
    /// The social post is authoritative (it is machine-filled from the
    /// incident system, the page body is hand-edited).
    SocialPost,
    /// The page content is authoritative (the social post truncates and
    /// never carries full identity details).
    PageContent,
}

fn precedence(field: Field) -> Precedence {
    match field {
        Field::Case
        | Field::Crashes
        | Field::Date
        | Field::Time
        | Field::Location
        | Field::Notes => Precedence::SocialPost,
        _ => Precedence::PageContent,
    }
}

/// Normalize a raw field map: drop null and blank values, join string
/// lists with single spaces, pass structured values through unchanged.
/// Pure, and idempotent: sanitizing a sanitized map is a no-op.
pub fn sanitize_fatality_entity(fields: FieldMap) -> FieldMap {
    fields
        .into_iter()
        .filter_map(|(field, value)| {
            let value = match value {
                FieldValue::Null => return None,
                FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
                FieldValue::List(items) => FieldValue::Text(items.join(" ").trim().to_string()),
                other => other,
            };
            if matches!(&value, FieldValue::Text(s) if s.is_empty()) {
                return None;
            }
            Some((field, value))
        })
        .collect()
}

/// Merge the sanitized content-block map with the sanitized social-post
/// map under the per-field precedence table. Either side fills in whatever
/// the other omits.
pub fn merge_fields(content: &FieldMap, social: &FieldMap) -> FieldMap {
    let mut merged = content.clone();
    for (field, value) in social {
        if precedence(*field) == Precedence::SocialPost || !merged.contains_key(field) {
            merged.insert(*field, value.clone());
        }
    }
    merged
}

// ── Tests ──
