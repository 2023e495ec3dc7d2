//! Derives identity fields from a decedent descriptor string.
//!
//! The press releases describe decedents in a handful of loose grammars:
//!
//! - `Corbin Sabillon-Garcia, White male, DOB 02/09/80`
//! - `Cedric Benson | Black male | 12/28/1982`
//! - `Eva Marie Gonzales, W/F, DOB: 01-22-1961 (passenger)`
//! - `Hispanic male, 19 years of age`

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::dates;
use crate::error::ParseError;
use crate::fields::{Field, FieldMap, FieldValue};

static DOB_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(?\s*\bD\.?\s*O\.?\s*B\b\.?\s*:?\s*").unwrap());
static ETHNICITY_GENDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(White|Black|Hispanic|Asian|Other|Unknown)\s+(male|female)$").unwrap()
});
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([WBHAO])\s*/\s*([MF])$").unwrap());
static AGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,3})\s+years?\s+of\s+age$").unwrap());

/// Split a descriptor at its DOB label, if any. Returns the byte offset of
/// the label and the text following it.
pub(crate) fn split_dob_label(descriptor: &str) -> Option<(usize, &str)> {
    let m = DOB_LABEL_RE.find(descriptor)?;
    Some((m.start(), &descriptor[m.end()..]))
}

/// Extract identity fields from one descriptor. `crash_date` lets the age
/// be derived when the descriptor only carries a date of birth.
///
/// Fails with [`ParseError::UnrecognizedPersonFormat`] when nothing in the
/// descriptor matches any known part grammar; callers catch this per
/// decedent and keep parsing the rest of the page.
pub fn parse_person(
    descriptor: &str,
    crash_date: Option<NaiveDate>,
) -> Result<FieldMap, ParseError> {
    // Split off a labeled DOB tail first: the date itself may contain the
    // same commas the rest of the descriptor is split on.
    let (head, mut dob) = match split_dob_label(descriptor) {
        Some((start, tail)) => (
            &descriptor[..start],
            dates::find_date(tail).map(|(_, date)| date),
        ),
        None => (descriptor, None),
    };

    let separator = if head.contains('|') { '|' } else { ',' };
    let parts: Vec<&str> = head
        .split(separator)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut fields = FieldMap::new();
    for part in parts {
        if let Some((ethnicity, gender)) = ethnicity_gender(part) {
            fields.insert(Field::Ethnicity, FieldValue::text(ethnicity));
            fields.insert(Field::Gender, FieldValue::text(gender));
        } else if let Some(caps) = AGE_RE.captures(part) {
            if let Ok(age) = caps[1].parse::<i64>() {
                fields.insert(Field::Age, FieldValue::Int(age));
            }
        } else if let Some(date) = dates::parse_date(part) {
            // Pipe-form descriptors carry the DOB as a bare segment.
            dob.get_or_insert(date);
        } else if !fields.contains_key(&Field::FirstName) {
            if let Some((first, last)) = split_name(part) {
                fields.insert(Field::FirstName, FieldValue::text(first));
                if let Some(last) = last {
                    fields.insert(Field::LastName, FieldValue::text(last));
                }
            }
        }
    }

    if let Some(dob) = dob {
        fields.insert(Field::Dob, FieldValue::Date(dob));
        if !fields.contains_key(&Field::Age) {
            if let Some(crash) = crash_date {
                fields.insert(
                    Field::Age,
                    FieldValue::Int(dates::years_between(dob, crash)),
                );
            }
        }
    }

    if fields.is_empty() {
        return Err(ParseError::UnrecognizedPersonFormat(descriptor.to_string()));
    }
    Ok(fields)
}

/// Accept a part as a person name only when every token is capitalized;
/// rejects narrative fragments that drifted into the descriptor.
fn split_name(part: &str) -> Option<(&str, Option<&str>)> {
    let tokens: Vec<&str> = part.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 5 {
        return None;
    }
    let capitalized = tokens.iter().all(|t| {
        t.chars().next().is_some_and(|c| c.is_uppercase())
            && t.chars().all(|c| c.is_alphabetic() || "-'.".contains(c))
    });
    if !capitalized {
        return None;
    }
    let first = tokens[0];
    let last = (tokens.len() > 1).then(|| tokens[tokens.len() - 1]);
    Some((first, last))
}

fn ethnicity_gender(part: &str) -> Option<(String, String)> {
    if let Some(caps) = ETHNICITY_GENDER_RE.captures(part) {
        return Some((capitalize(&caps[1]), caps[2].to_lowercase()));
    }
    if let Some(caps) = CODE_RE.captures(part) {
        let ethnicity = match &caps[1] {
            "W" => "White",
            "B" => "Black",
            "H" => "Hispanic",
            "A" => "Asian",
            _ => "Other",
        };
        let gender = if &caps[2] == "M" { "male" } else { "female" };
        return Some((ethnicity.to_string(), gender.to_string()));
    }
    None
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn get_text(fields: &FieldMap, field: Field) -> &str {
        fields.get(&field).and_then(FieldValue::as_text).unwrap()
    }

    #[test]
    fn comma_form_with_dob_label() {
        let fields =
            parse_person("Corbin Sabillon-Garcia, White male, DOB 02/09/80", Some(ymd(2018, 12, 30)))
                .unwrap();
        assert_eq!(get_text(&fields, Field::FirstName), "Corbin");
        assert_eq!(get_text(&fields, Field::LastName), "Sabillon-Garcia");
        assert_eq!(get_text(&fields, Field::Ethnicity), "White");
        assert_eq!(get_text(&fields, Field::Gender), "male");
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1980, 2, 9)));
        assert_eq!(fields[&Field::Age], FieldValue::Int(38));
    }

    #[test]
    fn pipe_form_with_bare_date() {
        let fields =
            parse_person("Cedric Benson | Black male | 12/28/1982", Some(ymd(2019, 8, 17))).unwrap();
        assert_eq!(get_text(&fields, Field::FirstName), "Cedric");
        assert_eq!(get_text(&fields, Field::LastName), "Benson");
        assert_eq!(get_text(&fields, Field::Ethnicity), "Black");
        assert_eq!(fields[&Field::Age], FieldValue::Int(36));
    }

    #[test]
    fn ethnicity_gender_code() {
        let fields =
            parse_person("Eva Marie Gonzales, W/F, DOB: 01-22-1961 (passenger)", None).unwrap();
        assert_eq!(get_text(&fields, Field::FirstName), "Eva");
        assert_eq!(get_text(&fields, Field::LastName), "Gonzales");
        assert_eq!(get_text(&fields, Field::Ethnicity), "White");
        assert_eq!(get_text(&fields, Field::Gender), "female");
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1961, 1, 22)));
    }

    #[test]
    fn parenthesized_dob_label() {
        let fields =
            parse_person("Ernesto Gonzales Garcia, H/M, (DOB: 11/15/1977)", None).unwrap();
        assert_eq!(get_text(&fields, Field::Ethnicity), "Hispanic");
        assert_eq!(get_text(&fields, Field::Gender), "male");
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1977, 11, 15)));
    }

    #[test]
    fn dotted_dob_label_and_two_digit_year() {
        let fields = parse_person("Cecil Wade Walker, White male, D.O.B. 3-7-70", None).unwrap();
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1970, 3, 7)));
    }

    #[test]
    fn long_form_dob_date_with_comma() {
        let fields =
            parse_person("First Middle Last, Black male, D.O.B. August 30, 1966", None).unwrap();
        assert_eq!(get_text(&fields, Field::FirstName), "First");
        assert_eq!(get_text(&fields, Field::LastName), "Last");
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1966, 8, 30)));
    }

    #[test]
    fn anonymous_with_explicit_age() {
        let fields = parse_person("Hispanic male, 19 years of age", None).unwrap();
        assert_eq!(get_text(&fields, Field::Ethnicity), "Hispanic");
        assert_eq!(get_text(&fields, Field::Gender), "male");
        assert_eq!(fields[&Field::Age], FieldValue::Int(19));
        assert!(!fields.contains_key(&Field::FirstName));
        assert!(!fields.contains_key(&Field::Dob));
    }

    #[test]
    fn age_not_derived_without_crash_date() {
        let fields = parse_person("Ann Bottenfield-Seago, White female, DOB 02/15/1960", None).unwrap();
        assert_eq!(fields[&Field::Dob], FieldValue::Date(ymd(1960, 2, 15)));
        assert!(!fields.contains_key(&Field::Age));
    }

    #[test]
    fn unrecognized_descriptor_is_an_error() {
        let err = parse_person("the preliminary investigation shows", None).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedPersonFormat(_)));
    }
}
