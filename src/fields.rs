use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Closed set of extractable fields. Using an enum instead of free strings
/// prevents key typos and gives the merge step a fixed universe to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    Age,
    Case,
    #[serde(rename = "Fatal crashes this year")]
    Crashes,
    Date,
    Deceased,
    #[serde(rename = "DOB")]
    Dob,
    Ethnicity,
    #[serde(rename = "First Name")]
    FirstName,
    Gender,
    #[serde(rename = "Last Name")]
    LastName,
    Location,
    Notes,
    Time,
}

/// An extracted value before or after sanitization.
///
/// Raw maps may carry `Null`, blank `Text`, and `List` entries; sanitized
/// maps never do (see [`crate::parser::merge::sanitize_fatality_entity`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
    List(Vec<String>),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// Mapping from [`Field`] to an extracted value. `BTreeMap` keeps iteration
/// order deterministic across runs.
pub type FieldMap = BTreeMap<Field, FieldValue>;

/// One decedent's sanitized, merged record. Invariants: no blank or null
/// values, `Case` matches a numeric-dash-numeric pattern, `Date`/`Time`/`Dob`
/// are chrono values, and the raw `Deceased` descriptor is never carried.
pub type FatalityRecord = FieldMap;
