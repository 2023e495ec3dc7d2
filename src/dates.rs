//! Tolerant date and time parsing for press-release text.
//!
//! The source material mixes long-form dates ("Tuesday, January 16, 2018"),
//! abbreviated months ("Jan. 16, 2018"), and numeric dates with two- or
//! four-digit years ("12/28/1982", "3-7-70").

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Mon|Tues?|Wednes|Thurs?|Fri|Satur|Sun)day,?\s+").unwrap()
});
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})$").unwrap());
static TEXTUAL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\.?\s+(\d{1,2}),?\s+(\d{2,4})$").unwrap());
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*(?:([ap])\.?\s*m\.?)?").unwrap()
});
static ANY_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|[A-Za-z]+\.?\s+\d{1,2},?\s+\d{2,4}").unwrap()
});

/// Two-digit years at or below the pivot resolve to 20xx, above it to 19xx.
/// Dates of birth and crash dates in this material are never far-future.
const YEAR_PIVOT: i32 = 30;

/// Parse a date in any of the formats the press releases use. Leading
/// weekday names and trailing punctuation are tolerated.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_end_matches(['.', ',']).trim();
    let trimmed = WEEKDAY_RE.replace(trimmed, "");

    if let Some(caps) = NUMERIC_DATE_RE.captures(&trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = normalize_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = TEXTUAL_DATE_RE.captures(&trimmed) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year = normalize_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Parse a clock time such as "2:24 a.m.", "10:20 p.m.", or "20:39".
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(raw)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if let Some(meridiem) = caps.get(3) {
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("p");
        if is_pm && hour != 12 {
            hour += 12;
        } else if !is_pm && hour == 12 {
            hour = 0;
        }
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Find the first parseable date in free text, returning the byte range it
/// occupied alongside the value.
pub fn find_date(text: &str) -> Option<(std::ops::Range<usize>, NaiveDate)> {
    ANY_DATE_RE
        .find_iter(text)
        .find_map(|m| parse_date(m.as_str()).map(|date| (m.range(), date)))
}

/// Whole years elapsed between `dob` and `later`.
pub fn years_between(dob: NaiveDate, later: NaiveDate) -> i64 {
    use chrono::Datelike;
    let mut years = i64::from(later.year() - dob.year());
    if (later.month(), later.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}

fn normalize_year(year: i32) -> i32 {
    if year < 100 {
        if year <= YEAR_PIVOT {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn month_number(name: &str) -> Option<u32> {
    let normalized = name.to_lowercase();
    match normalized.trim_end_matches('.') {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}
