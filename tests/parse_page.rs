//! Table-driven tests over captured press-release fixture pages.

use chrono::{NaiveDate, NaiveTime};
use fatality_parser::{parse_page, Field, FieldMap, FieldValue};
use pretty_assertions::assert_eq;

fn load_test_page(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}.html")).unwrap()
}

fn text(s: &str) -> FieldValue {
    FieldValue::text(s)
}

fn date(y: i32, m: u32, d: u32) -> FieldValue {
    FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn time(h: u32, m: u32) -> FieldValue {
    FieldValue::Time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn expected(entries: Vec<(Field, FieldValue)>) -> FieldMap {
    entries.into_iter().collect()
}

/// Pull the notes out of a record, asserting their start and end; the
/// remaining fields are then compared exactly.
fn take_notes(record: &mut FieldMap, start: &str, end: &str) {
    let notes = match record.remove(&Field::Notes) {
        Some(FieldValue::Text(s)) => s,
        other => panic!("expected text notes, got {other:?}"),
    };
    assert!(notes.starts_with(start), "notes start: {notes:?}");
    assert!(notes.ends_with(end), "notes end: {notes:?}");
}

#[test]
fn single_decedent_comma_form() {
    let page = load_test_page("traffic-fatality-73-2");
    let mut records = parse_page(&page, Some("https://example.test/traffic-fatality-73-2")).unwrap();
    let record = records.next().unwrap();

    assert_eq!(
        record,
        expected(vec![
            (Field::Age, FieldValue::Int(38)),
            (Field::Case, text("18-3640187")),
            (Field::Crashes, text("73")),
            (Field::Date, date(2018, 12, 30)),
            (Field::Dob, date(1980, 2, 9)),
            (Field::Ethnicity, text("White")),
            (Field::FirstName, text("Corbin")),
            (Field::Gender, text("male")),
            (Field::LastName, text("Sabillon-Garcia")),
            (Field::Location, text("1400 E. Highway 71 eastbound")),
            (
                Field::Notes,
                text(
                    "The preliminary investigation shows that a 2003 Ford F150 was traveling \
                     northbound on the US Highway 183 northbound ramp to E. Highway 71, eastbound. \
                     The truck went across the E. Highway 71 and US Highway 183 ramp, rolled and \
                     came to a stop north of the roadway."
                ),
            ),
            (Field::Time, time(2, 24)),
        ]),
    );
    assert!(records.next().is_none());
    assert!(records.errors().is_empty());
}

#[test]
fn two_decedents_in_document_order() {
    let page = load_test_page("traffic-fatality-50-3");
    let mut records = parse_page(&page, None).unwrap();

    let mut first = records.next().unwrap();
    take_notes(&mut first, "The preliminary", "contacting them.");
    assert_eq!(
        first,
        expected(vec![
            (Field::Age, FieldValue::Int(36)),
            (Field::Case, text("19-2291933")),
            (Field::Crashes, text("50")),
            (Field::Date, date(2019, 8, 17)),
            (Field::Dob, date(1982, 12, 28)),
            (Field::Ethnicity, text("Black")),
            (Field::FirstName, text("Cedric")),
            (Field::Gender, text("male")),
            (Field::LastName, text("Benson")),
            (Field::Location, text("4500 FM 2222/Mount Bonnell Road")),
            (Field::Time, time(22, 20)),
        ]),
    );

    let mut second = records.next().unwrap();
    take_notes(&mut second, "The preliminary", "contacting them.");
    assert_eq!(
        second,
        expected(vec![
            (Field::Age, FieldValue::Int(27)),
            (Field::Case, text("19-2291933")),
            (Field::Crashes, text("50")),
            (Field::Date, date(2019, 8, 17)),
            (Field::Dob, date(1992, 1, 26)),
            (Field::Ethnicity, text("Asian")),
            (Field::FirstName, text("Aamna")),
            (Field::Gender, text("female")),
            (Field::LastName, text("Najam")),
            (Field::Location, text("4500 FM 2222/Mount Bonnell Road")),
            (Field::Time, time(22, 20)),
        ]),
    );

    assert!(records.next().is_none());
}

#[test]
fn notes_span_paragraph_breaks() {
    let page = load_test_page("traffic-fatality-50-3");
    let record = parse_page(&page, None).unwrap().next().unwrap();
    let notes = match &record[&Field::Notes] {
        FieldValue::Text(s) => s.clone(),
        other => panic!("expected text notes, got {other:?}"),
    };
    // Four narrative paragraphs, concatenated in order.
    assert_eq!(notes.matches("\n\n").count(), 3);
    assert!(notes.contains("evaluated by EMS on scene"));
    assert!(!notes.contains("Aamna Najam | Asian female"));
}

#[test]
fn decedent_and_narrative_sharing_a_paragraph() {
    let page = load_test_page("traffic-fatality-2-3");
    let mut records = parse_page(&page, None).unwrap();
    let mut record = records.next().unwrap();
    take_notes(&mut record, "The preliminary", "No charges are expected to be filed.");
    assert_eq!(
        record,
        expected(vec![
            (Field::Age, FieldValue::Int(58)),
            (Field::Case, text("19-0161105")),
            (Field::Crashes, text("2")),
            (Field::Date, date(2019, 1, 16)),
            (Field::Dob, date(1960, 2, 15)),
            (Field::Ethnicity, text("White")),
            (Field::FirstName, text("Ann")),
            (Field::Gender, text("female")),
            (Field::LastName, text("Bottenfield-Seago")),
            (Field::Location, text("West William Cannon Drive and Ridge Oak Road")),
            (Field::Time, time(15, 42)),
        ]),
    );
    assert!(records.next().is_none());
}

#[test]
fn anonymous_decedent_with_explicit_age() {
    let page = load_test_page("traffic-fatality-20-4");
    let mut records = parse_page(&page, None).unwrap();
    let mut record = records.next().unwrap();
    take_notes(&mut record, "The preliminary", "pronounced deceased at the scene.");
    assert_eq!(
        record,
        expected(vec![
            (Field::Age, FieldValue::Int(19)),
            (Field::Case, text("19-1080319")),
            (Field::Crashes, text("20")),
            (Field::Date, date(2019, 4, 18)),
            (Field::Ethnicity, text("Hispanic")),
            (Field::Gender, text("male")),
            (Field::Location, text("8000 block of West U.S. 290")),
            (Field::Time, time(6, 53)),
        ]),
    );
    assert!(records.next().is_none());
}

#[test]
fn records_serialize_for_downstream_consumers() {
    let page = load_test_page("traffic-fatality-73-2");
    let record = parse_page(&page, None).unwrap().next().unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["Case"], "18-3640187");
    assert_eq!(json["First Name"], "Corbin");
    assert_eq!(json["DOB"], "1980-02-09");
    assert_eq!(json["Age"], 38);
}
