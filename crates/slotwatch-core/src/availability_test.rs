use chrono::NaiveDate;

use super::*;

fn parser() -> DayFirstDateParser {
    DayFirstDateParser::new()
}

#[test]
fn parses_day_first_date_from_first_line() {
    let date = parser()
        .parse_date("Saturday 23/08/2025\n03:00 PM")
        .unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 23).unwrap());
}

#[test]
fn parses_single_digit_day_and_month() {
    let date = parser().parse_date("Monday 1/9/2025\n09:00 AM").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
}

#[test]
fn ignores_date_on_second_line() {
    let result = parser().parse_date("next week\n29/08/2025");
    assert!(
        matches!(result, Err(ParseError::NoDateFound)),
        "date on a later line must not match, got: {result:?}"
    );
}

#[test]
fn no_date_found_for_free_text() {
    let result = parser().parse_date("call the centre to book");
    assert!(matches!(result, Err(ParseError::NoDateFound)));
}

#[test]
fn rejects_impossible_calendar_date() {
    let result = parser().parse_date("Friday 32/08/2025\n10:15 AM");
    assert!(
        matches!(result, Err(ParseError::InvalidCalendarDate(ref s)) if s == "32/08/2025"),
        "expected InvalidCalendarDate, got: {result:?}"
    );
}

#[test]
fn parsing_is_idempotent() {
    let text = "Friday 29/08/2025\n10:15 AM";
    let p = parser();
    let first = p.parse_date(text).unwrap();
    let second = p.parse_date(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sentinel_yields_none() {
    let p = parser();
    assert_eq!(parse_availability(&p, "No available slot"), None);
}

#[test]
fn sentinel_wins_even_with_embedded_date() {
    // A row that renders both the sentinel and stale text must count as
    // unavailable.
    let p = parser();
    assert_eq!(
        parse_availability(&p, "No available slot 23/08/2025"),
        None
    );
}

#[test]
fn malformed_text_yields_none_not_panic() {
    let p = parser();
    assert_eq!(parse_availability(&p, "???"), None);
    assert_eq!(parse_availability(&p, ""), None);
}

#[test]
fn valid_text_yields_some_date() {
    let p = parser();
    assert_eq!(
        parse_availability(&p, "Saturday 23/08/2025\n03:00 PM"),
        NaiveDate::from_ymd_opt(2025, 8, 23)
    );
}
