use chrono::{Duration, NaiveDate, TimeZone, Utc};
use taskdesk::utils::datetime::*;

#[test]
fn test_parse_and_format_ymd() {
    let date = parse_date("2025-03-04").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert_eq!(format_ymd(date), "2025-03-04");
    assert!(parse_date("04/03/2025").is_err());
}

#[test]
fn test_step_date_from_value() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
    assert_eq!(step_date(Some(date), 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(step_date(Some(date), -28), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
}

#[test]
fn test_step_date_from_empty_starts_today() {
    assert_eq!(step_date(None, 0), today());
    assert_eq!(step_date(None, 1), today() + Duration::days(1));
}

#[test]
fn test_format_human_date_relative() {
    let today = today();
    assert_eq!(format_human_date(today), "today");
    assert_eq!(format_human_date(today + Duration::days(1)), "tomorrow");
    assert_eq!(format_human_date(today - Duration::days(1)), "yesterday");
    assert_eq!(format_human_date(today + Duration::days(3)), "in 3 days");
    assert_eq!(format_human_date(today - Duration::days(3)), "3 days ago");
}

#[test]
fn test_format_human_date_far_away() {
    let date = NaiveDate::from_ymd_opt(2001, 7, 9).unwrap();
    assert_eq!(format_human_date(date), "Jul 09, 2001");
}

#[test]
fn test_format_timestamp_uses_given_format() {
    let ts = Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap();
    assert_eq!(format_timestamp(&ts, "%Y"), "2025");
}
