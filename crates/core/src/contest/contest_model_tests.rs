//! Tests for contest year models.

use chrono::{NaiveDate, NaiveDateTime};

use crate::contest::{SelectedYear, YEAR_CONFIGS};
use crate::errors::{Error, ValidationError};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn test_default_year_is_2026() {
    assert_eq!(SelectedYear::default(), SelectedYear::Y2026);
}

#[test]
fn test_end_time_per_year() {
    assert_eq!(SelectedYear::Y2025.end_time().unwrap(), at(2025, 12, 12, 21));
    assert_eq!(SelectedYear::Y2026.end_time().unwrap(), at(2026, 12, 15, 21));
}

#[test]
fn test_every_year_has_a_parseable_config() {
    for year in SelectedYear::ALL {
        let config = year.config();
        assert_eq!(config.year, year);
        assert!(config.parsed_end_time().is_ok());
    }
    assert_eq!(YEAR_CONFIGS.len(), SelectedYear::ALL.len());
}

#[test]
fn test_try_from_rejects_unknown_years() {
    assert_eq!(SelectedYear::try_from(2025).unwrap(), SelectedYear::Y2025);
    match SelectedYear::try_from(2024) {
        Err(Error::Validation(ValidationError::UnsupportedYear(2024))) => {}
        other => panic!("Expected UnsupportedYear, got {:?}", other),
    }
}

#[test]
fn test_from_str() {
    assert_eq!("2026".parse::<SelectedYear>().unwrap(), SelectedYear::Y2026);
    assert_eq!(" 2025 ".parse::<SelectedYear>().unwrap(), SelectedYear::Y2025);
    assert!("2027".parse::<SelectedYear>().is_err());
    assert!("next year".parse::<SelectedYear>().is_err());
}

#[test]
fn test_serializes_as_number() {
    assert_eq!(serde_json::to_string(&SelectedYear::Y2025).unwrap(), "2025");
    assert_eq!(
        serde_json::from_str::<SelectedYear>("2026").unwrap(),
        SelectedYear::Y2026
    );
    assert!(serde_json::from_str::<SelectedYear>("1999").is_err());
    assert!(serde_json::from_str::<SelectedYear>("\"2025\"").is_err());
}

#[test]
fn test_display() {
    assert_eq!(SelectedYear::Y2025.to_string(), "2025");
}
