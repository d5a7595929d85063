//! Unit tests for validation.rs module

use chrono::{TimeZone, Utc};
use sms_history::validation::{InputValidator, MAX_TEL_LENGTH};
use sms_history::HistoryError;

#[test]
fn test_validate_tel_accepts_e164_lengths() {
    assert!(InputValidator::validate_tel("1").is_ok());
    assert!(InputValidator::validate_tel("15551234567").is_ok());
    assert!(InputValidator::validate_tel("+15551234567").is_ok());
    assert!(InputValidator::validate_tel(&"9".repeat(MAX_TEL_LENGTH)).is_ok());
}

#[test]
fn test_validate_tel_rejects_sixteen_characters() {
    let result = InputValidator::validate_tel(&"9".repeat(MAX_TEL_LENGTH + 1));
    assert!(matches!(result, Err(HistoryError::Validation(_))));
}

#[test]
fn test_validate_tel_counts_characters_not_bytes() {
    // 15 two-byte characters
    assert!(InputValidator::validate_tel(&"٣".repeat(15)).is_ok());
}

#[test]
fn test_validate_tel_rejects_empty_and_blank() {
    assert!(InputValidator::validate_tel("").is_err());
    assert!(InputValidator::validate_tel("   ").is_err());
    assert!(InputValidator::validate_tel("\t").is_err());
}

#[test]
fn test_validate_tel_rejects_control_characters() {
    assert!(InputValidator::validate_tel("555\0123").is_err());
    assert!(InputValidator::validate_tel("555\r\n").is_err());
}

#[test]
fn test_parse_rfc3339_converts_to_utc() {
    let parsed = InputValidator::parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_parse_zulu_timestamp() {
    let parsed = InputValidator::parse_timestamp("2024-02-01T00:00:00Z").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_parse_naive_timestamps_as_utc() {
    let expected = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 30).unwrap();
    assert_eq!(InputValidator::parse_timestamp("2025-03-01T10:15:30").unwrap(), expected);
    assert_eq!(InputValidator::parse_timestamp("2025-03-01 10:15:30").unwrap(), expected);
    // Fractional seconds are dropped
    assert_eq!(InputValidator::parse_timestamp("2025-03-01T10:15:30.123456").unwrap(), expected);
}

#[test]
fn test_parse_date_only_is_midnight_utc() {
    let parsed = InputValidator::parse_timestamp("2024-01-01").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_parse_rejects_garbage_and_empty() {
    assert!(matches!(InputValidator::parse_timestamp("yesterday"), Err(HistoryError::Validation(_))));
    assert!(matches!(InputValidator::parse_timestamp(""), Err(HistoryError::Validation(_))));
    assert!(InputValidator::parse_timestamp("2024-13-01").is_err());
}

#[test]
fn test_parse_rejects_pre_epoch() {
    assert!(InputValidator::parse_timestamp("1969-12-31T23:59:59Z").is_err());
    assert!(InputValidator::parse_timestamp("1970-01-01T00:00:00Z").is_ok());
}
