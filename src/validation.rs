use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SubsecRound, Utc};

use crate::error::{HistoryError, Result};

/// Longest phone number accepted, per E.164
pub const MAX_TEL_LENGTH: usize = 15;

/// Latest year a stored timestamp may fall in
pub const MAX_TIMESTAMP_YEAR: i32 = 9999;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Validation utilities applied before any storage I/O
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate phone number
    ///
    /// Accepts 1 to 15 characters with no whitespace or control characters.
    /// The number is otherwise stored verbatim; no normalisation of `+` or
    /// formatting characters is attempted.
    pub fn validate_tel(tel: &str) -> Result<()> {
        if tel.is_empty() {
            return Err(HistoryError::Validation("Phone number cannot be empty".to_string()));
        }

        let length = tel.chars().count();
        if length > MAX_TEL_LENGTH {
            return Err(HistoryError::Validation(format!(
                "Phone number too long ({length} characters, max {MAX_TEL_LENGTH})"
            )));
        }

        if tel.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(HistoryError::Validation(
                "Phone number contains whitespace or control characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate that a timestamp lies between the Unix epoch and the end of year 9999
    ///
    /// Stored values are compared as `YYYY-MM-DD HH:MM:SS+00:00` text, which
    /// only orders chronologically while the year has four digits.
    pub fn validate_timestamp(timestamp: &DateTime<Utc>) -> Result<()> {
        if timestamp.timestamp() < 0 {
            return Err(HistoryError::Validation(format!(
                "Timestamp {} is before the Unix epoch",
                timestamp.to_rfc3339()
            )));
        }
        if timestamp.year() > MAX_TIMESTAMP_YEAR {
            return Err(HistoryError::Validation(format!(
                "Timestamp {} is after year {MAX_TIMESTAMP_YEAR}",
                timestamp.to_rfc3339()
            )));
        }
        Ok(())
    }

    /// Validate and reduce a timestamp to its stored form (UTC, whole seconds)
    pub fn normalize_timestamp(timestamp: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Self::validate_timestamp(&timestamp)?;
        Ok(timestamp.trunc_subsecs(0))
    }

    /// Parse a timestamp supplied as text
    ///
    /// RFC 3339 values keep their offset and are converted to UTC. Values
    /// without an offset (`2024-01-01T10:00:00`, `2024-01-01 10:00:00.5`,
    /// `2024-01-01`) are taken as UTC.
    pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return Err(HistoryError::Validation("Timestamp cannot be empty".to_string()));
        }

        let parsed = DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                    .map(|naive| naive.and_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            })
            .ok_or_else(|| HistoryError::Validation(format!("Unparseable timestamp: {input}")))?;

        Self::normalize_timestamp(parsed)
    }
}
