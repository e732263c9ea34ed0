//! Common validation utilities.
//!
//! The expiration patterns mirror what the staff editor form accepts: a
//! `MM/DD/YYYY` date and an on-the-hour or half-hour `HH:MM` time.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

lazy_static::lazy_static! {
    static ref EXPIRATION_DATE_RE: regex::Regex =
        regex::Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap();
    static ref EXPIRATION_TIME_RE: regex::Regex =
        regex::Regex::new(r"^[0-2][0-9]:(0|3)0$").unwrap();
}

/// Validates a link-expiration date in `MM/DD/YYYY` form.
///
/// The pattern check keeps the historical shape restriction; the calendar
/// parse rejects values like `13/45/2024` that the pattern alone lets through.
pub fn validate_expiration_date(value: &str) -> Result<(), ValidationError> {
    if EXPIRATION_DATE_RE.is_match(value)
        && NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("expiration_date_format");
        err.message = Some("Invalid date format".into());
        Err(err)
    }
}

/// Validates a link-expiration time in `HH:MM` form.
///
/// Only on-the-hour and half-hour values are accepted.
pub fn validate_expiration_time(value: &str) -> Result<(), ValidationError> {
    if EXPIRATION_TIME_RE.is_match(value)
        && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("expiration_time_format");
        err.message = Some("Invalid time format".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Date tests
    #[test]
    fn test_validate_expiration_date() {
        assert!(validate_expiration_date("12/31/2026").is_ok());
        assert!(validate_expiration_date("1/5/2026").is_ok());
        assert!(validate_expiration_date("01/05/2026").is_ok());
        assert!(validate_expiration_date("2026-12-31").is_err());
        assert!(validate_expiration_date("12/31/26").is_err());
        assert!(validate_expiration_date("").is_err());
    }

    #[test]
    fn test_validate_expiration_date_rejects_impossible_dates() {
        assert!(validate_expiration_date("13/01/2026").is_err());
        assert!(validate_expiration_date("02/30/2026").is_err());
        assert!(validate_expiration_date("00/10/2026").is_err());
    }

    #[test]
    fn test_validate_expiration_date_error_message() {
        let err = validate_expiration_date("31-12-2026").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Invalid date format");
    }

    // Time tests
    #[test]
    fn test_validate_expiration_time() {
        assert!(validate_expiration_time("00:00").is_ok());
        assert!(validate_expiration_time("09:30").is_ok());
        assert!(validate_expiration_time("23:00").is_ok());
        assert!(validate_expiration_time("23:30").is_ok());
    }

    #[test]
    fn test_validate_expiration_time_rejects_off_grid_minutes() {
        assert!(validate_expiration_time("10:15").is_err());
        assert!(validate_expiration_time("10:45").is_err());
        assert!(validate_expiration_time("10:31").is_err());
    }

    #[test]
    fn test_validate_expiration_time_rejects_impossible_hours() {
        // 2x shapes pass the pattern but are not real clock times.
        assert!(validate_expiration_time("25:00").is_err());
        assert!(validate_expiration_time("29:30").is_err());
    }

    #[test]
    fn test_validate_expiration_time_rejects_bad_shape() {
        assert!(validate_expiration_time("9:30").is_err());
        assert!(validate_expiration_time("0930").is_err());
        assert!(validate_expiration_time("").is_err());
    }

    #[test]
    fn test_validate_expiration_time_error_message() {
        let err = validate_expiration_time("10:45").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Invalid time format");
    }
}
