//! Block configuration model and staff-save validation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::survey_block::SurveyBlockOption;
use shared::validation::{validate_expiration_date, validate_expiration_time};

/// Display name used before staff configure the block.
pub const DEFAULT_DISPLAY_NAME: &str = "Intern Supervisor Evaluation";

/// Email template used before staff configure the block.
pub const DEFAULT_EMAIL_TEXT: &str =
    "Hello!\n\n%student_name% asked you to provide feedback: %link%";

/// Proposed configuration as submitted by the staff editor form.
///
/// All fields arrive as flat strings; blank means "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaveConfigRequest {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub evaluation_hash: String,
    #[serde(default)]
    pub email_text: String,
    #[serde(default)]
    pub links_expiration_date: String,
    #[serde(default)]
    pub links_expiration_time: String,
    /// JSON text of an object mapping profile field names to values.
    #[serde(default)]
    pub profile_fields: String,
}

/// A save request that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub display_name: String,
    pub evaluation_hash: String,
    pub email_text: String,
    /// Combined `"MM/DD/YYYY"` or `"MM/DD/YYYY HH:MM"` value, if provided.
    pub links_expiration_date: Option<String>,
    pub profile_fields: Option<serde_json::Value>,
}

/// Rejection reasons for a staff save, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Report Display Name is not set")]
    MissingDisplayName,

    #[error("Evaluation hash is not set")]
    MissingEvaluationHash,

    #[error("Email Text is not set")]
    MissingEmailText,

    #[error("Email Text must contain the '%link%' placeholder")]
    MissingLinkPlaceholder,

    #[error("Invalid Profile Fields format (must be valid JSON)")]
    InvalidProfileFields,

    #[error("Invalid date format")]
    InvalidDate,

    #[error("Invalid time format")]
    InvalidTime,
}

/// Validates a proposed configuration.
///
/// All-or-nothing: the caller must not persist anything unless this returns
/// `Ok`. The expiration time is only considered when a date is present.
pub fn validate_save_request(request: &SaveConfigRequest) -> Result<ValidatedConfig, ConfigError> {
    if request.display_name.trim().is_empty() {
        return Err(ConfigError::MissingDisplayName);
    }

    if request.evaluation_hash.trim().is_empty() {
        return Err(ConfigError::MissingEvaluationHash);
    }

    if request.email_text.trim().is_empty() {
        return Err(ConfigError::MissingEmailText);
    }
    if !request.email_text.contains(super::invitation::LINK_PLACEHOLDER) {
        return Err(ConfigError::MissingLinkPlaceholder);
    }

    let profile_fields = if request.profile_fields.trim().is_empty() {
        None
    } else {
        let value: serde_json::Value = serde_json::from_str(&request.profile_fields)
            .map_err(|_| ConfigError::InvalidProfileFields)?;
        if !value.is_object() {
            return Err(ConfigError::InvalidProfileFields);
        }
        Some(value)
    };

    let links_expiration_date = if request.links_expiration_date.is_empty() {
        None
    } else {
        validate_expiration_date(&request.links_expiration_date)
            .map_err(|_| ConfigError::InvalidDate)?;

        if request.links_expiration_time.is_empty() {
            Some(request.links_expiration_date.clone())
        } else {
            validate_expiration_time(&request.links_expiration_time)
                .map_err(|_| ConfigError::InvalidTime)?;
            Some(format!(
                "{} {}",
                request.links_expiration_date, request.links_expiration_time
            ))
        }
    };

    Ok(ValidatedConfig {
        display_name: request.display_name.clone(),
        evaluation_hash: request.evaluation_hash.clone(),
        email_text: request.email_text.clone(),
        links_expiration_date,
        profile_fields,
    })
}

/// Parses a stored expiration value into the timestamp used at issuance.
///
/// A date-only value expires at midnight of that date.
pub fn parse_expiration(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    if value.contains(' ') {
        NaiveDateTime::parse_from_str(value, "%m/%d/%Y %H:%M")
    } else {
        NaiveDate::parse_from_str(value, "%m/%d/%Y").map(|date| date.and_time(NaiveTime::MIN))
    }
}

/// Splits a stored expiration value back into the editor's date and time fields.
pub fn split_expiration(value: &str) -> (&str, &str) {
    match value.split_once(' ') {
        Some((date, time)) => (date, time),
        None => (value, ""),
    }
}

/// Staff editor context: current configuration plus the selectable survey blocks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EditorContext {
    pub display_name: String,
    pub evaluation_hash: String,
    pub links_expiration_date: String,
    pub links_expiration_time: String,
    pub email_text: String,
    /// Pretty-printed JSON text, empty when no profile fields are configured.
    pub profile_fields: String,
    pub survey_blocks: Vec<SurveyBlockOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SaveConfigRequest {
        SaveConfigRequest {
            display_name: "Supervisor Evaluation".to_string(),
            evaluation_hash: "3f2c9aebd1".to_string(),
            email_text: "Hello %student_name%, %link%".to_string(),
            links_expiration_date: String::new(),
            links_expiration_time: String::new(),
            profile_fields: String::new(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let validated = validate_save_request(&valid_request()).expect("valid");
        assert_eq!(validated.display_name, "Supervisor Evaluation");
        assert_eq!(validated.evaluation_hash, "3f2c9aebd1");
        assert!(validated.links_expiration_date.is_none());
        assert!(validated.profile_fields.is_none());
    }

    #[test]
    fn test_missing_display_name_rejected() {
        let mut request = valid_request();
        request.display_name = "  ".to_string();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::MissingDisplayName)
        );
    }

    #[test]
    fn test_missing_evaluation_hash_rejected() {
        let mut request = valid_request();
        request.evaluation_hash = String::new();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::MissingEvaluationHash)
        );
    }

    #[test]
    fn test_missing_email_text_rejected() {
        let mut request = valid_request();
        request.email_text = String::new();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::MissingEmailText)
        );
    }

    #[test]
    fn test_email_text_without_link_placeholder_rejected() {
        let mut request = valid_request();
        request.email_text = "Hello %student_name%, no link here".to_string();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::MissingLinkPlaceholder)
        );
    }

    #[test]
    fn test_profile_fields_must_be_json_object() {
        let mut request = valid_request();
        request.profile_fields = "{\"company\": \"ACME\"}".to_string();
        let validated = validate_save_request(&request).expect("valid");
        assert_eq!(
            validated.profile_fields,
            Some(serde_json::json!({"company": "ACME"}))
        );

        request.profile_fields = "not json".to_string();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::InvalidProfileFields)
        );

        request.profile_fields = "[1, 2, 3]".to_string();
        assert_eq!(
            validate_save_request(&request),
            Err(ConfigError::InvalidProfileFields)
        );
    }

    #[test]
    fn test_date_only_expiration() {
        let mut request = valid_request();
        request.links_expiration_date = "12/31/2026".to_string();
        let validated = validate_save_request(&request).expect("valid");
        assert_eq!(
            validated.links_expiration_date.as_deref(),
            Some("12/31/2026")
        );
    }

    #[test]
    fn test_date_and_time_combined_for_storage() {
        let mut request = valid_request();
        request.links_expiration_date = "12/31/2026".to_string();
        request.links_expiration_time = "14:30".to_string();
        let validated = validate_save_request(&request).expect("valid");
        assert_eq!(
            validated.links_expiration_date.as_deref(),
            Some("12/31/2026 14:30")
        );
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut request = valid_request();
        request.links_expiration_date = "2026-12-31".to_string();
        assert_eq!(validate_save_request(&request), Err(ConfigError::InvalidDate));
    }

    #[test]
    fn test_invalid_time_rejected() {
        let mut request = valid_request();
        request.links_expiration_date = "12/31/2026".to_string();
        request.links_expiration_time = "14:45".to_string();
        assert_eq!(validate_save_request(&request), Err(ConfigError::InvalidTime));
    }

    #[test]
    fn test_time_without_date_is_ignored() {
        // Matches the editor form, which only submits a meaningful time
        // alongside a date.
        let mut request = valid_request();
        request.links_expiration_time = "99:99".to_string();
        assert!(validate_save_request(&request).is_ok());
    }

    #[test]
    fn test_expiration_round_trip() {
        let mut request = valid_request();
        request.links_expiration_date = "03/05/2027".to_string();
        request.links_expiration_time = "09:30".to_string();
        let validated = validate_save_request(&request).expect("valid");

        let stored = validated.links_expiration_date.expect("stored");
        let parsed = parse_expiration(&stored).expect("parse");
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2027, 3, 5)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );

        let (date, time) = split_expiration(&stored);
        assert_eq!(date, "03/05/2027");
        assert_eq!(time, "09:30");
    }

    #[test]
    fn test_parse_expiration_date_only_is_midnight() {
        let parsed = parse_expiration("7/4/2027").expect("parse");
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2027, 7, 4)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_split_expiration_date_only() {
        let (date, time) = split_expiration("12/31/2026");
        assert_eq!(date, "12/31/2026");
        assert_eq!(time, "");
    }
}
