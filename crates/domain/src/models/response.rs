//! Discriminated handler results.
//!
//! Expected user-input problems are reported as `{result: "error", msg}`
//! rather than HTTP error statuses, matching the editor and student-view
//! frontends which branch on `res.result`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum HandlerResult {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        msg: Option<String>,
    },
    Error {
        msg: String,
    },
}

impl HandlerResult {
    pub fn success() -> Self {
        Self::Success { msg: None }
    }

    pub fn success_with(msg: impl Into<String>) -> Self {
        Self::Success {
            msg: Some(msg.into()),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error { msg: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let json = serde_json::to_value(HandlerResult::success()).unwrap();
        assert_eq!(json, serde_json::json!({"result": "success"}));
    }

    #[test]
    fn test_success_with_message() {
        let json =
            serde_json::to_value(HandlerResult::success_with("Invitation was successfully sent"))
                .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"result": "success", "msg": "Invitation was successfully sent"})
        );
    }

    #[test]
    fn test_error_serialization() {
        let json = serde_json::to_value(HandlerResult::error("Invalid date format")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"result": "error", "msg": "Invalid date format"})
        );
    }
}
