//! Survey-block discovery models.

use serde::Serialize;

/// A content node eligible as a survey target, for the staff selection list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SurveyBlockOption {
    /// Human-readable path: `"<parent title> / <node title>"`.
    pub title: String,
    pub evaluation_hash: String,
}

impl SurveyBlockOption {
    pub fn new(parent_title: &str, title: &str, evaluation_hash: String) -> Self {
        Self {
            title: format!("{} / {}", parent_title, title),
            evaluation_hash,
        }
    }
}

/// Response for the survey-block discovery endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SurveyBlocksResponse {
    pub data: Vec<SurveyBlockOption>,
}
