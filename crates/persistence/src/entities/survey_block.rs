//! Survey block entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the survey_blocks table.
///
/// A read-model of the course content tree: nodes the host has marked as
/// eligible survey targets.
#[derive(Debug, Clone, FromRow)]
pub struct SurveyBlockEntity {
    pub id: Uuid,
    pub course_id: String,
    pub parent_title: String,
    pub title: String,
    pub evaluation_hash: String,
    pub eligible: bool,
}
