//! Survey-block discovery route (staff view support).

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{SurveyBlockOption, SurveyBlocksResponse};
use persistence::repositories::SurveyBlockRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StudentAuth;

/// List eligible survey targets for a course.
///
/// GET /api/v1/courses/:course_id/survey-blocks
///
/// Requires a staff token scoped to the course. Pure read, bounded by the
/// size of the course content tree.
pub async fn list_survey_blocks(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(course_id): Path<String>,
) -> Result<Json<SurveyBlocksResponse>, ApiError> {
    if !auth.staff {
        return Err(ApiError::Forbidden(
            "Only course staff can list survey blocks".to_string(),
        ));
    }

    if course_id != auth.course_id {
        return Err(ApiError::Forbidden(
            "Token is not scoped to this course".to_string(),
        ));
    }

    let repo = SurveyBlockRepository::new(state.pool.clone());
    let data: Vec<SurveyBlockOption> = repo
        .list_eligible(&course_id)
        .await?
        .into_iter()
        .map(|b| SurveyBlockOption::new(&b.parent_title, &b.title, b.evaluation_hash))
        .collect();

    info!(
        course_id = %course_id,
        user_id = %auth.user_id,
        survey_block_count = data.len(),
        "Listed survey blocks"
    );

    Ok(Json(SurveyBlocksResponse { data }))
}
