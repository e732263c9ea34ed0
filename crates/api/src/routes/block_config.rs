//! Staff configuration routes: save and editor context.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{
    split_expiration, validate_save_request, EditorContext, HandlerResult, SaveConfigRequest,
    SurveyBlockOption, DEFAULT_DISPLAY_NAME, DEFAULT_EMAIL_TEXT,
};
use persistence::repositories::{BlockConfigRepository, SurveyBlockRepository};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StudentAuth;

/// Save the block configuration.
///
/// POST /api/v1/blocks/:block_id/config
///
/// Requires a staff token. Validation failures come back as
/// `{result: "error", msg}` with nothing persisted; a success replaces the
/// stored configuration in one statement.
pub async fn save_config(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(block_id): Path<String>,
    Json(request): Json<SaveConfigRequest>,
) -> Result<Json<HandlerResult>, ApiError> {
    if !auth.staff {
        return Err(ApiError::Forbidden(
            "Only course staff can edit the configuration".to_string(),
        ));
    }

    let validated = match validate_save_request(&request) {
        Ok(validated) => validated,
        Err(e) => {
            return Ok(Json(HandlerResult::error(
                state.translator.gettext(&e.to_string()),
            )))
        }
    };

    let config_repo = BlockConfigRepository::new(state.pool.clone());
    config_repo
        .upsert(
            &block_id,
            &auth.course_id,
            &validated.display_name,
            &validated.evaluation_hash,
            &validated.email_text,
            validated.links_expiration_date.as_deref(),
            validated.profile_fields.as_ref(),
        )
        .await?;

    info!(
        block_id = %block_id,
        course_id = %auth.course_id,
        user_id = %auth.user_id,
        "Block configuration saved"
    );

    Ok(Json(HandlerResult::success()))
}

/// Staff editor context.
///
/// GET /api/v1/blocks/:block_id/editor-context
///
/// Returns the current configuration (with the stored expiration split back
/// into date and time fields) plus the selectable survey blocks for the
/// course. Unconfigured blocks get the defaults.
pub async fn editor_context(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(block_id): Path<String>,
) -> Result<Json<EditorContext>, ApiError> {
    if !auth.staff {
        return Err(ApiError::Forbidden(
            "Only course staff can view the editor context".to_string(),
        ));
    }

    let config_repo = BlockConfigRepository::new(state.pool.clone());
    let survey_repo = SurveyBlockRepository::new(state.pool.clone());

    let config = config_repo.find_by_block_id(&block_id).await?;

    let survey_blocks: Vec<SurveyBlockOption> = survey_repo
        .list_eligible(&auth.course_id)
        .await?
        .into_iter()
        .map(|b| SurveyBlockOption::new(&b.parent_title, &b.title, b.evaluation_hash))
        .collect();

    let context = match config {
        Some(config) => {
            let (date, time) = config
                .links_expiration_date
                .as_deref()
                .map(split_expiration)
                .unwrap_or(("", ""));

            let profile_fields = config
                .profile_fields
                .as_ref()
                .map(|v| serde_json::to_string_pretty(v).unwrap_or_default())
                .unwrap_or_default();

            EditorContext {
                display_name: config.display_name.clone(),
                evaluation_hash: config.evaluation_hash.clone(),
                links_expiration_date: date.to_string(),
                links_expiration_time: time.to_string(),
                email_text: config.email_text.clone(),
                profile_fields,
                survey_blocks,
            }
        }
        None => EditorContext {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            evaluation_hash: String::new(),
            links_expiration_date: String::new(),
            links_expiration_time: String::new(),
            email_text: DEFAULT_EMAIL_TEXT.to_string(),
            profile_fields: String::new(),
            survey_blocks,
        },
    };

    info!(
        block_id = %block_id,
        user_id = %auth.user_id,
        survey_block_count = context.survey_blocks.len(),
        "Editor context fetched"
    );

    Ok(Json(context))
}
