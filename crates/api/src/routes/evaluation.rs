//! Recipient link resolution.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use domain::models::{
    mask_email, EvaluationView, ResolveResponse, DEFAULT_DISPLAY_NAME,
};
use persistence::repositories::{BlockConfigRepository, InvitationRepository};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Resolve an invitation link token.
///
/// GET /api/v1/evaluation/:url_hash
///
/// The token is the capability: no other authorization is required. An
/// unknown token resolves to `{result: false}`, never an error; repeated
/// calls are idempotent. Expired links also resolve to `{result: false}`
/// when `links.enforce_expiration` is set.
pub async fn resolve_evaluation(
    State(state): State<AppState>,
    Path(url_hash): Path<String>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    let Some(invitation) = invitation_repo.find_by_url_hash(&url_hash).await? else {
        return Ok(Json(ResolveResponse::absent()));
    };

    if state.config.links.enforce_expiration {
        if let Some(expires_at) = invitation.expires_at {
            if expires_at < Local::now().naive_local() {
                info!(url_hash = %url_hash, "Expired invitation link rejected");
                return Ok(Json(ResolveResponse::absent()));
            }
        }
    }

    let config = BlockConfigRepository::new(state.pool.clone())
        .find_by_block_id(&invitation.block_id)
        .await?;

    let view = match config {
        Some(config) => EvaluationView {
            display_name: config.display_name,
            evaluation_hash: config.evaluation_hash,
            email: mask_email(&invitation.email),
            profile_fields: config.profile_fields,
        },
        None => EvaluationView {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            evaluation_hash: String::new(),
            email: mask_email(&invitation.email),
            profile_fields: None,
        },
    };

    info!(
        block_id = %invitation.block_id,
        invitation_id = %invitation.id,
        "Invitation link resolved"
    );

    Ok(Json(ResolveResponse::found(view)))
}
