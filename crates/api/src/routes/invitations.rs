//! Student-facing invitation routes: view initialization and issuance.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{
    generate_url_hash, html_from_text, mask_email, parse_expiration, render_invitation_text,
    HandlerResult, InvitationInfo, SendInvitationRequest, ViewInitResponse, DEFAULT_EMAIL_TEXT,
    EMAIL_SUBJECT,
};
use persistence::repositories::{BlockConfigRepository, InvitationRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StudentAuth;
use crate::middleware::metrics::record_invitation_issued;
use crate::services::email::EmailMessage;

/// Initialize the student-facing view.
///
/// POST /api/v1/blocks/:block_id/init
///
/// Returns the existing invitation (with a masked recipient address) when
/// the student has already issued one, `{result: false}` otherwise. Staff
/// tokens are in author mode and always get `{result: false}`. Pure read.
pub async fn view_init(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(block_id): Path<String>,
) -> Result<Json<ViewInitResponse>, ApiError> {
    if auth.staff {
        return Ok(Json(ViewInitResponse::absent()));
    }

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let invitation = invitation_repo
        .find_by_student_and_block(&block_id, auth.user_id)
        .await?;

    match invitation {
        Some(invitation) => {
            let link = state.config.links.evaluation_url(&invitation.url_hash);
            Ok(Json(ViewInitResponse::found(
                InvitationInfo {
                    email: mask_email(&invitation.email),
                    url_hash: invitation.url_hash,
                },
                link,
            )))
        }
        None => Ok(Json(ViewInitResponse::absent())),
    }
}

/// Issue an invitation and email it to the recipient.
///
/// POST /api/v1/blocks/:block_id/invitation
///
/// Persisting the invitation and sending the email happen inside one
/// transaction: a failed send rolls the insert back, so no invitation
/// exists without a delivered email. No retry; the student can trigger
/// the action again.
pub async fn send_invitation(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(block_id): Path<String>,
    Json(request): Json<SendInvitationRequest>,
) -> Result<Json<HandlerResult>, ApiError> {
    let translator = &state.translator;

    if auth.staff {
        return Ok(Json(HandlerResult::error(
            translator.gettext("Sending invitation in author mode is denied"),
        )));
    }

    if request.validate().is_err() {
        return Ok(Json(HandlerResult::error(
            translator.gettext("Please, enter valid email address"),
        )));
    }

    let config_repo = BlockConfigRepository::new(state.pool.clone());
    let invitation_repo = InvitationRepository::new(state.pool.clone());

    let config = config_repo.find_by_block_id(&block_id).await?;

    let email_text = config
        .as_ref()
        .map(|c| c.email_text.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL_TEXT.to_string());

    let expires_at = match config.as_ref().and_then(|c| c.links_expiration_date.as_deref()) {
        Some(stored) => Some(parse_expiration(stored).map_err(|e| {
            ApiError::Internal(format!("Stored expiration date is invalid: {}", e))
        })?),
        None => None,
    };

    let url_hash = generate_url_hash();
    let link = state.config.links.evaluation_url(&url_hash);
    let student = auth.identity();

    let body_text = render_invitation_text(&email_text, &student.invitation_label(), &link);
    let body_html = html_from_text(&body_text);

    // One atomic unit: the duplicate check, the insert and the email send.
    // Dropping the transaction on any early return rolls the insert back.
    let mut tx = state.pool.begin().await?;

    if invitation_repo
        .exists_for_student(&mut tx, &block_id, auth.user_id)
        .await?
    {
        return Ok(Json(HandlerResult::error(
            translator.gettext("You have already sent invitation"),
        )));
    }

    let invitation = invitation_repo
        .create(
            &mut tx,
            &url_hash,
            &block_id,
            &auth.course_id,
            auth.user_id,
            &request.email,
            expires_at,
        )
        .await?;

    state
        .email
        .send(EmailMessage {
            to: request.email.clone(),
            subject: EMAIL_SUBJECT.to_string(),
            body_text,
            body_html: Some(body_html),
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to send invitation email: {}", e)))?;

    tx.commit().await?;

    record_invitation_issued();

    info!(
        block_id = %block_id,
        invitation_id = %invitation.id,
        student_id = %auth.user_id,
        "Invitation issued"
    );

    Ok(Json(HandlerResult::success_with(
        translator.gettext("Invitation was successfully sent"),
    )))
}
