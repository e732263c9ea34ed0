//! Invitation entity (database row mapping).

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitations table.
///
/// Rows are created by the issuer and only ever read afterwards; expiry is
/// enforced at read time, never by deletion.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    /// Opaque link token; the sole credential a recipient needs.
    pub url_hash: String,
    pub block_id: String,
    pub course_id: String,
    pub student_id: Uuid,
    /// Full recipient address; masked before display.
    pub email: String,
    /// Naive local timestamp; NULL means the link never expires.
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
}
