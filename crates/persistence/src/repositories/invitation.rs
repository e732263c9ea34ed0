//! Invitation repository for database operations.

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::InvitationEntity;
use crate::metrics::QueryTimer;

/// Repository for invitation-related database operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new InvitationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find the invitation issued by a student for a block, if any.
    pub async fn find_by_student_and_block(
        &self,
        block_id: &str,
        student_id: Uuid,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invitation_by_student_and_block");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, url_hash, block_id, course_id, student_id, email, expires_at, created_at
            FROM invitations
            WHERE block_id = $1 AND student_id = $2
            "#,
        )
        .bind(block_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an invitation by its link token.
    pub async fn find_by_url_hash(
        &self,
        url_hash: &str,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invitation_by_url_hash");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, url_hash, block_id, course_id, student_id, email, expires_at, created_at
            FROM invitations
            WHERE url_hash = $1
            "#,
        )
        .bind(url_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Duplicate check inside the issuing transaction.
    pub async fn exists_for_student(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        block_id: &str,
        student_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("invitation_exists_for_student");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM invitations WHERE block_id = $1 AND student_id = $2)
            "#,
        )
        .bind(block_id)
        .bind(student_id)
        .fetch_one(&mut **tx)
        .await;
        timer.record();
        result
    }

    /// Insert a new invitation inside the issuing transaction.
    ///
    /// The caller commits only after the invitation email was accepted by
    /// the transport, so a failed send leaves no row behind. The UNIQUE
    /// (block_id, student_id) index backstops concurrent issuance.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        url_hash: &str,
        block_id: &str,
        course_id: &str,
        student_id: Uuid,
        email: &str,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<InvitationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (url_hash, block_id, course_id, student_id, email, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, url_hash, block_id, course_id, student_id, email, expires_at, created_at
            "#,
        )
        .bind(url_hash)
        .bind(block_id)
        .bind(course_id)
        .bind(student_id)
        .bind(email)
        .bind(expires_at)
        .fetch_one(&mut **tx)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: InvitationRepository tests require a database connection and are
    // covered by integration tests.
}
