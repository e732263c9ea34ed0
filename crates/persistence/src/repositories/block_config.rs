//! Block configuration repository for database operations.

use sqlx::PgPool;

use crate::entities::BlockConfigEntity;
use crate::metrics::QueryTimer;

/// Repository for block-configuration database operations.
#[derive(Clone)]
pub struct BlockConfigRepository {
    pool: PgPool,
}

impl BlockConfigRepository {
    /// Creates a new BlockConfigRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find the configuration for a block, if staff have saved one.
    pub async fn find_by_block_id(
        &self,
        block_id: &str,
    ) -> Result<Option<BlockConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_block_config");
        let result = sqlx::query_as::<_, BlockConfigEntity>(
            r#"
            SELECT block_id, course_id, display_name, evaluation_hash, email_text,
                   links_expiration_date, profile_fields, updated_at
            FROM block_configs
            WHERE block_id = $1
            "#,
        )
        .bind(block_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the configuration for a block in one statement.
    ///
    /// The optional fields keep their previous value when the save omitted
    /// them, matching the editor form which only ever adds to them.
    pub async fn upsert(
        &self,
        block_id: &str,
        course_id: &str,
        display_name: &str,
        evaluation_hash: &str,
        email_text: &str,
        links_expiration_date: Option<&str>,
        profile_fields: Option<&serde_json::Value>,
    ) -> Result<BlockConfigEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_block_config");
        let result = sqlx::query_as::<_, BlockConfigEntity>(
            r#"
            INSERT INTO block_configs
                (block_id, course_id, display_name, evaluation_hash, email_text,
                 links_expiration_date, profile_fields, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (block_id) DO UPDATE SET
                course_id = EXCLUDED.course_id,
                display_name = EXCLUDED.display_name,
                evaluation_hash = EXCLUDED.evaluation_hash,
                email_text = EXCLUDED.email_text,
                links_expiration_date =
                    COALESCE(EXCLUDED.links_expiration_date, block_configs.links_expiration_date),
                profile_fields =
                    COALESCE(EXCLUDED.profile_fields, block_configs.profile_fields),
                updated_at = NOW()
            RETURNING block_id, course_id, display_name, evaluation_hash, email_text,
                      links_expiration_date, profile_fields, updated_at
            "#,
        )
        .bind(block_id)
        .bind(course_id)
        .bind(display_name)
        .bind(evaluation_hash)
        .bind(email_text)
        .bind(links_expiration_date)
        .bind(profile_fields)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: BlockConfigRepository tests require a database connection and are
    // covered by integration tests.
}
