//! Survey block repository for database operations.

use sqlx::PgPool;

use crate::entities::SurveyBlockEntity;
use crate::metrics::QueryTimer;

/// Repository for survey-block read-model queries.
#[derive(Clone)]
pub struct SurveyBlockRepository {
    pool: PgPool,
}

impl SurveyBlockRepository {
    /// Creates a new SurveyBlockRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List eligible survey targets for a course.
    pub async fn list_eligible(
        &self,
        course_id: &str,
    ) -> Result<Vec<SurveyBlockEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_eligible_survey_blocks");
        let result = sqlx::query_as::<_, SurveyBlockEntity>(
            r#"
            SELECT id, course_id, parent_title, title, evaluation_hash, eligible
            FROM survey_blocks
            WHERE course_id = $1 AND eligible = true
            ORDER BY parent_title, title
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: SurveyBlockRepository tests require a database connection and are
    // covered by integration tests.
}
