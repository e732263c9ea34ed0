//! Block configuration entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the block_configs table.
///
/// One row per course placement of the evaluation block; the row only
/// exists after the first successful staff save.
#[derive(Debug, Clone, FromRow)]
pub struct BlockConfigEntity {
    pub block_id: String,
    pub course_id: String,
    pub display_name: String,
    pub evaluation_hash: String,
    pub email_text: String,
    /// `"MM/DD/YYYY"` or `"MM/DD/YYYY HH:MM"`, exactly as authored.
    pub links_expiration_date: Option<String>,
    pub profile_fields: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}
