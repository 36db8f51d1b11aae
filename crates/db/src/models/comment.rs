//! Comment rows.

use reportflow_core::comment::Comment;
use reportflow_core::types::{CommentId, DailyReportId, Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: String,
    pub daily_report_id: String,
    pub user_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::new(row.id),
            daily_report_id: DailyReportId::new(row.daily_report_id),
            user_id: UserId::new(row.user_id),
            content: row.content,
            is_read: row.is_read,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
