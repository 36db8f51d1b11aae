//! Repository for the `comments` table.

use reportflow_core::comment::Comment;
use sqlx::PgPool;

use crate::models::comment::CommentRow;

const COLUMNS: &str = "id, daily_report_id, user_id, content, is_read, created_at, updated_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, comment: &Comment) -> Result<CommentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments
                (id, daily_report_id, user_id, content, is_read, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(comment.id.as_str())
            .bind(comment.daily_report_id.as_str())
            .bind(comment.user_id.as_str())
            .bind(&comment.content)
            .bind(comment.is_read)
            .bind(comment.created_at)
            .bind(comment.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a report in creation order.
    pub async fn list_by_report(
        pool: &PgPool,
        daily_report_id: &str,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE daily_report_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(daily_report_id)
            .fetch_all(pool)
            .await
    }

    /// Set `is_read`. Returns `None` if no row with the given id exists.
    pub async fn mark_as_read(pool: &PgPool, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET is_read = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
