//! Feedback comments attached to a daily report.
//!
//! Comments are append-only. The only mutation is the idempotent
//! unread -> read flip.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{CommentId, DailyReportId, Timestamp, UserId};
use crate::validation::validate_required_text;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub daily_report_id: DailyReportId,
    /// Author.
    pub user_id: UserId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub daily_report_id: DailyReportId,
    pub user_id: UserId,
    pub content: String,
}

/// Content must be non-blank. There is no upper bound.
pub fn validate_comment_content(content: &str) -> CoreResult<()> {
    validate_required_text(content, "content", "Comment content")
}
