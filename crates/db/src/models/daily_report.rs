//! Daily report and task rows.
//!
//! Tasks live in their own table keyed by `(daily_report_id, position)`;
//! a report is reassembled from one report row plus its ordered task rows.

use std::collections::HashMap;

use reportflow_core::report::{DailyReport, ReportStatus, TaskProgress};
use reportflow_core::store::StoreResult;
use reportflow_core::types::{
    CalendarDay, DailyReportId, ProjectId, TaskId, Timestamp, UserId,
};
use sqlx::FromRow;

use super::corrupt_column;

/// A row from the `daily_reports` table.
#[derive(Debug, Clone, FromRow)]
pub struct DailyReportRow {
    pub id: String,
    pub user_id: String,
    pub report_date: CalendarDay,
    pub challenges: String,
    pub next_day_plan: String,
    pub status: String,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<String>,
    pub rejected_at: Option<Timestamp>,
    pub rejected_by: Option<String>,
    pub feedback: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub daily_report_id: String,
    pub position: i32,
    pub project_id: String,
    pub description: String,
    pub hours_spent: f64,
    pub progress: i32,
}

impl From<TaskRow> for TaskProgress {
    fn from(row: TaskRow) -> Self {
        TaskProgress {
            id: TaskId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            description: row.description,
            hours_spent: row.hours_spent,
            progress: row.progress,
        }
    }
}

impl DailyReportRow {
    /// Assemble the entity. `tasks` must already be ordered by position.
    pub fn into_report(self, tasks: Vec<TaskRow>) -> StoreResult<DailyReport> {
        let status = ReportStatus::parse(&self.status)
            .ok_or_else(|| corrupt_column("daily_reports", "status", &self.status))?;
        Ok(DailyReport {
            id: DailyReportId::new(self.id),
            user_id: UserId::new(self.user_id),
            date: self.report_date,
            tasks: tasks.into_iter().map(TaskProgress::from).collect(),
            challenges: self.challenges,
            next_day_plan: self.next_day_plan,
            status,
            submitted_at: self.submitted_at,
            approved_at: self.approved_at,
            approved_by: self.approved_by.map(UserId::new),
            rejected_at: self.rejected_at,
            rejected_by: self.rejected_by.map(UserId::new),
            feedback: self.feedback,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Pair each report row with its tasks, preserving the order of `rows`.
pub fn assemble(rows: Vec<DailyReportRow>, tasks: Vec<TaskRow>) -> StoreResult<Vec<DailyReport>> {
    let mut by_report: HashMap<String, Vec<TaskRow>> = HashMap::new();
    for task in tasks {
        by_report
            .entry(task.daily_report_id.clone())
            .or_default()
            .push(task);
    }

    rows.into_iter()
        .map(|row| {
            let mut own = by_report.remove(&row.id).unwrap_or_default();
            own.sort_by_key(|t| t.position);
            row.into_report(own)
        })
        .collect()
}
