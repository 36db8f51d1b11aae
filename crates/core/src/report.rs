//! Daily report entity, lifecycle status, and report-level predicates.
//!
//! Lifecycle: `draft -> submitted -> approved` (terminal) and
//! `submitted -> rejected -> submitted` (resubmission loop).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CalendarDay, DailyReportId, ProjectId, TaskId, Timestamp, UserId};

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => STATUS_DRAFT,
            ReportStatus::Submitted => STATUS_SUBMITTED,
            ReportStatus::Approved => STATUS_APPROVED,
            ReportStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            STATUS_DRAFT => Some(ReportStatus::Draft),
            STATUS_SUBMITTED => Some(ReportStatus::Submitted),
            STATUS_APPROVED => Some(ReportStatus::Approved),
            STATUS_REJECTED => Some(ReportStatus::Rejected),
            _ => None,
        }
    }

    /// Approved reports never transition again.
    pub fn is_terminal(self) -> bool {
        self == ReportStatus::Approved
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Entities
-------------------------------------------------------------------------- */

/// One line item of a report. Exists only inside its parent report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub description: String,
    /// Hours worked, 0 to 24 inclusive.
    pub hours_spent: f64,
    /// Completion percentage, 0 to 100 inclusive.
    pub progress: i32,
}

/// A task as supplied by the caller, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub project_id: ProjectId,
    pub description: String,
    pub hours_spent: f64,
    pub progress: i32,
}

impl TaskInput {
    /// Attach a freshly generated id.
    pub fn into_task(self) -> TaskProgress {
        TaskProgress {
            id: TaskId::generate(),
            project_id: self.project_id,
            description: self.description,
            hours_spent: self.hours_spent,
            progress: self.progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: DailyReportId,
    /// Owner. Immutable after creation.
    pub user_id: UserId,
    pub date: CalendarDay,
    pub tasks: Vec<TaskProgress>,
    pub challenges: String,
    pub next_day_plan: String,
    pub status: ReportStatus,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<UserId>,
    pub rejected_at: Option<Timestamp>,
    pub rejected_by: Option<UserId>,
    /// Written by the approver or rejector.
    pub feedback: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DailyReport {
    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.hours_spent).sum()
    }
}

/* --------------------------------------------------------------------------
Workflow inputs
-------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct CreateDailyReportInput {
    pub user_id: UserId,
    pub date: CalendarDay,
    pub tasks: Vec<TaskInput>,
    pub challenges: String,
    pub next_day_plan: String,
}

/// Partial update. `None` fields keep their current value.
#[derive(Debug, Clone)]
pub struct UpdateDailyReportInput {
    pub id: DailyReportId,
    /// The acting user; must own the report.
    pub user_id: UserId,
    pub tasks: Option<Vec<TaskInput>>,
    pub challenges: Option<String>,
    pub next_day_plan: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitDailyReportInput {
    pub id: DailyReportId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ApproveDailyReportInput {
    pub id: DailyReportId,
    pub approver_id: UserId,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RejectDailyReportInput {
    pub id: DailyReportId,
    pub rejector_id: UserId,
    /// Mandatory rejection reason.
    pub feedback: String,
}

/* --------------------------------------------------------------------------
Report-level predicates
-------------------------------------------------------------------------- */

/// Only the owner may edit, and never once approved.
pub fn can_edit_daily_report(report: &DailyReport, user_id: &UserId) -> bool {
    report.user_id == *user_id && report.status != ReportStatus::Approved
}

/// Drafts and rejected reports may be (re)submitted.
pub fn can_submit_daily_report(report: &DailyReport) -> bool {
    matches!(report.status, ReportStatus::Draft | ReportStatus::Rejected)
}

pub fn can_approve_daily_report(report: &DailyReport) -> bool {
    report.status == ReportStatus::Submitted
}

pub fn can_reject_daily_report(report: &DailyReport) -> bool {
    report.status == ReportStatus::Submitted
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
