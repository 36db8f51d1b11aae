//! Projects referenced by report tasks.
//!
//! The report engine only checks that a task's project exists.

use serde::{Deserialize, Serialize};

use crate::types::{CalendarDay, DepartmentId, ProjectId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Suspended,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Suspended => "suspended",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(ProjectStatus::Planning),
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "suspended" => Some(ProjectStatus::Suspended),
            "cancelled" => Some(ProjectStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub department_id: DepartmentId,
    pub status: ProjectStatus,
    pub start_date: CalendarDay,
    pub end_date: Option<CalendarDay>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project accepts work on `date` when it is flagged active, in `active`
/// status, and `date` falls within its period.
pub fn is_project_active(project: &Project, date: CalendarDay) -> bool {
    if !project.is_active || project.status != ProjectStatus::Active {
        return false;
    }
    let after_start = date >= project.start_date;
    let before_end = project.end_date.map_or(true, |end| date <= end);
    after_start && before_end
}

pub fn is_valid_project_period(start: CalendarDay, end: Option<CalendarDay>) -> bool {
    end.map_or(true, |end| start <= end)
}
